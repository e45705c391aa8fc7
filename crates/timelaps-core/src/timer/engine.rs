//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads or read the clock - the caller registers a one-second
//! tick source and passes timestamps in.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --tick (remaining > 0)--> Running
//!                 Running --tick (remaining == 0)--> Idle   (TimerCompleted)
//!                 Running --stop--> Idle                    (TimerStopped)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start(600, Utc::now())?;
//! // Once per second:
//! engine.tick(Utc::now()); // Returns Some(Event::TimerCompleted) on the last tick
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::events::Event;
use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Core countdown engine.
///
/// Invariant: `remaining_secs <= selected_secs`, and `remaining_secs` only
/// ever decreases while running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    selected_secs: u64,
    remaining_secs: u64,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

impl TimerEngine {
    /// Create an idle engine with nothing selected.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            selected_secs: 0,
            remaining_secs: 0,
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn selected_secs(&self) -> u64 {
        self.selected_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.selected_secs - self.remaining_secs
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format::countdown(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, at: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            state: self.state,
            selected_secs: self.selected_secs,
            remaining_secs: self.remaining_secs,
            display: self.display(),
            started_at: self.started_at,
            at,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, duration_secs: u64, at: DateTime<Utc>) -> Result<Event, TimerError> {
        if duration_secs == 0 {
            return Err(TimerError::ZeroDuration);
        }
        if self.state == TimerState::Running {
            return Err(TimerError::AlreadyRunning {
                remaining_secs: self.remaining_secs,
            });
        }
        self.state = TimerState::Running;
        self.selected_secs = duration_secs;
        self.remaining_secs = duration_secs;
        self.started_at = Some(at);
        Ok(Event::TimerStarted { duration_secs, at })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Event::TimerCompleted)` on the tick that reaches zero.
    /// Ticks delivered while idle are ignored.
    pub fn tick(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = TimerState::Idle;
        Some(Event::TimerCompleted {
            elapsed_secs: self.elapsed_secs(),
            started_at: self.started_at.unwrap_or(at),
            at,
        })
    }

    /// Cancel a running countdown. Idempotent: returns `None` when idle.
    pub fn stop(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Idle;
        Some(Event::TimerStopped {
            remaining_secs: self.remaining_secs,
            at,
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn start_sets_remaining_and_activates() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Idle);

        let at = Utc::now();
        let event = engine.start(600, at).unwrap();
        assert_eq!(event, Event::TimerStarted { duration_secs: 600, at });
        assert!(engine.is_active());
        assert_eq!(engine.remaining_secs(), 600);
        assert_eq!(engine.selected_secs(), 600);
        assert_eq!(engine.started_at(), Some(at));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.start(0, Utc::now()), Err(TimerError::ZeroDuration));
        assert!(!engine.is_active());
    }

    #[test]
    fn start_while_running_is_rejected() {
        let mut engine = TimerEngine::new();
        engine.start(10, Utc::now()).unwrap();
        engine.tick(Utc::now());
        assert_eq!(
            engine.start(300, Utc::now()),
            Err(TimerError::AlreadyRunning { remaining_secs: 9 })
        );
        assert_eq!(engine.selected_secs(), 10);
    }

    #[test]
    fn completes_on_the_tick_that_reaches_zero() {
        let mut engine = TimerEngine::new();
        let started = Utc::now();
        engine.start(3, started).unwrap();

        assert!(engine.tick(Utc::now()).is_none());
        assert!(engine.tick(Utc::now()).is_none());
        assert_eq!(engine.display(), "00:01");

        let at = Utc::now();
        let done = engine.tick(at);
        assert_eq!(
            done,
            Some(Event::TimerCompleted {
                elapsed_secs: 3,
                started_at: started,
                at,
            })
        );
        assert!(!engine.is_active());
        assert_eq!(engine.remaining_secs(), 0);

        // Further ticks are ignored.
        assert!(engine.tick(Utc::now()).is_none());
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut engine = TimerEngine::new();
        assert!(engine.stop(Utc::now()).is_none());

        engine.start(60, Utc::now()).unwrap();
        engine.tick(Utc::now());
        match engine.stop(Utc::now()) {
            Some(Event::TimerStopped { remaining_secs, .. }) => assert_eq!(remaining_secs, 59),
            other => panic!("Expected TimerStopped, got {other:?}"),
        }
        assert!(engine.stop(Utc::now()).is_none());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn engine_can_restart_after_completion() {
        let mut engine = TimerEngine::new();
        engine.start(1, Utc::now()).unwrap();
        assert!(engine.tick(Utc::now()).is_some());
        engine.start(2, Utc::now()).unwrap();
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let mut engine = TimerEngine::new();
        engine.start(600, Utc::now()).unwrap();
        engine.tick(Utc::now());
        match engine.snapshot(Utc::now()) {
            Event::StateSnapshot {
                state,
                remaining_secs,
                display,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(remaining_secs, 599);
                assert_eq!(display, "09:59");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    proptest! {
        #[test]
        fn remaining_never_increases(duration in 1u64..2_000, ticks in 0usize..2_500) {
            let mut engine = TimerEngine::new();
            engine.start(duration, Utc::now()).unwrap();
            let mut previous = engine.remaining_secs();
            let mut completions = 0;
            for _ in 0..ticks {
                if engine.tick(Utc::now()).is_some() {
                    completions += 1;
                }
                prop_assert!(engine.remaining_secs() <= previous);
                prop_assert!(engine.remaining_secs() <= engine.selected_secs());
                previous = engine.remaining_secs();
            }
            prop_assert!(completions <= 1);
        }

        #[test]
        fn exactly_duration_ticks_complete_once(duration in 1u64..1_000) {
            let mut engine = TimerEngine::new();
            engine.start(duration, Utc::now()).unwrap();
            let events: Vec<Event> = (0..duration).filter_map(|_| engine.tick(Utc::now())).collect();
            prop_assert!(!engine.is_active());
            prop_assert_eq!(events.len(), 1);
            match &events[0] {
                Event::TimerCompleted { elapsed_secs, .. } => prop_assert_eq!(*elapsed_secs, duration),
                other => prop_assert!(false, "unexpected event {:?}", other),
            }
        }
    }
}
