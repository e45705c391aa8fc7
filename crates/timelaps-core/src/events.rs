use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::journal::SessionId;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The front end renders them; collaborators react to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. `elapsed_secs` always equals the selected
    /// duration since a run can only complete by counting all the way down.
    TimerCompleted {
        elapsed_secs: u64,
        started_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Countdown cancelled before reaching zero. Nothing is recorded.
    TimerStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        selected_secs: u64,
        remaining_secs: u64,
        display: String,
        started_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        id: SessionId,
        name: String,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SessionDeleted {
        id: SessionId,
        at: DateTime<Utc>,
    },
    PinToggled {
        id: SessionId,
        pinned: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Timestamp at which the event was produced.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerCompleted { at, .. }
            | Event::TimerStopped { at, .. }
            | Event::StateSnapshot { at, .. }
            | Event::SessionRecorded { at, .. }
            | Event::SessionDeleted { at, .. }
            | Event::PinToggled { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let at = Utc::now();
        let json = serde_json::to_value(Event::TimerStarted {
            duration_secs: 600,
            at,
        })
        .unwrap();
        assert_eq!(json["type"], "TimerStarted");
        assert_eq!(json["duration_secs"], 600);
    }

    #[test]
    fn completion_event_parses_back() {
        let at = Utc::now();
        let event = Event::TimerCompleted {
            elapsed_secs: 300,
            started_at: at,
            at,
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.at(), at);
    }
}
