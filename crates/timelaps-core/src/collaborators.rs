//! Side-effecting collaborators the session controller drives.
//!
//! The core never sleeps, spawns or touches audio. Front ends implement
//! these traits; tests use recording fakes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::error::NotifyError;

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A periodic one-second tick source.
///
/// The controller registers it on every start and cancels it exactly once
/// per start. Implementations deliver ticks by calling
/// `SessionController::tick` from the same thread that owns the controller.
pub trait TickSource {
    fn register(&mut self);
    fn cancel(&mut self);
    fn is_registered(&self) -> bool;
}

/// Schedules local "still running" reminders.
pub trait Notifier {
    /// Ask the platform for permission to show notifications.
    ///
    /// Default: always granted.
    fn request_permission(&mut self) -> Result<(), NotifyError> {
        Ok(())
    }

    /// Fire-and-forget: show `reminder` after `reminder.delay`.
    fn schedule(&mut self, reminder: &Reminder);

    /// Withdraw a reminder that has not fired yet. Unknown ids are ignored.
    ///
    /// Default: no-op.
    fn cancel(&mut self, _id: Uuid) {}
}

/// Plays the completion alert.
pub trait SoundPlayer {
    fn play_completion(&mut self);
}

/// A scheduled local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub delay: Duration,
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn new(delay: Duration, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            delay,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Notifier that drops every reminder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn schedule(&mut self, reminder: &Reminder) {
        tracing::trace!(id = %reminder.id, "reminder dropped");
    }
}

/// Sound player that stays silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play_completion(&mut self) {}
}

/// Tick source that only tracks registration; the caller drives ticks
/// by hand. Used by tests and by hosts that own their own event loop.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    registered: bool,
    pub registrations: u32,
    pub cancellations: u32,
}

impl TickSource for ManualTicks {
    fn register(&mut self) {
        self.registered = true;
        self.registrations += 1;
    }

    fn cancel(&mut self) {
        self.registered = false;
        self.cancellations += 1;
    }

    fn is_registered(&self) -> bool {
        self.registered
    }
}
