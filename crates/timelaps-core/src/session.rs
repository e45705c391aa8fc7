//! Session controller: the single owner of timer and journal state.
//!
//! Front ends hold one `SessionController` and feed it user commands and
//! ticks. The controller keeps the tick-source lifecycle honest: every
//! successful `start` is matched by exactly one `cancel`, from completion,
//! `stop`, or drop.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::collaborators::{
    Clock, NoopNotifier, Notifier, Reminder, Silent, SoundPlayer, SystemClock, TickSource,
};
use crate::error::{Result, SessionError};
use crate::events::Event;
use crate::journal::{Journal, SessionId};
use crate::quotes;
use crate::storage::Config;
use crate::timer::{Preset, TimerEngine};

/// A finished countdown waiting for the user to name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub elapsed_secs: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Behaviour knobs taken from [`Config`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub reminder: Option<ReminderSettings>,
    pub sound_enabled: bool,
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub delay: Duration,
    pub title: String,
    pub body: String,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        let reminder = config.reminder.enabled.then(|| ReminderSettings {
            delay: config.reminder.delay(),
            title: config.reminder.title.clone(),
            body: config.reminder.body.clone(),
        });
        Self {
            reminder,
            sound_enabled: config.sound.enabled,
            quotes: config.quotes.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct SessionController<T: TickSource> {
    engine: TimerEngine,
    journal: Journal,
    pending: Option<Completion>,
    quote: Option<String>,
    /// Cleared when the notifier refuses permission.
    notifications_allowed: bool,
    /// Reminder scheduled for the running countdown.
    reminder: Option<Uuid>,
    settings: SessionSettings,
    ticks: T,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    sound: Box<dyn SoundPlayer>,
    rng: Box<dyn RngCore>,
}

impl<T: TickSource> SessionController<T> {
    /// Controller with the real clock and no notification or sound output.
    pub fn new(settings: SessionSettings, ticks: T) -> Self {
        Self {
            engine: TimerEngine::new(),
            journal: Journal::new(),
            pending: None,
            quote: None,
            notifications_allowed: true,
            reminder: None,
            settings,
            ticks,
            clock: Box::new(SystemClock),
            notifier: Box::new(NoopNotifier),
            sound: Box::new(Silent),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_sound(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Direct journal access for hosts that import or edit records.
    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    pub fn pending(&self) -> Option<&Completion> {
        self.pending.as_ref()
    }

    /// Motivational quote picked for the current or last run.
    pub fn quote(&self) -> Option<&str> {
        self.quote.as_deref()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot(self.clock.now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Ask for notification permission once, at startup.
    ///
    /// Denial is logged and otherwise ignored: reminders are simply not
    /// scheduled from then on.
    pub fn request_notification_permission(&mut self) -> bool {
        self.notifications_allowed = match self.notifier.request_permission() {
            Ok(()) => {
                tracing::debug!("notification permission granted");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "reminder notifications disabled");
                false
            }
        };
        self.notifications_allowed
    }

    pub fn notifications_allowed(&self) -> bool {
        self.notifications_allowed
    }

    pub fn start(&mut self, preset: Preset) -> Result<Event> {
        self.start_secs(preset.secs())
    }

    pub fn start_secs(&mut self, duration_secs: u64) -> Result<Event> {
        let event = self.engine.start(duration_secs, self.clock.now())?;
        if let Some(stale) = self.pending.take() {
            tracing::debug!(elapsed_secs = stale.elapsed_secs, "unnamed session discarded");
        }
        self.ticks.register();

        let quote = quotes::pick(&self.settings.quotes, &mut *self.rng);
        self.quote = Some(quote);

        self.reminder = None;
        match &self.settings.reminder {
            Some(settings) if self.notifications_allowed => {
                let reminder = Reminder::new(settings.delay, &settings.title, &settings.body);
                self.notifier.schedule(&reminder);
                self.reminder = Some(reminder.id);
            }
            _ => {}
        }

        tracing::info!(duration_secs, "countdown started");
        Ok(event)
    }

    /// Deliver one tick. Returns `Event::TimerCompleted` on the last one.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick(self.clock.now());
        match &event {
            Some(Event::TimerCompleted {
                elapsed_secs,
                started_at,
                at,
            }) => {
                self.ticks.cancel();
                // A reminder already in flight still fires after completion.
                self.reminder = None;
                if self.settings.sound_enabled {
                    self.sound.play_completion();
                }
                self.pending = Some(Completion {
                    elapsed_secs: *elapsed_secs,
                    started_at: *started_at,
                    completed_at: *at,
                });
                tracing::info!(elapsed_secs, "countdown completed");
            }
            _ if self.engine.is_active() => {
                tracing::trace!(remaining_secs = self.engine.remaining_secs(), "tick");
            }
            _ => {}
        }
        event
    }

    /// Cancel the running countdown without recording it. Idempotent.
    pub fn stop(&mut self) -> Option<Event> {
        let event = self.engine.stop(self.clock.now())?;
        self.ticks.cancel();
        self.cancel_reminder();
        tracing::info!(remaining_secs = self.engine.remaining_secs(), "countdown stopped");
        Some(event)
    }

    fn cancel_reminder(&mut self) {
        if let Some(id) = self.reminder.take() {
            self.notifier.cancel(id);
            tracing::debug!(%id, "reminder cancelled");
        }
    }

    /// Record the pending completion under `name`. An empty name is allowed.
    pub fn confirm_name(&mut self, name: impl Into<String>) -> Result<Event> {
        let completion = self.pending.take().ok_or(SessionError::NoPendingCompletion)?;
        let name = name.into();
        let at = self.clock.now();
        let id = self
            .journal
            .record(name.clone(), completion.elapsed_secs, completion.started_at, at);
        tracing::info!(%id, "session recorded");
        Ok(Event::SessionRecorded {
            id,
            name,
            duration_secs: completion.elapsed_secs,
            started_at: completion.started_at,
            at,
        })
    }

    /// Drop the pending completion without recording it.
    pub fn discard_pending(&mut self) -> Option<Completion> {
        self.pending.take()
    }

    /// Delete a journal record. `None` when the id is unknown.
    pub fn delete(&mut self, id: SessionId) -> Option<Event> {
        self.journal.delete(id)?;
        Some(Event::SessionDeleted {
            id,
            at: self.clock.now(),
        })
    }

    pub fn toggle_pin(&mut self, id: SessionId) -> Event {
        let pinned = self.journal.toggle_pin(id);
        Event::PinToggled {
            id,
            pinned,
            at: self.clock.now(),
        }
    }
}

impl<T: TickSource> Drop for SessionController<T> {
    fn drop(&mut self) {
        if self.engine.is_active() {
            self.ticks.cancel();
            self.cancel_reminder();
        }
    }
}
