//! Terminal implementations of the core collaborators.

use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval};
use timelaps_core::collaborators::{Notifier, Reminder, SoundPlayer, TickSource};
use timelaps_core::NotifyError;
use uuid::Uuid;

/// Tick source backed by a tokio interval that only exists while registered.
pub struct IntervalTicks {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Wait for the next tick. Never resolves while unregistered.
    pub async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicks {
    fn register(&mut self) {
        // First tick one period from now, not immediately.
        self.interval = Some(interval_at(Instant::now() + self.period, self.period));
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_registered(&self) -> bool {
        self.interval.is_some()
    }
}

/// Prints reminders on stderr after their delay.
///
/// Pending reminders are aborted on `cancel` and when the notifier is
/// dropped, so nothing fires after the session ends.
#[derive(Default)]
pub struct TerminalNotifier {
    pending: HashMap<Uuid, JoinHandle<()>>,
    delivered: Arc<AtomicUsize>,
}

impl TerminalNotifier {
    /// Shared count of reminders actually shown.
    pub fn delivered(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.delivered)
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&mut self) -> Result<(), NotifyError> {
        if std::io::stderr().is_terminal() {
            Ok(())
        } else {
            Err(NotifyError::Unavailable("stderr is not a terminal".into()))
        }
    }

    fn schedule(&mut self, reminder: &Reminder) {
        self.pending.retain(|_, handle| !handle.is_finished());
        let Reminder {
            id,
            delay,
            title,
            body,
        } = reminder.clone();
        tracing::debug!(%id, delay_secs = delay.as_secs(), "reminder scheduled");
        let delivered = Arc::clone(&self.delivered);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            eprintln!("\n\x07{title}: {body}");
            delivered.fetch_add(1, Ordering::Relaxed);
        });
        self.pending.insert(id, handle);
    }

    fn cancel(&mut self, id: Uuid) {
        if let Some(handle) = self.pending.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TerminalNotifier {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}

/// Rings the terminal bell.
pub struct Bell;

impl SoundPlayer for Bell {
    fn play_completion(&mut self) {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\x07");
        let _ = stderr.flush();
    }
}
