pub mod config;
pub mod presets;
pub mod run;
pub mod session;

use std::time::Duration;

use timelaps_core::session::SessionSettings;
use timelaps_core::{Config, Preset, SessionController};

use crate::terminal::{Bell, IntervalTicks, TerminalNotifier};

/// Tick period shared by the interactive commands.
#[derive(clap::Args, Debug, Clone)]
pub struct TickArgs {
    /// Tick period in milliseconds (for demos and tests)
    #[arg(long, hide = true, default_value_t = 1000)]
    pub tick_ms: u64,
}

impl TickArgs {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Resolve a requested length in minutes against the configured presets.
///
/// Minutes outside the configured list are still accepted, with a warning.
pub fn resolve_preset(config: &Config, minutes: Option<u32>) -> Result<Preset, Box<dyn std::error::Error>> {
    let Some(minutes) = minutes else {
        return Ok(config.default_preset());
    };
    if let Some(preset) = config.preset(minutes) {
        return Ok(preset);
    }
    let preset = Preset::from_minutes(minutes)?;
    tracing::warn!(minutes, "not one of the configured presets");
    Ok(preset)
}

pub fn terminal_controller(settings: SessionSettings, ticks: &TickArgs) -> SessionController<IntervalTicks> {
    let mut controller = SessionController::new(settings, IntervalTicks::new(ticks.period()))
        .with_notifier(TerminalNotifier::default())
        .with_sound(Bell);
    controller.request_notification_permission();
    controller
}
