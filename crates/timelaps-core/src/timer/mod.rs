mod engine;
mod preset;

pub use engine::{TimerEngine, TimerState};
pub use preset::Preset;
