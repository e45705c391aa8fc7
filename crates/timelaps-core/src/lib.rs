//! # Time Laps Core Library
//!
//! This library provides the core logic for the Time Laps countdown timer.
//! Front ends (the `timelaps-cli` binary, or any GUI shell) are thin layers
//! that render state and feed ticks and commands into the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven `Idle`/`Running` state machine; the
//!   caller delivers one `tick()` per second
//! - **Journal**: in-memory list of completed sessions with pinning
//! - **Session Controller**: owns both, and drives the clock, tick source,
//!   reminder notifier and completion sound collaborators
//! - **Storage**: TOML-based configuration (the journal is not persisted)
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core countdown state machine
//! - [`Journal`]: Session records and pinned/unpinned views
//! - [`SessionController`]: Engine + journal + collaborators
//! - [`Config`]: Application configuration management

pub mod collaborators;
pub mod error;
pub mod events;
pub mod format;
pub mod journal;
pub mod quotes;
pub mod session;
pub mod storage;
pub mod timer;

pub use collaborators::{Clock, ManualTicks, Notifier, Reminder, SoundPlayer, SystemClock, TickSource};
pub use error::{ConfigError, CoreError, NotifyError, SessionError, TimerError, ValidationError};
pub use events::Event;
pub use journal::{Journal, PinSet, SessionId, SessionRecord};
pub use session::{Completion, SessionController, SessionSettings};
pub use storage::Config;
pub use timer::{Preset, TimerEngine, TimerState};
