//! Session record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format;

/// Label shown for sessions saved with an empty name.
pub const UNNAMED_SESSION: &str = "Unnamed session";

/// Unique identifier for a journal record.
///
/// Allocated from a per-journal counter, so two sessions recorded in the
/// same instant still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// One completed countdown run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    /// When the record was saved.
    pub recorded_at: DateTime<Utc>,
    pub duration_secs: u64,
    /// User-supplied label. Empty means unnamed.
    #[serde(default)]
    pub name: String,
    pub started_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(
        id: SessionId,
        name: impl Into<String>,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recorded_at,
            duration_secs,
            name: name.into(),
            started_at,
        }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.is_unnamed() {
            UNNAMED_SESSION
        } else {
            &self.name
        }
    }

    /// Duration as `HH:MM:SS`.
    pub fn display_duration(&self) -> String {
        format::duration(self.duration_secs)
    }
}
