//! Lifecycle status derived from a record's advertised start time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a race or event is still open for betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    /// Derive the status at `now`.
    ///
    /// Compared at whole-second granularity: a start time equal to `now`
    /// is still open.
    pub fn at(advertised_start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now.timestamp() > advertised_start_time.timestamp() {
            Status::Closed
        } else {
            Status::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
