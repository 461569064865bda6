use crate::core::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Health of a shard, an index or anything rolled up from them.
///
/// Ordered by severity: `Red > Yellow > Green`. Combining two statuses always keeps the
/// more severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every copy of every shard is active.
    Green,
    /// All primaries are active, some replicas are not.
    Yellow,
    /// At least one primary is not active, or routing is missing or invalid.
    Red,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 3] = [HealthStatus::Green, HealthStatus::Yellow, HealthStatus::Red];

    /// Severity rank; higher is worse.
    pub const fn severity(self) -> u8 {
        match self {
            HealthStatus::Green => 0,
            HealthStatus::Yellow => 1,
            HealthStatus::Red => 2,
        }
    }

    /// Returns the more severe of `self` and `other`.
    pub fn worse(self, other: HealthStatus) -> HealthStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Ordinal written on the wire.
    pub const fn value(self) -> u8 {
        match self {
            HealthStatus::Green => 0,
            HealthStatus::Yellow => 1,
            HealthStatus::Red => 2,
        }
    }

    /// Maps a wire ordinal back to a status.
    ///
    /// Any byte outside the three known ordinals means the stream is corrupt.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(HealthStatus::Green),
            1 => Ok(HealthStatus::Yellow),
            2 => Ok(HealthStatus::Red),
            other => Err(HealthError::corrupt(format!(
                "unknown health status ordinal {}",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Green => "green",
            HealthStatus::Yellow => "yellow",
            HealthStatus::Red => "red",
        }
    }
}

impl Ord for HealthStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for HealthStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(HealthStatus::Green),
            "yellow" => Ok(HealthStatus::Yellow),
            "red" => Ok(HealthStatus::Red),
            _ => Err(HealthError::UnknownStatus(s.to_string())),
        }
    }
}
