//! Duration buckets used by the preference profile and the scorer.

use serde::Serialize;
use std::fmt;

/// Longest duration (minutes, inclusive) still considered short
pub const SHORT_MAX_MINUTES: i64 = 60;

/// Longest duration (minutes, inclusive) still considered medium
pub const MEDIUM_MAX_MINUTES: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationCategory {
    Short,
    Medium,
    Long,
}

impl DurationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationCategory::Short => "short",
            DurationCategory::Medium => "medium",
            DurationCategory::Long => "long",
        }
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a duration in minutes to its bucket.
///
/// Total over all inputs: zero and negative durations land in `Short`.
pub fn categorize(minutes: i64) -> DurationCategory {
    if minutes <= SHORT_MAX_MINUTES {
        DurationCategory::Short
    } else if minutes <= MEDIUM_MAX_MINUTES {
        DurationCategory::Medium
    } else {
        DurationCategory::Long
    }
}
