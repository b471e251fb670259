//! Progressive overload classification.
//!
//! Labels a lift's trend at its working weight from the rep counts of the
//! current and previous sessions:
//! - Every set at or above the rep ceiling: progressing, add weight
//! - More total reps than last time: progressing
//! - Three or more sessions at the weight without more reps: stalled
//! - Otherwise: maintaining

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sessions held at one weight before a flat volume counts as a stall
pub const STALL_SESSION_THRESHOLD: i32 = 3;

/// Trend of a lift at its current working weight
///
/// Only `Progressing` can recommend a weight increase.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverloadStatus {
    Progressing { ready_to_increase: bool },
    Stalled,
    Maintaining,
}

impl OverloadStatus {
    pub fn ready_to_increase(&self) -> bool {
        matches!(
            self,
            OverloadStatus::Progressing {
                ready_to_increase: true
            }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverloadStatus::Progressing { .. } => "progressing",
            OverloadStatus::Stalled => "stalled",
            OverloadStatus::Maintaining => "maintaining",
        }
    }
}

impl fmt::Display for OverloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify the current session against the previous one at the same weight
///
/// `sessions_at_weight` counts the current session. Inputs are not
/// validated; negative values flow through the sums and comparisons.
pub fn determine_status(
    current_reps: &[i32],
    previous_reps: &[i32],
    target_rep_max: i32,
    sessions_at_weight: i32,
) -> OverloadStatus {
    if current_reps.is_empty() {
        return OverloadStatus::Maintaining;
    }

    // Ceiling reached on every set overrides history
    if current_reps.iter().all(|&reps| reps >= target_rep_max) {
        return OverloadStatus::Progressing {
            ready_to_increase: true,
        };
    }

    let total_current: i64 = current_reps.iter().map(|&r| r as i64).sum();
    let total_previous: i64 = previous_reps.iter().map(|&r| r as i64).sum();

    if total_current > total_previous {
        OverloadStatus::Progressing {
            ready_to_increase: false,
        }
    } else if sessions_at_weight >= STALL_SESSION_THRESHOLD {
        OverloadStatus::Stalled
    } else {
        OverloadStatus::Maintaining
    }
}
