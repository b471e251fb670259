//! Session history for a single exercise.
//!
//! Turns the flat list of logged sets into per-day sessions and derives
//! the inputs the overload classifier needs.

use crate::SetEntry;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// One exercise performed on one date
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseSession {
    pub date: NaiveDate,
    /// Heaviest weight lifted that day
    pub working_weight_kg: f64,
    /// Reps of the sets performed at the working weight, in logging order
    pub reps: Vec<i32>,
    /// Number of sets logged that day at any weight
    pub total_sets: usize,
}

/// Pre-aggregated arguments for `determine_status`
#[derive(Clone, Debug, PartialEq)]
pub struct OverloadInputs {
    pub working_weight_kg: f64,
    pub current_reps: Vec<i32>,
    /// Empty when the previous session was at a different weight
    pub previous_reps: Vec<i32>,
    /// Consecutive sessions at the working weight, including the latest
    pub sessions_at_weight: i32,
}

/// Weights within this distance are the same working weight
const WEIGHT_TOLERANCE_KG: f64 = 0.05;

fn same_weight(a: f64, b: f64) -> bool {
    (a - b).abs() < WEIGHT_TOLERANCE_KG
}

/// Group an exercise's sets into sessions, oldest first
pub fn group_sessions(sets: &[SetEntry], exercise_id: &str) -> Vec<ExerciseSession> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&SetEntry>> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.exercise_id == exercise_id) {
        by_date.entry(set.performed_on).or_default().push(set);
    }

    by_date
        .into_iter()
        .map(|(date, mut day_sets)| {
            day_sets.sort_by_key(|s| s.logged_at);
            let working_weight_kg = day_sets
                .iter()
                .map(|s| s.weight_kg)
                .fold(f64::MIN, f64::max);
            let reps = day_sets
                .iter()
                .filter(|s| same_weight(s.weight_kg, working_weight_kg))
                .map(|s| s.reps)
                .collect();

            ExerciseSession {
                date,
                working_weight_kg,
                reps,
                total_sets: day_sets.len(),
            }
        })
        .collect()
}

/// Derive classifier inputs from the latest session of an exercise
///
/// Returns `None` if the exercise has no logged sets.
pub fn overload_inputs(sets: &[SetEntry], exercise_id: &str) -> Option<OverloadInputs> {
    let sessions = group_sessions(sets, exercise_id);
    let (current, earlier) = sessions.split_last()?;

    let sessions_at_weight = 1 + earlier
        .iter()
        .rev()
        .take_while(|s| same_weight(s.working_weight_kg, current.working_weight_kg))
        .count() as i32;

    let previous_reps = earlier
        .last()
        .filter(|s| same_weight(s.working_weight_kg, current.working_weight_kg))
        .map(|s| s.reps.clone())
        .unwrap_or_default();

    tracing::debug!(
        "{}: {} sessions, {} at {} kg",
        exercise_id,
        sessions.len(),
        sessions_at_weight,
        current.working_weight_kg
    );

    Some(OverloadInputs {
        working_weight_kg: current.working_weight_kg,
        current_reps: current.reps.clone(),
        previous_reps,
        sessions_at_weight,
    })
}

/// Sets performed in the `days` days up to and including `today`
pub fn recent_sets(sets: &[SetEntry], today: NaiveDate, days: i64) -> Vec<SetEntry> {
    let cutoff = Duration::try_days(days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN);
    sets.iter()
        .filter(|s| s.performed_on > cutoff && s.performed_on <= today)
        .cloned()
        .collect()
}
