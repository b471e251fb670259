//! Built-in exercise catalog.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and shared
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of barbell, dumbbell and bodyweight lifts
///
/// Prefer `default_catalog()` outside of tests.
pub fn build_default_catalog() -> Catalog {
    let entries = [
        ("squat", "Back Squat", MuscleGroup::Legs, 5, 8),
        ("deadlift", "Deadlift", MuscleGroup::Back, 3, 6),
        ("bench_press", "Bench Press", MuscleGroup::Chest, 6, 10),
        ("overhead_press", "Overhead Press", MuscleGroup::Shoulders, 6, 10),
        ("barbell_row", "Barbell Row", MuscleGroup::Back, 8, 12),
        ("pullup", "Pull-up", MuscleGroup::Back, 5, 10),
        ("leg_press", "Leg Press", MuscleGroup::Legs, 10, 15),
        ("dumbbell_curl", "Dumbbell Curl", MuscleGroup::Arms, 8, 12),
    ];

    let exercises = entries
        .into_iter()
        .map(|(id, name, muscle_group, min, max)| {
            (
                id.to_string(),
                Exercise {
                    id: id.into(),
                    name: name.into(),
                    muscle_group,
                    target_rep_min: min,
                    target_rep_max: max,
                },
            )
        })
        .collect::<HashMap<_, _>>();

    Catalog { exercises }
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    /// Rep ceiling for an exercise, if it is known
    pub fn target_rep_max(&self, id: &str) -> Option<i32> {
        self.get(id).map(|e| e.target_rep_max)
    }

    /// Exercise ids in alphabetical order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.exercises.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Validate the catalog for internal consistency
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, exercise) in &self.exercises {
            if exercise.id.is_empty() {
                errors.push(format!("Exercise under key '{}' has an empty id", key));
            } else if exercise.id != *key {
                errors.push(format!(
                    "Exercise '{}' is stored under key '{}'",
                    exercise.id, key
                ));
            }

            if exercise.target_rep_max <= 0 {
                errors.push(format!(
                    "Exercise '{}' has a non-positive rep ceiling ({})",
                    exercise.id, exercise.target_rep_max
                ));
            }

            if exercise.target_rep_min > exercise.target_rep_max {
                errors.push(format!(
                    "Exercise '{}' has rep range {}-{} with min above max",
                    exercise.id, exercise.target_rep_min, exercise.target_rep_max
                ));
            }
        }

        errors
    }
}
