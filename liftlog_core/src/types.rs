//! Core domain types for liftlog.
//!
//! This module defines the records kept by the local store:
//! - Exercises and the catalog they live in
//! - Logged strength sets
//! - Logged meals
//! - Per-user settings

use crate::units::WeightUnit;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Exercise Types
// ============================================================================

/// Primary muscle group trained by an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Legs,
    Chest,
    Back,
    Shoulders,
    Arms,
}

/// An exercise definition with its prescribed rep range
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub target_rep_min: i32,
    /// Rep ceiling: once every set reaches it, the weight goes up
    pub target_rep_max: i32,
}

/// The set of known exercises, keyed by id
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: HashMap<String, Exercise>,
}

// ============================================================================
// Logged Records
// ============================================================================

/// One completed set of an exercise
///
/// Weight is always stored in kilograms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub id: Uuid,
    pub exercise_id: String,
    pub performed_on: NaiveDate,
    pub weight_kg: f64,
    pub reps: i32,
    pub logged_at: DateTime<Utc>,
}

/// Which meal of the day an entry belongs to
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "breakfast",
            MealKind::Lunch => "lunch",
            MealKind::Dinner => "dinner",
            MealKind::Snack => "snack",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealKind::Breakfast),
            "lunch" => Ok(MealKind::Lunch),
            "dinner" => Ok(MealKind::Dinner),
            "snack" => Ok(MealKind::Snack),
            other => Err(Error::InvalidEntry(format!("unknown meal kind: {}", other))),
        }
    }
}

/// A meal as entered, before the store assigns an id and timestamp
#[derive(Clone, Debug, PartialEq)]
pub struct NewMeal {
    pub date: NaiveDate,
    pub kind: MealKind,
    pub name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

/// A logged meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: MealKind,
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

// ============================================================================
// Settings
// ============================================================================

/// Per-user settings persisted in the data directory
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct UserSettings {
    #[serde(default)]
    pub weight_unit: WeightUnit,
}
