//! Local store for logged sets, meals and settings.
//!
//! Layout under the data directory:
//! - `sets.jsonl`: one `SetEntry` per line
//! - `meals.jsonl`: one `MealEntry` per line
//! - `settings.json`: `UserSettings`

use crate::calendar::meal_log_block;
use crate::journal::{read_entries, EntrySink, JsonlSink};
use crate::{Catalog, Error, MealEntry, NewMeal, Result, SetEntry, UserSettings, WeightUnit};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const SETS_FILE: &str = "sets.jsonl";
pub const MEALS_FILE: &str = "meals.jsonl";
pub const SETTINGS_FILE: &str = "settings.json";

pub struct LogStore {
    data_dir: PathBuf,
    catalog: Option<&'static Catalog>,
    default_unit: WeightUnit,
}

impl LogStore {
    /// Open a store rooted at `data_dir`; nothing is created until first write
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog: None,
            default_unit: WeightUnit::default(),
        }
    }

    /// Only accept sets for exercises in `catalog`
    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Unit reported when no settings document exists yet
    pub fn with_default_unit(mut self, unit: WeightUnit) -> Self {
        self.default_unit = unit;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn sets_path(&self) -> PathBuf {
        self.data_dir.join(SETS_FILE)
    }

    fn meals_path(&self) -> PathBuf {
        self.data_dir.join(MEALS_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    // ------------------------------------------------------------------
    // Sets
    // ------------------------------------------------------------------

    /// Record one completed set; weight must already be in kilograms
    pub fn log_set(
        &self,
        exercise_id: &str,
        performed_on: NaiveDate,
        weight_kg: f64,
        reps: i32,
    ) -> Result<SetEntry> {
        if let Some(catalog) = self.catalog {
            if catalog.get(exercise_id).is_none() {
                return Err(Error::UnknownExercise(exercise_id.to_string()));
            }
        }
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(Error::InvalidEntry(format!(
                "weight must be a non-negative number, got {}",
                weight_kg
            )));
        }
        if reps < 0 {
            return Err(Error::InvalidEntry(format!(
                "reps must be non-negative, got {}",
                reps
            )));
        }

        let entry = SetEntry {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.to_string(),
            performed_on,
            weight_kg,
            reps,
            logged_at: Utc::now(),
        };

        JsonlSink::new(self.sets_path()).append(&entry)?;
        tracing::info!(
            "Logged {} x {} kg x {} on {}",
            exercise_id,
            weight_kg,
            reps,
            performed_on
        );
        Ok(entry)
    }

    pub fn sets(&self) -> Result<Vec<SetEntry>> {
        read_entries(&self.sets_path())
    }

    pub fn sets_for(&self, exercise_id: &str) -> Result<Vec<SetEntry>> {
        let mut sets = self.sets()?;
        sets.retain(|s| s.exercise_id == exercise_id);
        Ok(sets)
    }

    // ------------------------------------------------------------------
    // Meals
    // ------------------------------------------------------------------

    /// Record a meal if its date passes the weekday gate
    pub fn log_meal(&self, meal: NewMeal, today: NaiveDate) -> Result<MealEntry> {
        if let Some(block) = meal_log_block(meal.date, today) {
            return Err(Error::MealLogClosed {
                date: meal.date,
                reason: block.to_string(),
            });
        }
        if meal.name.trim().is_empty() {
            return Err(Error::InvalidEntry("meal name is empty".into()));
        }
        if !meal.calories.is_finite() || meal.calories < 0.0 {
            return Err(Error::InvalidEntry(format!(
                "calories must be a non-negative number, got {}",
                meal.calories
            )));
        }

        let entry = MealEntry {
            id: Uuid::new_v4(),
            date: meal.date,
            kind: meal.kind,
            name: meal.name.trim().to_string(),
            calories: meal.calories,
            protein_g: meal.protein_g,
            carbs_g: meal.carbs_g,
            fat_g: meal.fat_g,
            logged_at: Utc::now(),
        };

        JsonlSink::new(self.meals_path()).append(&entry)?;
        tracing::info!("Logged {} '{}' on {}", entry.kind, entry.name, entry.date);
        Ok(entry)
    }

    pub fn meals(&self) -> Result<Vec<MealEntry>> {
        read_entries(&self.meals_path())
    }

    pub fn meals_on(&self, date: NaiveDate) -> Result<Vec<MealEntry>> {
        let mut meals = self.meals()?;
        meals.retain(|m| m.date == date);
        Ok(meals)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn settings(&self) -> Result<UserSettings> {
        UserSettings::load_or(
            &self.settings_path(),
            UserSettings {
                weight_unit: self.default_unit,
            },
        )
    }

    pub fn set_preferred_unit(&self, unit: WeightUnit) -> Result<UserSettings> {
        let settings = UserSettings::update(
            &self.settings_path(),
            UserSettings {
                weight_unit: self.default_unit,
            },
            |s| s.weight_unit = unit,
        )?;
        tracing::info!("Preferred weight unit set to {}", unit);
        Ok(settings)
    }
}
