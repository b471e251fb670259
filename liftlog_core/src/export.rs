//! CSV export of logged sets and meals.
//!
//! Exports overwrite the target file and are synced to disk before
//! returning.

use crate::calendar::format_date_key;
use crate::units::{convert_weight, WeightUnit};
use crate::{MealEntry, Result, SetEntry};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SetRow<'a> {
    id: String,
    exercise_id: &'a str,
    date: String,
    weight: f64,
    unit: WeightUnit,
    reps: i32,
}

impl<'a> SetRow<'a> {
    fn new(set: &'a SetEntry, unit: WeightUnit) -> Self {
        SetRow {
            id: set.id.to_string(),
            exercise_id: &set.exercise_id,
            date: format_date_key(set.performed_on),
            weight: convert_weight(set.weight_kg, unit),
            unit,
            reps: set.reps,
        }
    }
}

#[derive(Debug, Serialize)]
struct MealRow<'a> {
    id: String,
    date: String,
    meal: &'static str,
    name: &'a str,
    calories: f64,
    protein_g: Option<f64>,
    carbs_g: Option<f64>,
    fat_g: Option<f64>,
}

impl<'a> From<&'a MealEntry> for MealRow<'a> {
    fn from(meal: &'a MealEntry) -> Self {
        MealRow {
            id: meal.id.to_string(),
            date: format_date_key(meal.date),
            meal: meal.kind.as_str(),
            name: &meal.name,
            calories: meal.calories,
            protein_g: meal.protein_g,
            carbs_g: meal.carbs_g,
            fat_g: meal.fat_g,
        }
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_writer(File::create(path)?);
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} rows to {:?}", count, path);
    Ok(count)
}

/// Write sets to CSV with weights shown in `unit`
pub fn export_sets(sets: &[SetEntry], path: &Path, unit: WeightUnit) -> Result<usize> {
    write_rows(path, sets.iter().map(|s| SetRow::new(s, unit)))
}

pub fn export_meals(meals: &[MealEntry], path: &Path) -> Result<usize> {
    write_rows(path, meals.iter().map(MealRow::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealKind;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn test_set(weight_kg: f64) -> SetEntry {
        SetEntry {
            id: Uuid::new_v4(),
            exercise_id: "deadlift".into(),
            performed_on: day(),
            weight_kg,
            reps: 5,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_sets_in_pounds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sets.csv");

        let count = export_sets(&[test_set(100.0), test_set(45.0)], &path, WeightUnit::Lbs).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "exercise_id", "date", "weight", "unit", "reps"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][2], "2024-03-04");
        assert_eq!(&rows[0][3], "220.5");
        assert_eq!(&rows[0][4], "lbs");
        assert_eq!(&rows[1][3], "99.2");
    }

    #[test]
    fn test_export_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sets.csv");

        export_sets(&[test_set(100.0), test_set(80.0)], &path, WeightUnit::Kg).unwrap();
        export_sets(&[test_set(90.0)], &path, WeightUnit::Kg).unwrap();

        let reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.into_records().count(), 1);
    }

    #[test]
    fn test_export_meals() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out/meals.csv");

        let meal = MealEntry {
            id: Uuid::new_v4(),
            date: day(),
            kind: MealKind::Breakfast,
            name: "Oats, berries".into(),
            calories: 420.0,
            protein_g: Some(18.0),
            carbs_g: None,
            fat_g: None,
            logged_at: Utc::now(),
        };

        assert_eq!(export_meals(&[meal], &path).unwrap(), 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "breakfast");
        assert_eq!(&row[3], "Oats, berries");
        assert_eq!(&row[5], "18.0");
        assert_eq!(&row[6], "");
    }

    #[test]
    fn test_export_empty_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sets.csv");

        assert_eq!(export_sets(&[], &path, WeightUnit::Kg).unwrap(), 0);
        assert!(path.exists());
    }
}
