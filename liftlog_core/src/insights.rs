//! Simple training and nutrition insights.

use crate::calendar::weekdays_of_week;
use crate::history::group_sessions;
use crate::{Error, MealEntry, Result, SetEntry};
use chrono::NaiveDate;
use serde::Serialize;

/// Lifetime numbers for one exercise
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExerciseSummary {
    pub exercise_id: String,
    pub sessions: usize,
    pub total_sets: usize,
    pub heaviest_kg: f64,
    /// Largest weight x reps of any single set
    pub best_set_volume_kg: f64,
    pub total_volume_kg: f64,
    pub last_performed: NaiveDate,
}

pub fn exercise_summary(sets: &[SetEntry], exercise_id: &str) -> Option<ExerciseSummary> {
    let sessions = group_sessions(sets, exercise_id);
    let last = sessions.last()?;

    let mut summary = ExerciseSummary {
        exercise_id: exercise_id.to_string(),
        sessions: sessions.len(),
        total_sets: 0,
        heaviest_kg: 0.0,
        best_set_volume_kg: 0.0,
        total_volume_kg: 0.0,
        last_performed: last.date,
    };

    for set in sets.iter().filter(|s| s.exercise_id == exercise_id) {
        let volume = set.weight_kg * set.reps as f64;
        summary.total_sets += 1;
        summary.heaviest_kg = summary.heaviest_kg.max(set.weight_kg);
        summary.best_set_volume_kg = summary.best_set_volume_kg.max(volume);
        summary.total_volume_kg += volume;
    }

    Some(summary)
}

/// Calories and macros summed over some meals
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct NutritionTotals {
    pub meals: usize,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl NutritionTotals {
    fn add(&mut self, meal: &MealEntry) {
        self.meals += 1;
        self.calories += meal.calories;
        self.protein_g += meal.protein_g.unwrap_or(0.0);
        self.carbs_g += meal.carbs_g.unwrap_or(0.0);
        self.fat_g += meal.fat_g.unwrap_or(0.0);
    }
}

pub fn daily_nutrition(meals: &[MealEntry], date: NaiveDate) -> NutritionTotals {
    let mut totals = NutritionTotals::default();
    for meal in meals.iter().filter(|m| m.date == date) {
        totals.add(meal);
    }
    totals
}

/// Totals for each weekday of the week `week_offset` weeks from today's
pub fn weekly_nutrition(
    meals: &[MealEntry],
    week_offset: i64,
    today: NaiveDate,
) -> Result<Vec<(NaiveDate, NutritionTotals)>> {
    let days = weekdays_of_week(week_offset, today).ok_or_else(|| {
        Error::InvalidDate(format!("week offset {} is out of range", week_offset))
    })?;
    Ok(days
        .into_iter()
        .map(|date| (date, daily_nutrition(meals, date)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn set(d: u32, weight_kg: f64, reps: i32) -> SetEntry {
        SetEntry {
            id: Uuid::new_v4(),
            exercise_id: "bench_press".into(),
            performed_on: day(d),
            weight_kg,
            reps,
            logged_at: Utc::now(),
        }
    }

    fn meal(d: u32, calories: f64, protein_g: Option<f64>) -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            date: day(d),
            kind: MealKind::Lunch,
            name: "Rice bowl".into(),
            calories,
            protein_g,
            carbs_g: None,
            fat_g: None,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_exercise_summary() {
        let sets = vec![set(4, 60.0, 10), set(4, 60.0, 8), set(6, 65.0, 6)];

        let summary = exercise_summary(&sets, "bench_press").unwrap();
        assert_eq!(summary.sessions, 2);
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.heaviest_kg, 65.0);
        assert_eq!(summary.best_set_volume_kg, 600.0);
        assert_eq!(summary.total_volume_kg, 600.0 + 480.0 + 390.0);
        assert_eq!(summary.last_performed, day(6));
    }

    #[test]
    fn test_exercise_summary_empty() {
        assert!(exercise_summary(&[], "bench_press").is_none());
    }

    #[test]
    fn test_daily_nutrition() {
        let meals = vec![
            meal(4, 500.0, Some(30.0)),
            meal(4, 250.0, None),
            meal(5, 900.0, Some(50.0)),
        ];

        let totals = daily_nutrition(&meals, day(4));
        assert_eq!(totals.meals, 2);
        assert_eq!(totals.calories, 750.0);
        assert_eq!(totals.protein_g, 30.0);
    }

    #[test]
    fn test_weekly_nutrition_covers_weekdays() {
        let meals = vec![meal(5, 400.0, None), meal(9, 1000.0, None)];

        let week = weekly_nutrition(&meals, 0, day(6)).unwrap();
        assert_eq!(week.len(), 5);
        assert_eq!(week[0].0, day(4));
        assert_eq!(week[1].1.calories, 400.0);
        // Saturday meals never appear in the weekday view
        let total: f64 = week.iter().map(|(_, t)| t.calories).sum();
        assert_eq!(total, 400.0);
    }

    #[test]
    fn test_weekly_nutrition_out_of_range_offset() {
        let meals = vec![meal(5, 400.0, None)];

        let result = weekly_nutrition(&meals, 20_000_000, day(6));
        assert!(matches!(result, Err(Error::InvalidDate(_))));
        assert!(weekly_nutrition(&meals, i64::MIN, day(6)).is_err());
    }
}
