//! Meal-day calendar rules.
//!
//! Meals can only be logged Monday through Friday, and never for a date
//! after today. Every function that needs "now" takes `today` explicitly;
//! use a [`Clock`] to obtain it.

use crate::{Error, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use std::fmt;

/// Canonical key format for a day's meal log
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock on every call
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Monday through Friday
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Zero-padded `YYYY-MM-DD`
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key back into a date
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{:?}: {}", key, e)))
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Strictly after today; today itself is never in the future
pub fn is_future_date(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

/// Why a date is closed for meal logging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MealLogBlock {
    Weekend,
    Future,
}

impl fmt::Display for MealLogBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealLogBlock::Weekend => write!(f, "meals are only logged on weekdays"),
            MealLogBlock::Future => write!(f, "date is in the future"),
        }
    }
}

/// The rule that closes `date` for logging, if any
///
/// Weekend is reported before future when both apply.
pub fn meal_log_block(date: NaiveDate, today: NaiveDate) -> Option<MealLogBlock> {
    if !is_weekday(date) {
        Some(MealLogBlock::Weekend)
    } else if is_future_date(date, today) {
        Some(MealLogBlock::Future)
    } else {
        None
    }
}

/// Weekday gate: past and present weekdays only
pub fn can_log_meal(date: NaiveDate, today: NaiveDate) -> bool {
    is_weekday(date) && !is_future_date(date, today)
}

/// Monday through Friday of the week `week_offset` weeks from today's week
///
/// A Sunday belongs to the week that started six days earlier. Returns
/// `None` when the week falls outside the representable date range.
pub fn weekdays_of_week(week_offset: i64, today: NaiveDate) -> Option<[NaiveDate; 5]> {
    let since_monday = today.weekday().num_days_from_monday() as i64;
    let shift = week_offset.checked_mul(7)?.checked_sub(since_monday)?;
    let monday = today.checked_add_signed(Duration::try_days(shift)?)?;

    let mut days = [monday; 5];
    for (i, day) in days.iter_mut().enumerate().skip(1) {
        *day = monday.checked_add_signed(Duration::days(i as i64))?;
    }
    Some(days)
}

/// Abbreviated English weekday name, for display only
pub fn day_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
