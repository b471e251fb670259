#![forbid(unsafe_code)]

//! Core domain model and business logic for liftlog.
//!
//! This crate provides:
//! - Weight unit conversion (kg / lbs)
//! - Meal-day calendar rules (weekday gate, week views)
//! - Progressive overload classification
//! - Exercise catalog, session history and insights
//! - Local persistence (JSONL journals, settings, CSV export)

pub mod types;
pub mod error;
pub mod units;
pub mod calendar;
pub mod overload;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod journal;
pub mod settings;
pub mod history;
pub mod insights;
pub mod export;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use units::{convert_to_kg, convert_weight, format_in_unit, format_weight, WeightUnit};
pub use calendar::{
    can_log_meal, day_label, format_date_key, is_future_date, is_today, is_weekday,
    parse_date_key, weekdays_of_week, Clock, FixedClock, SystemClock,
};
pub use overload::{determine_status, OverloadStatus};
pub use catalog::default_catalog;
pub use config::Config;
pub use history::{overload_inputs, OverloadInputs};
pub use store::LogStore;
