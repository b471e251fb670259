//! Weight unit conversion.
//!
//! Weights are always stored in kilograms. Conversion to and from pounds
//! rounds to one decimal place in both directions, so a kg -> lbs -> kg
//! round trip can drift by up to 0.1 kg.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// A supported weight unit
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lbs),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

/// Round half-up at the tenths digit
///
/// Shared by both conversion directions so they always agree.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Convert a weight stored in kilograms to `target`
pub fn convert_weight(value_kg: f64, target: WeightUnit) -> f64 {
    match target {
        WeightUnit::Kg => value_kg,
        WeightUnit::Lbs => round_to_tenth(value_kg * LBS_PER_KG),
    }
}

/// Convert a weight entered in `source` units to kilograms
pub fn convert_to_kg(value: f64, source: WeightUnit) -> f64 {
    match source {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => round_to_tenth(value / LBS_PER_KG),
    }
}

/// Render a stored kg weight for display, e.g. `"220.5 lbs"`
pub fn format_weight(value_kg: f64, unit: WeightUnit) -> String {
    format_in_unit(convert_weight(value_kg, unit), unit)
}

/// Render a value already expressed in `unit`; whole numbers drop the decimal
pub fn format_in_unit(value: f64, unit: WeightUnit) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kg_is_identity() {
        for w in [0.0, 1.0, 42.5, 100.0, 182.37] {
            assert_eq!(convert_weight(w, WeightUnit::Kg), w);
            assert_eq!(convert_to_kg(w, WeightUnit::Kg), w);
        }
    }

    #[test]
    fn test_zero_converts_to_zero() {
        assert_eq!(convert_weight(0.0, WeightUnit::Lbs), 0.0);
        assert_eq!(convert_to_kg(0.0, WeightUnit::Lbs), 0.0);
    }

    #[test]
    fn test_kg_to_lbs() {
        assert_eq!(convert_weight(100.0, WeightUnit::Lbs), 220.5);
        assert_eq!(convert_weight(1.0, WeightUnit::Lbs), 2.2);
        assert_eq!(convert_weight(45.0, WeightUnit::Lbs), 99.2);
    }

    #[test]
    fn test_lbs_to_kg() {
        assert_eq!(convert_to_kg(220.5, WeightUnit::Lbs), 100.0);
        assert_eq!(convert_to_kg(2.2, WeightUnit::Lbs), 1.0);
        assert_eq!(convert_to_kg(100.0, WeightUnit::Lbs), 45.4);
    }

    #[test]
    fn test_round_trip_is_close() {
        for w in [2.5, 17.3, 60.0, 83.7, 140.0] {
            let back = convert_to_kg(convert_weight(w, WeightUnit::Lbs), WeightUnit::Lbs);
            assert!((back - w).abs() <= 0.1 + 1e-9, "{} came back as {}", w, back);
        }
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert_eq!(convert_weight(-10.0, WeightUnit::Lbs), -22.0);
        assert_eq!(convert_weight(-10.0, WeightUnit::Kg), -10.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_tenth(1.25), 1.3);
        assert_eq!(round_to_tenth(1.24), 1.2);
        assert_eq!(round_to_tenth(-1.25), -1.2);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("lb".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert!(matches!(
            "stone".parse::<WeightUnit>(),
            Err(Error::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(100.0, WeightUnit::Lbs), "220.5 lbs");
        assert_eq!(format_weight(60.0, WeightUnit::Kg), "60 kg");
        assert_eq!(format_weight(62.5, WeightUnit::Kg), "62.5 kg");
    }

    #[test]
    fn test_format_in_unit_keeps_entered_value() {
        // 225 lbs is stored as 102.1 kg, which reads back as 225.1 lbs
        let stored = convert_to_kg(225.0, WeightUnit::Lbs);
        assert_eq!(format_weight(stored, WeightUnit::Lbs), "225.1 lbs");
        assert_eq!(format_in_unit(225.0, WeightUnit::Lbs), "225 lbs");
        assert_eq!(format_in_unit(102.5, WeightUnit::Kg), "102.5 kg");
    }
}
