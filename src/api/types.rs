//! Display-ready types handed to the dashboard.
//!
//! The host renders strings, not floats: readouts are pre-formatted to
//! the configured precision, with `-` standing in until a value exists.

use serde::{Deserialize, Serialize};

use crate::calibration::{fit, CalibrationPoint, Coefficients, SensorKind};

/// Placeholder shown before any calibration value exists
pub const READOUT_PLACEHOLDER: &str = "-";

/// Format a coefficient for display, normalizing non-finite values to 0
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, fit::sanitize(value))
}

/// Aggregate slope/offset readout as the dashboard displays it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedReadout {
    pub slope: String,
    pub offset: String,
}

impl DerivedReadout {
    /// The `-`/`-` readout shown before calibration or after Clear
    pub fn placeholder() -> Self {
        Self {
            slope: READOUT_PLACEHOLDER.to_string(),
            offset: READOUT_PLACEHOLDER.to_string(),
        }
    }

    /// Format latched coefficients, falling back to the placeholder
    pub fn from_coefficients(coefficients: Option<Coefficients>, decimals: usize) -> Self {
        match coefficients {
            Some(c) => Self {
                slope: format_value(c.slope, decimals),
                offset: format_value(c.offset, decimals),
            },
            None => Self::placeholder(),
        }
    }
}

/// One row of the calibration values table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRow {
    /// 1-based point index
    pub point_index: u32,
    /// Label for the primary value column
    pub primary_label: String,
    pub primary: String,
    pub voltage: String,
    pub temperature: String,
    pub slope: String,
    pub offset: String,
}

impl PointRow {
    pub fn new(
        sensor: SensorKind,
        point: &CalibrationPoint,
        coefficients: Coefficients,
        decimals: usize,
    ) -> Self {
        Self {
            point_index: point.index,
            primary_label: sensor.primary_label().to_string(),
            primary: format_value(point.primary_value, decimals),
            voltage: format_value(point.voltage_mv, decimals),
            temperature: format_value(point.temperature_c, decimals),
            slope: format_value(coefficients.slope, decimals),
            offset: format_value(coefficients.offset, decimals),
        }
    }
}
