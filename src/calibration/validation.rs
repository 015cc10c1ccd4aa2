// Raw input validation for calibration submissions
//
// Operator input arrives from the dashboard as strings. Completeness is
// checked before parsing; parsing itself never fails, it falls back to 0
// for unparsable text so a capture row always yields a point.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, SubmitAction};

/// One calibration point as typed by the operator
///
/// `primary` is `None` when the dashboard supplies the value itself (the
/// DO saturation figure is a fixed readout, not an input field). Fields
/// are explicit; nothing is inferred from UI markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPointInput {
    /// Reference value as typed, or `None` for a UI-supplied value
    pub primary: Option<String>,
    /// Measured voltage in millivolts, as typed
    pub voltage: String,
    /// Temperature in Celsius, as typed
    pub temperature: String,
}

impl RawPointInput {
    /// Input with an operator-typed primary value (pH, TDS)
    pub fn new(
        primary: impl Into<String>,
        voltage: impl Into<String>,
        temperature: impl Into<String>,
    ) -> Self {
        Self {
            primary: Some(primary.into()),
            voltage: voltage.into(),
            temperature: temperature.into(),
        }
    }

    /// Input whose primary value the dashboard supplies (DO saturation)
    pub fn fixed_primary(voltage: impl Into<String>, temperature: impl Into<String>) -> Self {
        Self {
            primary: None,
            voltage: voltage.into(),
            temperature: temperature.into(),
        }
    }

    /// Check that every operator-editable field is non-blank
    pub fn ensure_complete(&self, action: SubmitAction) -> Result<(), CalibrationError> {
        let mut all_filled = !self.voltage.trim().is_empty() && !self.temperature.trim().is_empty();
        if let Some(primary) = &self.primary {
            all_filled = all_filled && !primary.trim().is_empty();
        }

        if all_filled {
            Ok(())
        } else {
            Err(CalibrationError::MissingValues { action })
        }
    }

    /// Parse into numeric fields, substituting `fallback_primary` when the
    /// primary value is UI-supplied
    pub fn parse(&self, fallback_primary: f64) -> (f64, f64, f64) {
        let primary = match &self.primary {
            Some(raw) => parse_or_zero(raw),
            None => fallback_primary,
        };
        (
            primary,
            parse_or_zero(&self.voltage),
            parse_or_zero(&self.temperature),
        )
    }
}

/// Parse a raw numeric field, defaulting to 0 when unparsable
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}
