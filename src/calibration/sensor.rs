// Sensor and mode enumerations for the calibration workflow

use serde::{Deserialize, Serialize};

/// Water-quality sensor being calibrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// pH probe, calibrated against buffer solutions
    Ph,
    /// Dissolved oxygen probe, calibrated against saturation percentage
    DissolvedOxygen,
    /// Total dissolved solids probe, calibrated against a standard solution
    TotalDissolvedSolids,
}

impl SensorKind {
    /// All sensors, in dashboard tab order
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Ph,
        SensorKind::DissolvedOxygen,
        SensorKind::TotalDissolvedSolids,
    ];

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::Ph => "pH",
            SensorKind::DissolvedOxygen => "DO",
            SensorKind::TotalDissolvedSolids => "TDS",
        }
    }

    /// Label for the sensor's primary calibration value
    pub fn primary_label(&self) -> &'static str {
        match self {
            SensorKind::Ph => "Buffer Solution Value (pH)",
            SensorKind::DissolvedOxygen => "DO Saturation (%)",
            SensorKind::TotalDissolvedSolids => "Standard Solution (ppm)",
        }
    }

    /// Unit of the sensor's primary calibration value
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Ph => "pH",
            SensorKind::DissolvedOxygen => "%",
            SensorKind::TotalDissolvedSolids => "ppm",
        }
    }

    /// Whether the operator types the primary value
    ///
    /// The DO saturation figure is supplied by the dashboard itself, not
    /// entered into an input field.
    pub fn operator_enters_primary(&self) -> bool {
        !matches!(self, SensorKind::DissolvedOxygen)
    }
}

/// Number of calibration points a session must capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationMode {
    OnePoint,
    TwoPoint,
    ThreePoint,
}

impl CalibrationMode {
    /// Points required before the session is complete
    pub fn required_points(&self) -> usize {
        match self {
            CalibrationMode::OnePoint => 1,
            CalibrationMode::TwoPoint => 2,
            CalibrationMode::ThreePoint => 3,
        }
    }

    /// Source value used by the dashboard mode buttons
    pub fn as_source_value(&self) -> &'static str {
        match self {
            CalibrationMode::OnePoint => "1",
            CalibrationMode::TwoPoint => "2",
            CalibrationMode::ThreePoint => "3",
        }
    }

    /// Parse a dashboard mode button value
    ///
    /// Unknown values fall back to `OnePoint`, the mode every sensor
    /// opens in.
    pub fn from_source_value(value: &str) -> CalibrationMode {
        match value.trim() {
            "2" => CalibrationMode::TwoPoint,
            "3" => CalibrationMode::ThreePoint,
            _ => CalibrationMode::OnePoint,
        }
    }

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CalibrationMode::OnePoint => "1-Point",
            CalibrationMode::TwoPoint => "2-Point",
            CalibrationMode::ThreePoint => "3-Point",
        }
    }
}

impl Default for CalibrationMode {
    /// The dashboard opens every sensor in 1-point mode
    fn default() -> Self {
        CalibrationMode::OnePoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_points() {
        assert_eq!(CalibrationMode::OnePoint.required_points(), 1);
        assert_eq!(CalibrationMode::TwoPoint.required_points(), 2);
        assert_eq!(CalibrationMode::ThreePoint.required_points(), 3);
    }

    #[test]
    fn test_source_value_roundtrip() {
        for mode in [
            CalibrationMode::OnePoint,
            CalibrationMode::TwoPoint,
            CalibrationMode::ThreePoint,
        ] {
            assert_eq!(
                CalibrationMode::from_source_value(mode.as_source_value()),
                mode
            );
        }
    }

    #[test]
    fn test_unknown_source_value_falls_back_to_one_point() {
        assert_eq!(
            CalibrationMode::from_source_value(""),
            CalibrationMode::OnePoint
        );
        assert_eq!(
            CalibrationMode::from_source_value("7"),
            CalibrationMode::OnePoint
        );
    }

    #[test]
    fn test_sensor_labels() {
        assert_eq!(SensorKind::Ph.display_name(), "pH");
        assert_eq!(SensorKind::DissolvedOxygen.unit(), "%");
        assert_eq!(
            SensorKind::TotalDissolvedSolids.primary_label(),
            "Standard Solution (ppm)"
        );
    }

    #[test]
    fn test_only_do_has_fixed_primary() {
        assert!(SensorKind::Ph.operator_enters_primary());
        assert!(SensorKind::TotalDissolvedSolids.operator_enters_primary());
        assert!(!SensorKind::DissolvedOxygen.operator_enters_primary());
    }
}
