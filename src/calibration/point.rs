// Calibration point and derived coefficient types

use serde::{Deserialize, Serialize};

/// One captured calibration sample
///
/// The primary value's meaning depends on the sensor: buffer pH for pH
/// probes, saturation percentage for DO, standard-solution concentration
/// in ppm for TDS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// 1-based point index, unique within a session
    pub index: u32,
    /// Reference value in the sensor's primary unit
    pub primary_value: f64,
    /// Raw measured voltage in millivolts
    pub voltage_mv: f64,
    /// Measured temperature in Celsius
    pub temperature_c: f64,
}

impl CalibrationPoint {
    pub fn new(index: u32, primary_value: f64, voltage_mv: f64, temperature_c: f64) -> Self {
        Self {
            index,
            primary_value,
            voltage_mv,
            temperature_c,
        }
    }
}

/// Linear-fit coefficients mapping raw voltage to a physical unit
///
/// The offset is the temperature-derived adjustment term, not a fit
/// intercept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub slope: f64,
    pub offset: f64,
}

impl Coefficients {
    pub const ZERO: Coefficients = Coefficients {
        slope: 0.0,
        offset: 0.0,
    };

    pub fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serialization_roundtrip() {
        let point = CalibrationPoint::new(2, 7.0, 160.0, 30.0);
        let json = serde_json::to_string(&point).unwrap();
        let parsed: CalibrationPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, point);
    }

    #[test]
    fn test_zero_coefficients() {
        assert_eq!(Coefficients::ZERO.slope, 0.0);
        assert_eq!(Coefficients::ZERO.offset, 0.0);
    }
}
