// Slope/offset derivation rules
//
// Two fit rules cover every session shape:
// 1. Single-point: ratio of voltage to reference value, temperature / 10
//    as the offset term.
// 2. Spanning: voltage delta over value delta between two points, mean
//    temperature / 10 as the offset term.
//
// Zero denominators and zero operands produce a defined 0 result, never
// an error. Non-finite intermediate values are normalized to 0 so the
// dashboard always has a printable number.

use crate::calibration::point::{CalibrationPoint, Coefficients};
use crate::calibration::sensor::{CalibrationMode, SensorKind};

/// Replace NaN/infinity with 0 so every result is displayable
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Single-point rule: fit derived from one captured sample
///
/// TDS guards the ratio only on the voltage; pH and DO require both
/// operands to be non-zero.
pub fn single_point(sensor: SensorKind, point: &CalibrationPoint) -> Coefficients {
    let slope = match sensor {
        SensorKind::TotalDissolvedSolids => {
            if point.voltage_mv != 0.0 {
                point.voltage_mv / point.primary_value
            } else {
                0.0
            }
        }
        SensorKind::Ph | SensorKind::DissolvedOxygen => {
            if point.voltage_mv != 0.0 && point.primary_value != 0.0 {
                point.voltage_mv / point.primary_value
            } else {
                0.0
            }
        }
    };

    let offset = if point.temperature_c != 0.0 {
        point.temperature_c / 10.0
    } else {
        0.0
    };

    Coefficients::new(sanitize(slope), sanitize(offset))
}

/// Spanning rule: fit between two points with an averaged temperature term
///
/// `mean_temperature` is the average over whichever points the caller is
/// spanning: all captured points for the aggregate readout, the two
/// endpoints for a per-point table row.
pub fn spanning(
    first: &CalibrationPoint,
    last: &CalibrationPoint,
    mean_temperature: f64,
) -> Coefficients {
    let value_delta = last.primary_value - first.primary_value;
    let voltage_delta = last.voltage_mv - first.voltage_mv;

    let slope = if value_delta != 0.0 {
        voltage_delta / value_delta
    } else {
        0.0
    };

    Coefficients::new(sanitize(slope), sanitize(mean_temperature / 10.0))
}

/// Aggregate fit over a session's captured points
///
/// Returns `None` only when no points exist (the dashboard shows `-`).
/// A single captured point, or 1-point mode regardless of capture count,
/// uses the single-point rule on the LAST point; otherwise the spanning
/// rule runs from the first point to the last with the mean temperature
/// over all points.
pub fn derive(
    sensor: SensorKind,
    mode: CalibrationMode,
    points: &[CalibrationPoint],
) -> Option<Coefficients> {
    let last = points.last()?;

    if mode == CalibrationMode::OnePoint || points.len() == 1 {
        return Some(single_point(sensor, last));
    }

    let first = &points[0];
    let mean_temperature =
        points.iter().map(|p| p.temperature_c).sum::<f64>() / points.len() as f64;

    Some(spanning(first, last, mean_temperature))
}

/// Per-point fit for the calibration values table
///
/// Display index 0 gets the single-point rule on that point alone. Every
/// later row spans from the FIRST captured point to that row's point,
/// with the offset averaged over just those two temperatures. The pairing
/// is always back to the first point, never the immediate predecessor.
pub fn derive_for_point(
    sensor: SensorKind,
    points: &[CalibrationPoint],
    display_index: usize,
) -> Option<Coefficients> {
    let point = points.get(display_index)?;

    if display_index == 0 {
        return Some(single_point(sensor, point));
    }

    let first = &points[0];
    let mean_temperature = (first.temperature_c + point.temperature_c) / 2.0;

    Some(spanning(first, point, mean_temperature))
}
