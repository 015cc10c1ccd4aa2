// Public API for the dashboard host
//
// Thin functions over a shared AppContext. The host calls these from
// its event handlers; every operation completes synchronously within
// the call. Display values come back pre-formatted.

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::calibration::{
    CalibrationMode, CalibrationPoint, CalibrationProgress, CalibrationReport, RawPointInput,
    SensorKind,
};
use crate::context::AppContext;
use crate::error::CalibrationError;

pub mod streams;
pub mod types;

pub use streams::calibration_event_stream;
pub use types::{DerivedReadout, PointRow, READOUT_PLACEHOLDER};

// Re-export error code constants for the host
pub use crate::error::CalibrationErrorCodes;

/// Global AppContext instance - single dependency injection container
///
/// All calibration state lives here; every per-sensor session is owned
/// by this one context rather than ad-hoc globals.
static APP_CONTEXT: Lazy<AppContext> = Lazy::new(AppContext::new);

pub(crate) fn context() -> &'static AppContext {
    &APP_CONTEXT
}

/// Get the version of the monitor core
pub fn get_version() -> Result<String> {
    Ok(env!("CARGO_PKG_VERSION").to_string())
}

/// Switch a sensor's calibration mode from a dashboard button value
///
/// `mode_value` is the button's source value (`"1"`, `"2"`, `"3"`);
/// anything else falls back to 1-point. The sensor's session resets.
pub fn set_calibration_mode(
    sensor: SensorKind,
    mode_value: &str,
) -> Result<CalibrationProgress, CalibrationError> {
    let mode = CalibrationMode::from_source_value(mode_value);
    APP_CONTEXT.calibration().set_mode(sensor, mode)
}

/// Apply one calibration point from raw operator input
pub fn apply_calibration_point(
    sensor: SensorKind,
    point_index: u32,
    input: &RawPointInput,
) -> Result<CalibrationProgress, CalibrationError> {
    APP_CONTEXT
        .calibration()
        .apply_point(sensor, point_index, input)
}

/// Run the Calibrate action, returning the formatted readout
///
/// 1-point mode passes the operator's point-1 fields in `input`; other
/// modes pass `None` and derive over the applied points.
pub fn run_calibration(
    sensor: SensorKind,
    input: Option<&RawPointInput>,
) -> Result<(DerivedReadout, CalibrationProgress), CalibrationError> {
    let manager = APP_CONTEXT.calibration();
    let (coefficients, progress) = manager.calibrate(sensor, input)?;
    let readout = DerivedReadout::from_coefficients(
        Some(coefficients),
        manager.settings().readout_decimals,
    );
    Ok((readout, progress))
}

/// Reset a sensor's readout to the `-` placeholder, keeping its points
pub fn clear_calibration_readout(sensor: SensorKind) -> Result<(), CalibrationError> {
    APP_CONTEXT.calibration().clear_readout(sensor)
}

/// Current formatted readout for a sensor
pub fn calibration_readout(sensor: SensorKind) -> Result<DerivedReadout, CalibrationError> {
    let manager = APP_CONTEXT.calibration();
    let coefficients = manager.readout(sensor)?;
    Ok(DerivedReadout::from_coefficients(
        coefficients,
        manager.settings().readout_decimals,
    ))
}

/// Captured points for a sensor, in index order
pub fn calibration_points(sensor: SensorKind) -> Result<Vec<CalibrationPoint>, CalibrationError> {
    APP_CONTEXT.calibration().points(sensor)
}

/// Calibration values table rows with per-point slope/offset
pub fn calibration_table(sensor: SensorKind) -> Result<Vec<PointRow>, CalibrationError> {
    let manager = APP_CONTEXT.calibration();
    let decimals = manager.settings().readout_decimals;
    let rows = manager
        .table(sensor)?
        .iter()
        .map(|(point, coefficients)| PointRow::new(sensor, point, *coefficients, decimals))
        .collect();
    Ok(rows)
}

/// Formatted per-point slope/offset for one table row
///
/// `None` when no point exists at that display index.
pub fn per_point_readout(
    sensor: SensorKind,
    display_index: usize,
) -> Result<Option<DerivedReadout>, CalibrationError> {
    let manager = APP_CONTEXT.calibration();
    let decimals = manager.settings().readout_decimals;
    Ok(manager
        .point_coefficients(sensor, display_index)?
        .map(|coefficients| DerivedReadout::from_coefficients(Some(coefficients), decimals)))
}

/// Capture progress for a sensor
pub fn calibration_progress(sensor: SensorKind) -> Result<CalibrationProgress, CalibrationError> {
    APP_CONTEXT.calibration().progress(sensor)
}

/// Commit the sensor's session to the values panel
pub fn commit_calibration_report(
    sensor: SensorKind,
) -> Result<CalibrationReport, CalibrationError> {
    APP_CONTEXT.calibration().commit_report(sensor)
}

/// Read back the committed values-panel report, if any
pub fn committed_calibration_report(
    sensor: SensorKind,
) -> Result<Option<CalibrationReport>, CalibrationError> {
    APP_CONTEXT.calibration().report(sensor)
}

/// DO saturation figure the dashboard should show for a capture row
pub fn default_do_saturation(mode_value: &str, point_index: u32) -> f64 {
    let mode = CalibrationMode::from_source_value(mode_value);
    APP_CONTEXT
        .calibration()
        .settings()
        .default_do_saturation(mode, point_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version().unwrap();
        assert!(!version.is_empty());
    }

    // Exercises the global context end to end on the TDS sensor; other
    // tests stay off the shared context to keep this deterministic.
    #[test]
    fn test_tds_workflow_through_api() {
        set_calibration_mode(SensorKind::TotalDissolvedSolids, "2").unwrap();

        apply_calibration_point(
            SensorKind::TotalDissolvedSolids,
            1,
            &RawPointInput::new("500", "100", "20"),
        )
        .unwrap();
        apply_calibration_point(
            SensorKind::TotalDissolvedSolids,
            2,
            &RawPointInput::new("1000", "200", "30"),
        )
        .unwrap();

        let (readout, progress) =
            run_calibration(SensorKind::TotalDissolvedSolids, None).unwrap();
        assert_eq!(readout.slope, "0.20");
        assert_eq!(readout.offset, "2.50");
        assert!(progress.is_complete());

        let table = calibration_table(SensorKind::TotalDissolvedSolids).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].primary, "500.00");

        clear_calibration_readout(SensorKind::TotalDissolvedSolids).unwrap();
        let readout = calibration_readout(SensorKind::TotalDissolvedSolids).unwrap();
        assert_eq!(readout.slope, READOUT_PLACEHOLDER);
    }
}
