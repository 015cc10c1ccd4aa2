// CalibrationEngine - owns one session per sensor
//
// Pure, synchronous, single-threaded calculator. All mutation of
// calibration state routes through these operations; there are no
// ambient globals. Thread safety is the manager layer's concern.

use std::collections::HashMap;

use tracing::debug;

use crate::calibration::point::{CalibrationPoint, Coefficients};
use crate::calibration::progress::CalibrationProgress;
use crate::calibration::report::CalibrationReport;
use crate::calibration::sensor::{CalibrationMode, SensorKind};
use crate::calibration::session::CalibrationSession;
use crate::error::CalibrationError;

/// CalibrationEngine maintains one CalibrationSession per SensorKind
///
/// Sessions are created implicitly the first time a sensor is touched
/// and live only as long as the engine. Sensors never share state, so
/// no operation on one sensor can observe another's session.
#[derive(Debug, Default)]
pub struct CalibrationEngine {
    sessions: HashMap<SensorKind, CalibrationSession>,
}

impl CalibrationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_mut(&mut self, sensor: SensorKind) -> &mut CalibrationSession {
        self.sessions
            .entry(sensor)
            .or_insert_with(|| CalibrationSession::new(sensor))
    }

    fn session(&self, sensor: SensorKind) -> Option<&CalibrationSession> {
        self.sessions.get(&sensor)
    }

    /// Switch a sensor's calibration mode, resetting its session
    pub fn set_mode(&mut self, sensor: SensorKind, mode: CalibrationMode) -> CalibrationProgress {
        let session = self.session_mut(sensor);
        session.set_mode(mode);
        debug!(
            "calibration mode for {} set to {}",
            sensor.display_name(),
            mode.display_name()
        );
        session.progress()
    }

    /// Active mode for a sensor (default when untouched)
    pub fn mode(&self, sensor: SensorKind) -> CalibrationMode {
        self.session(sensor)
            .map(|s| s.mode())
            .unwrap_or_default()
    }

    /// Submit a point: append the next index or update a tracked one
    ///
    /// Re-derives and latches the sensor's readout on success.
    pub fn submit_point(
        &mut self,
        sensor: SensorKind,
        point: CalibrationPoint,
    ) -> Result<CalibrationProgress, CalibrationError> {
        let progress = self.session_mut(sensor).submit(point)?;
        debug!(
            "captured point {} for {} ({}/{})",
            point.index,
            sensor.display_name(),
            progress.points_captured,
            progress.points_required
        );
        Ok(progress)
    }

    /// Derive and latch the aggregate readout for a sensor
    pub fn calibrate(&mut self, sensor: SensorKind) -> Result<Coefficients, CalibrationError> {
        self.session_mut(sensor).calibrate()
    }

    /// Reset a sensor's displayed readout without touching its points
    pub fn clear_readout(&mut self, sensor: SensorKind) {
        self.session_mut(sensor).clear_readout();
    }

    /// Latched readout, `None` until a submission or calibrate latches one
    pub fn readout(&self, sensor: SensorKind) -> Option<Coefficients> {
        self.session(sensor).and_then(|s| s.readout())
    }

    /// Captured points in index order
    pub fn points(&self, sensor: SensorKind) -> Vec<CalibrationPoint> {
        self.session(sensor)
            .map(|s| s.points().to_vec())
            .unwrap_or_default()
    }

    /// Capture progress for a sensor (Idle defaults when untouched)
    pub fn progress(&self, sensor: SensorKind) -> CalibrationProgress {
        self.session(sensor)
            .map(|s| s.progress())
            .unwrap_or_else(|| CalibrationSession::new(sensor).progress())
    }

    /// Per-point table coefficients by display index
    pub fn derive_for_point(
        &self,
        sensor: SensorKind,
        display_index: usize,
    ) -> Option<Coefficients> {
        self.session(sensor)
            .and_then(|s| s.derive_for_point(display_index))
    }

    /// Table rows: every captured point with its per-point coefficients
    pub fn table(&self, sensor: SensorKind) -> Vec<(CalibrationPoint, Coefficients)> {
        let Some(session) = self.session(sensor) else {
            return Vec::new();
        };
        session
            .points()
            .iter()
            .enumerate()
            .filter_map(|(display_index, point)| {
                session
                    .derive_for_point(display_index)
                    .map(|coefficients| (*point, coefficients))
            })
            .collect()
    }

    /// Freeze a sensor's session into a committed report
    pub fn build_report(&self, sensor: SensorKind) -> Result<CalibrationReport, CalibrationError> {
        let session = self
            .session(sensor)
            .ok_or(CalibrationError::NoPointsApplied)?;
        CalibrationReport::from_session(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::progress::SessionPhase;

    fn point(index: u32, primary: f64, voltage: f64, temp: f64) -> CalibrationPoint {
        CalibrationPoint::new(index, primary, voltage, temp)
    }

    #[test]
    fn test_sessions_are_created_on_first_use() {
        let engine = CalibrationEngine::new();
        let progress = engine.progress(SensorKind::Ph);
        assert_eq!(progress.phase, SessionPhase::Idle);
        assert_eq!(progress.current_point, 1);
        assert_eq!(engine.mode(SensorKind::Ph), CalibrationMode::OnePoint);
    }

    #[test]
    fn test_sensors_are_independent() {
        let mut engine = CalibrationEngine::new();
        engine.set_mode(SensorKind::Ph, CalibrationMode::TwoPoint);
        engine
            .submit_point(SensorKind::Ph, point(1, 4.0, 100.0, 20.0))
            .unwrap();

        // TDS session untouched by pH activity
        assert_eq!(
            engine.mode(SensorKind::TotalDissolvedSolids),
            CalibrationMode::OnePoint
        );
        assert!(engine.points(SensorKind::TotalDissolvedSolids).is_empty());
        assert!(engine.readout(SensorKind::TotalDissolvedSolids).is_none());
    }

    #[test]
    fn test_set_mode_resets_regardless_of_prior_state() {
        let mut engine = CalibrationEngine::new();
        for mode in [
            CalibrationMode::TwoPoint,
            CalibrationMode::ThreePoint,
            CalibrationMode::OnePoint,
        ] {
            engine
                .submit_point(SensorKind::Ph, point(1, 7.0, 14.0, 25.0))
                .unwrap();
            let progress = engine.set_mode(SensorKind::Ph, mode);
            assert_eq!(progress.phase, SessionPhase::Idle);
            assert_eq!(progress.points_captured, 0);
            assert_eq!(progress.current_point, 1);
        }
    }

    #[test]
    fn test_submit_then_readout() {
        let mut engine = CalibrationEngine::new();
        engine
            .submit_point(SensorKind::Ph, point(1, 7.0, 14.0, 25.0))
            .unwrap();

        let readout = engine.readout(SensorKind::Ph).unwrap();
        assert_eq!(readout.slope, 2.0);
        assert_eq!(readout.offset, 2.5);
    }

    #[test]
    fn test_clear_then_calibrate_restores() {
        let mut engine = CalibrationEngine::new();
        engine
            .submit_point(SensorKind::Ph, point(1, 7.0, 14.0, 25.0))
            .unwrap();
        engine.clear_readout(SensorKind::Ph);
        assert!(engine.readout(SensorKind::Ph).is_none());
        assert_eq!(engine.points(SensorKind::Ph).len(), 1);

        let coefficients = engine.calibrate(SensorKind::Ph).unwrap();
        assert_eq!(coefficients.slope, 2.0);
        assert_eq!(engine.readout(SensorKind::Ph), Some(coefficients));
    }

    #[test]
    fn test_table_matches_per_point_rule() {
        let mut engine = CalibrationEngine::new();
        engine.set_mode(SensorKind::Ph, CalibrationMode::ThreePoint);
        engine
            .submit_point(SensorKind::Ph, point(1, 4.0, 100.0, 20.0))
            .unwrap();
        engine
            .submit_point(SensorKind::Ph, point(2, 5.0, 120.0, 24.0))
            .unwrap();
        engine
            .submit_point(SensorKind::Ph, point(3, 6.0, 180.0, 28.0))
            .unwrap();

        let table = engine.table(SensorKind::Ph);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].1.slope, 25.0);
        assert_eq!(table[1].1.slope, 20.0);
        assert_eq!(table[2].1.slope, 40.0);
    }

    #[test]
    fn test_build_report_requires_points() {
        let engine = CalibrationEngine::new();
        assert_eq!(
            engine.build_report(SensorKind::Ph).unwrap_err(),
            CalibrationError::NoPointsApplied
        );
    }
}
