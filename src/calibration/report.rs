// Committed calibration reports
//
// The dashboard's "Apply Calibration Values" action freezes the current
// session into a report: one row per displayed point with its table
// coefficients, plus the aggregate readout. Reports are serializable so
// the host can hand them to whatever storage it owns.

use serde::{Deserialize, Serialize};

use crate::calibration::point::{CalibrationPoint, Coefficients};
use crate::calibration::sensor::{CalibrationMode, SensorKind};
use crate::calibration::session::CalibrationSession;
use crate::error::CalibrationError;

/// One row of the committed calibration values table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportedPoint {
    pub point: CalibrationPoint,
    /// Table coefficients for this row (per-point rule)
    pub coefficients: Coefficients,
}

/// Frozen snapshot of a calibration session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub sensor: SensorKind,
    pub mode: CalibrationMode,
    /// Displayed rows: the last point alone in 1-point mode, every
    /// captured point otherwise
    pub points: Vec<ReportedPoint>,
    /// Aggregate readout at commit time; `None` when it had been cleared
    pub readout: Option<Coefficients>,
}

impl CalibrationReport {
    /// Snapshot a session into a report
    ///
    /// Errors when the session has no captured points, matching the
    /// calibrate-side guard.
    pub fn from_session(session: &CalibrationSession) -> Result<Self, CalibrationError> {
        let points = session.points();
        let last = points.last().ok_or(CalibrationError::NoPointsApplied)?;

        let rows = if session.mode() == CalibrationMode::OnePoint {
            // 1-point mode shows only the latest sample, with the
            // aggregate (single-point) coefficients
            let coefficients = session
                .readout()
                .or_else(|| session.derive_for_point(points.len() - 1))
                .unwrap_or(Coefficients::ZERO);
            vec![ReportedPoint {
                point: *last,
                coefficients,
            }]
        } else {
            points
                .iter()
                .enumerate()
                .map(|(display_index, point)| ReportedPoint {
                    point: *point,
                    coefficients: session
                        .derive_for_point(display_index)
                        .unwrap_or(Coefficients::ZERO),
                })
                .collect()
        };

        Ok(Self {
            sensor: session.sensor(),
            mode: session.mode(),
            points: rows,
            readout: session.readout(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_points(
        sensor: SensorKind,
        mode: CalibrationMode,
        points: &[(f64, f64, f64)],
    ) -> CalibrationSession {
        let mut session = CalibrationSession::new(sensor);
        session.set_mode(mode);
        for (i, (primary, voltage, temp)) in points.iter().enumerate() {
            session
                .submit(CalibrationPoint::new(i as u32 + 1, *primary, *voltage, *temp))
                .unwrap();
        }
        session
    }

    #[test]
    fn test_report_on_empty_session_errors() {
        let session = CalibrationSession::new(SensorKind::Ph);
        assert_eq!(
            CalibrationReport::from_session(&session).unwrap_err(),
            CalibrationError::NoPointsApplied
        );
    }

    #[test]
    fn test_one_point_report_shows_single_row() {
        let session = session_with_points(
            SensorKind::Ph,
            CalibrationMode::OnePoint,
            &[(7.0, 14.0, 25.0)],
        );
        let report = CalibrationReport::from_session(&session).unwrap();

        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].coefficients.slope, 2.0);
        assert_eq!(report.readout.unwrap().offset, 2.5);
    }

    #[test]
    fn test_multi_point_report_uses_table_rule_per_row() {
        let session = session_with_points(
            SensorKind::Ph,
            CalibrationMode::ThreePoint,
            &[
                (4.0, 100.0, 20.0),
                (5.0, 120.0, 24.0),
                (6.0, 180.0, 28.0),
            ],
        );
        let report = CalibrationReport::from_session(&session).unwrap();

        assert_eq!(report.points.len(), 3);
        // Row 0: single-point rule
        assert_eq!(report.points[0].coefficients.slope, 25.0);
        // Row 2 pairs with row 0, not row 1
        assert_eq!(report.points[2].coefficients.slope, 40.0);
    }

    #[test]
    fn test_report_serialization_roundtrip() {
        let session = session_with_points(
            SensorKind::TotalDissolvedSolids,
            CalibrationMode::TwoPoint,
            &[(500.0, 100.0, 20.0), (1000.0, 200.0, 30.0)],
        );
        let report = CalibrationReport::from_session(&session).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let parsed: CalibrationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
