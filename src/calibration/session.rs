// CalibrationSession - per-sensor capture state machine
//
// A session moves Idle -> Capturing -> Complete as points arrive. Points
// are appended in strict index order; resubmitting a tracked index
// replaces that point in place. The only point-count-reducing transition
// is a mode change, which resets the whole session.

use serde::{Deserialize, Serialize};

use crate::calibration::fit;
use crate::calibration::point::{CalibrationPoint, Coefficients};
use crate::calibration::progress::{CalibrationProgress, SessionPhase};
use crate::calibration::sensor::{CalibrationMode, SensorKind};
use crate::error::CalibrationError;

/// CalibrationSession tracks one sensor's capture workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSession {
    sensor: SensorKind,
    mode: CalibrationMode,
    /// Captured points, ascending by index
    points: Vec<CalibrationPoint>,
    /// 1-based index of the next point to present for capture
    current_point: u32,
    /// Latched display coefficients; `None` renders as `-`
    readout: Option<Coefficients>,
}

impl CalibrationSession {
    /// Create a fresh session in the dashboard's default 1-point mode
    pub fn new(sensor: SensorKind) -> Self {
        Self {
            sensor,
            mode: CalibrationMode::default(),
            points: Vec::new(),
            current_point: 1,
            readout: None,
        }
    }

    pub fn sensor(&self) -> SensorKind {
        self.sensor
    }

    pub fn mode(&self) -> CalibrationMode {
        self.mode
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn current_point(&self) -> u32 {
        self.current_point
    }

    pub fn readout(&self) -> Option<Coefficients> {
        self.readout
    }

    /// Capture phase derived from point count vs the mode's requirement
    pub fn phase(&self) -> SessionPhase {
        if self.points.is_empty() {
            SessionPhase::Idle
        } else if self.points.len() < self.mode.required_points() {
            SessionPhase::Capturing
        } else {
            SessionPhase::Complete
        }
    }

    pub fn progress(&self) -> CalibrationProgress {
        CalibrationProgress {
            phase: self.phase(),
            points_captured: self.points.len(),
            points_required: self.mode.required_points(),
            current_point: self.current_point,
        }
    }

    /// Switch calibration mode, resetting the whole session
    ///
    /// Always succeeds; capture restarts at point 1 with no readout.
    pub fn set_mode(&mut self, mode: CalibrationMode) {
        self.mode = mode;
        self.points.clear();
        self.current_point = 1;
        self.readout = None;
    }

    /// Submit a point: update a tracked index or append the next one
    ///
    /// Appending the latest point advances `current_point` while the mode
    /// still needs more; updates leave it alone, so a Complete session
    /// stays Complete through an edit. Re-derives the readout on success.
    pub fn submit(&mut self, point: CalibrationPoint) -> Result<CalibrationProgress, CalibrationError> {
        if let Some(existing) = self.points.iter_mut().find(|p| p.index == point.index) {
            *existing = point;
        } else {
            let next_index = self.points.len() as u32 + 1;
            if point.index != next_index {
                return Err(CalibrationError::PointOutOfSequence {
                    expected: next_index,
                    got: point.index,
                });
            }
            self.points.push(point);
            if self.points.len() < self.mode.required_points() {
                self.current_point = point.index + 1;
            }
        }

        self.readout = fit::derive(self.sensor, self.mode, &self.points);
        Ok(self.progress())
    }

    /// Derive and latch the aggregate readout
    ///
    /// Errors when nothing has been applied yet; the dashboard surfaces
    /// that as a validation modal rather than a blank readout.
    pub fn calibrate(&mut self) -> Result<Coefficients, CalibrationError> {
        let coefficients = fit::derive(self.sensor, self.mode, &self.points)
            .ok_or(CalibrationError::NoPointsApplied)?;
        self.readout = Some(coefficients);
        Ok(coefficients)
    }

    /// Reset the displayed readout to the `-` placeholder
    ///
    /// Captured points survive; this is the Clear button, not a mode reset.
    pub fn clear_readout(&mut self) {
        self.readout = None;
    }

    /// Per-point coefficients for the calibration values table
    pub fn derive_for_point(&self, display_index: usize) -> Option<Coefficients> {
        fit::derive_for_point(self.sensor, &self.points, display_index)
    }
}
