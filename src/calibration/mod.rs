// Calibration module - per-sensor calibration sessions and linear fits
//
// This module owns the monitor's calibration workflow:
// 1. CalibrationSession: point capture state machine per sensor
// 2. CalibrationEngine: one session per SensorKind, all mutation routed
//    through explicit operations
// 3. fit: the slope/offset derivation rules
//
// The calibration workflow:
// 1. Pick a mode (1/2/3 points); changing it resets the session
// 2. Apply points in index order (resubmitting an index edits in place)
// 3. Calibrate to latch the aggregate slope/offset readout
// 4. Commit the session into a CalibrationReport for the values table

pub mod engine;
pub mod fit;
pub mod point;
pub mod progress;
pub mod report;
pub mod sensor;
pub mod session;
pub mod validation;

pub use engine::CalibrationEngine;
pub use point::{CalibrationPoint, Coefficients};
pub use progress::{CalibrationProgress, SessionPhase};
pub use report::{CalibrationReport, ReportedPoint};
pub use sensor::{CalibrationMode, SensorKind};
pub use session::CalibrationSession;
pub use validation::RawPointInput;
