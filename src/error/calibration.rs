// Calibration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration error code constants exposed to the dashboard host
///
/// These constants provide a single source of truth for error codes
/// shared between the core and the UI layer.
///
/// Error code range: 2101-2104
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// Required input fields were blank at a submission boundary
    pub const MISSING_VALUES: i32 = 2101;

    /// Calibrate was requested before any point was applied
    pub const NO_POINTS_APPLIED: i32 = 2102;

    /// Submitted point index is neither tracked nor next in sequence
    pub const POINT_OUT_OF_SEQUENCE: i32 = 2103;

    /// Calibration engine lock was poisoned
    pub const STATE_POISONED: i32 = 2104;
}

/// The submission boundary a validation failure occurred at
///
/// The dashboard phrases the operator-facing message differently for
/// the per-point "Apply" button and the final "Calibrate" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    Apply,
    Calibrate,
}

impl SubmitAction {
    /// Verb used in the operator-facing validation message
    pub fn verb(&self) -> &'static str {
        match self {
            SubmitAction::Apply => "applying",
            SubmitAction::Calibrate => "calibrating",
        }
    }
}

/// Log a calibration error with structured context
///
/// Logs calibration errors with the numeric error code, the component,
/// and the operation context so host-side diagnostics can correlate them.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationEngine, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// These errors cover point submission, readout derivation, and shared
/// state management. Arithmetic degeneracy (zero denominators) is NOT an
/// error anywhere in the subsystem; it produces a defined 0 fallback.
///
/// Error code range: 2101-2104
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Required input fields were blank at a submission boundary
    MissingValues { action: SubmitAction },

    /// Calibrate was requested on a session with no captured points
    NoPointsApplied,

    /// Submitted point index is neither an update nor the next append slot
    PointOutOfSequence { expected: u32, got: u32 },

    /// Calibration engine lock was poisoned
    StatePoisoned,
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::MissingValues { .. } => CalibrationErrorCodes::MISSING_VALUES,
            CalibrationError::NoPointsApplied => CalibrationErrorCodes::NO_POINTS_APPLIED,
            CalibrationError::PointOutOfSequence { .. } => {
                CalibrationErrorCodes::POINT_OUT_OF_SEQUENCE
            }
            CalibrationError::StatePoisoned => CalibrationErrorCodes::STATE_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::MissingValues { action } => {
                format!("Please fill in all values before {}.", action.verb())
            }
            CalibrationError::NoPointsApplied => {
                "Please apply values before calibrating.".to_string()
            }
            CalibrationError::PointOutOfSequence { expected, got } => {
                format!("Point {} is out of sequence: expected point {}", got, expected)
            }
            CalibrationError::StatePoisoned => "Calibration state lock poisoned".to_string(),
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_error_codes() {
        assert_eq!(
            CalibrationError::MissingValues {
                action: SubmitAction::Apply
            }
            .code(),
            CalibrationErrorCodes::MISSING_VALUES
        );
        assert_eq!(
            CalibrationError::NoPointsApplied.code(),
            CalibrationErrorCodes::NO_POINTS_APPLIED
        );
        assert_eq!(
            CalibrationError::PointOutOfSequence {
                expected: 2,
                got: 4
            }
            .code(),
            CalibrationErrorCodes::POINT_OUT_OF_SEQUENCE
        );
        assert_eq!(
            CalibrationError::StatePoisoned.code(),
            CalibrationErrorCodes::STATE_POISONED
        );
    }

    #[test]
    fn test_validation_messages_match_dashboard_wording() {
        let err = CalibrationError::MissingValues {
            action: SubmitAction::Apply,
        };
        assert_eq!(err.message(), "Please fill in all values before applying.");

        let err = CalibrationError::MissingValues {
            action: SubmitAction::Calibrate,
        };
        assert_eq!(
            err.message(),
            "Please fill in all values before calibrating."
        );

        let err = CalibrationError::NoPointsApplied;
        assert_eq!(err.message(), "Please apply values before calibrating.");
    }

    #[test]
    fn test_out_of_sequence_message() {
        let err = CalibrationError::PointOutOfSequence {
            expected: 2,
            got: 5,
        };
        assert!(err.message().contains("5"));
        assert!(err.message().contains("expected point 2"));
    }

    #[test]
    fn test_calibration_error_display() {
        let err = CalibrationError::NoPointsApplied;
        let display = format!("{}", err);
        assert!(display.contains("CalibrationError"));
        assert!(display.contains(&err.code().to_string()));
    }
}
