// Error types for the hydroponic monitor core
//
// This module defines custom error types for the calibration subsystem,
// providing structured error handling with stable numeric codes suitable
// for the dashboard host.

mod calibration;

pub use calibration::{
    log_calibration_error, CalibrationError, CalibrationErrorCodes, SubmitAction,
};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling at the
/// UI boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
