// Hydroponic Monitor Core - Rust Calibration Engine
// Per-sensor calibration sessions, linear slope/offset fits, and
// display-ready readouts for the dashboard host

// Module declarations
pub mod api;
pub mod calibration;
pub mod config;
pub mod context;
pub mod error;
pub mod managers;
pub mod telemetry;

// Re-exports for convenience
pub use api::*;

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initialize logging for the host process
///
/// Safe to call more than once; only the first call installs the
/// subscriber.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
