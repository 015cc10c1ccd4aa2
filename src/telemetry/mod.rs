//! Telemetry surface for the calibration subsystem.

mod events;

pub use events::CalibrationEvent;
