//! Configuration management for dashboard-facing defaults
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling deployments to adjust calibration defaults without
//! recompilation. The values cover the DO saturation figures the
//! dashboard renders and the readout formatting precision.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calibration::CalibrationMode;

/// Complete monitor core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub calibration: CalibrationSettings,
}

/// Calibration workflow parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSettings {
    /// DO saturation figure the dashboard shows for a span point (%)
    pub do_saturation_default: f64,
    /// DO saturation figure for the low anchor of a 2-point run (%)
    pub do_saturation_low_anchor: f64,
    /// Decimal places for slope/offset readouts
    pub readout_decimals: usize,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            do_saturation_default: 100.0,
            do_saturation_low_anchor: 0.0,
            readout_decimals: 2,
        }
    }
}

impl CalibrationSettings {
    /// DO saturation figure for a given mode and 1-based point index
    ///
    /// Point 1 of a 2-point run anchors at the low figure; every other
    /// row shows the span default.
    pub fn default_do_saturation(&self, mode: CalibrationMode, point_index: u32) -> f64 {
        if mode == CalibrationMode::TwoPoint && point_index == 1 {
            self.do_saturation_low_anchor
        } else {
            self.do_saturation_default
        }
    }
}

impl Default for MonitorConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            calibration: CalibrationSettings::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from JSON file
    ///
    /// Falls back to defaults when the file is missing or malformed; the
    /// dashboard must come up either way.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the bundled assets directory
    pub fn load() -> Self {
        Self::load_from_file("assets/monitor_config.json")
    }
}
