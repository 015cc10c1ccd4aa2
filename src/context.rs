// AppContext: Dependency Injection Container
// Centralizes shared state for testability and clean architecture
//
// All per-sensor calibration state lives behind this explicit context:
// configuration plus the calibration manager, with no ambient globals
// in the core.

use crate::config::MonitorConfig;
use crate::managers::CalibrationManager;

/// AppContext: dependency injection container for the monitor core
pub struct AppContext {
    config: MonitorConfig,
    calibration: CalibrationManager,
}

impl AppContext {
    /// Create a context with configuration loaded from the bundled assets
    pub fn new() -> Self {
        Self::with_config(MonitorConfig::load())
    }

    /// Create a context from explicit configuration (tests, embedding)
    pub fn with_config(config: MonitorConfig) -> Self {
        let calibration = CalibrationManager::new(config.calibration.clone());
        Self {
            config,
            calibration,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn calibration(&self) -> &CalibrationManager {
        &self.calibration
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
