// Progress tracking for the calibration capture workflow

use serde::{Deserialize, Serialize};

/// Capture state of a calibration session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No points captured yet
    Idle,
    /// Fewer points captured than the mode requires
    Capturing,
    /// Required point count reached; updates by index are still accepted
    Complete,
}

impl SessionPhase {
    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "IDLE",
            SessionPhase::Capturing => "CAPTURING",
            SessionPhase::Complete => "COMPLETE",
        }
    }
}

/// Progress information for a sensor's calibration session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProgress {
    /// Current capture phase
    pub phase: SessionPhase,
    /// Points captured so far
    pub points_captured: usize,
    /// Points the active mode requires
    pub points_required: usize,
    /// 1-based index of the next point the UI should present
    pub current_point: u32,
}

impl CalibrationProgress {
    /// Check if the required point count has been reached
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// Check if the UI should present another capture row
    pub fn needs_more_points(&self) -> bool {
        self.points_captured < self.points_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display_names() {
        assert_eq!(SessionPhase::Idle.display_name(), "IDLE");
        assert_eq!(SessionPhase::Capturing.display_name(), "CAPTURING");
        assert_eq!(SessionPhase::Complete.display_name(), "COMPLETE");
    }

    #[test]
    fn test_progress_flags() {
        let progress = CalibrationProgress {
            phase: SessionPhase::Capturing,
            points_captured: 1,
            points_required: 3,
            current_point: 2,
        };
        assert!(!progress.is_complete());
        assert!(progress.needs_more_points());

        let progress = CalibrationProgress {
            phase: SessionPhase::Complete,
            points_captured: 3,
            points_required: 3,
            current_point: 3,
        };
        assert!(progress.is_complete());
        assert!(!progress.needs_more_points());
    }

    #[test]
    fn test_progress_serialization() {
        let progress = CalibrationProgress {
            phase: SessionPhase::Idle,
            points_captured: 0,
            points_required: 2,
            current_point: 1,
        };
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"idle\""));
        let parsed: CalibrationProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, progress);
    }
}
