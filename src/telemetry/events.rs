//! Core telemetry event types describing calibration lifecycle data
//! exposed to the dashboard's diagnostics surfaces and event streams.

use serde::{Deserialize, Serialize};

use crate::calibration::{CalibrationMode, SensorKind, SessionPhase};

/// Calibration lifecycle events broadcast to UI subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CalibrationEvent {
    ModeChanged {
        sensor: SensorKind,
        mode: CalibrationMode,
    },
    PointCaptured {
        sensor: SensorKind,
        point_index: u32,
        phase: SessionPhase,
    },
    ReadoutUpdated {
        sensor: SensorKind,
        slope: f64,
        offset: f64,
    },
    ReadoutCleared {
        sensor: SensorKind,
    },
    ReportCommitted {
        sensor: SensorKind,
        point_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_shape() {
        let event = CalibrationEvent::ReadoutUpdated {
            sensor: SensorKind::Ph,
            slope: 2.0,
            offset: 2.5,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"readout_updated\""));
        assert!(json.contains("\"payload\""));
        assert!(json.contains("\"ph\""));
    }

    #[test]
    fn test_event_roundtrip() {
        let event = CalibrationEvent::PointCaptured {
            sensor: SensorKind::TotalDissolvedSolids,
            point_index: 2,
            phase: SessionPhase::Complete,
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: CalibrationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
