// CalibrationManager: Focused manager for the calibration workflow
//
// Single Responsibility: calibration session and report management
//
// The engine itself is a single-threaded calculator; this manager wraps
// it for a host that calls in from UI threads or an async runtime:
// - Raw-input validation at the Apply/Calibrate boundaries
// - Engine access behind a Mutex, committed reports behind a RwLock
// - Lifecycle event broadcast for UI subscribers
// - Structured error logging with operation context

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;

use crate::calibration::{
    CalibrationEngine, CalibrationMode, CalibrationPoint, CalibrationProgress, CalibrationReport,
    Coefficients, RawPointInput, SensorKind,
};
use crate::config::CalibrationSettings;
use crate::error::{log_calibration_error, CalibrationError, SubmitAction};
use crate::telemetry::CalibrationEvent;

/// Broadcast capacity for calibration lifecycle events
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Manages calibration workflow, readouts, and committed reports
///
/// # Example
/// ```ignore
/// let manager = CalibrationManager::default();
/// manager.set_mode(SensorKind::Ph, CalibrationMode::TwoPoint)?;
/// manager.apply_point(SensorKind::Ph, 1, &RawPointInput::new("4", "100", "20"))?;
/// manager.apply_point(SensorKind::Ph, 2, &RawPointInput::new("7", "160", "30"))?;
/// let (coefficients, _) = manager.calibrate(SensorKind::Ph, None)?;
/// ```
pub struct CalibrationManager {
    engine: Arc<Mutex<CalibrationEngine>>,
    reports: Arc<RwLock<HashMap<SensorKind, CalibrationReport>>>,
    events: broadcast::Sender<CalibrationEvent>,
    settings: CalibrationSettings,
}

impl CalibrationManager {
    /// Create a new CalibrationManager with the given settings
    pub fn new(settings: CalibrationSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(CalibrationEngine::new())),
            reports: Arc::new(RwLock::new(HashMap::new())),
            events,
            settings,
        }
    }

    /// Subscribe to calibration lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<CalibrationEvent> {
        self.events.subscribe()
    }

    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    /// Switch a sensor's calibration mode
    ///
    /// Resets the sensor's session: points cleared, capture restarts at
    /// point 1, readout back to the placeholder.
    pub fn set_mode(
        &self,
        sensor: SensorKind,
        mode: CalibrationMode,
    ) -> Result<CalibrationProgress, CalibrationError> {
        let mut engine = self.lock_engine()?;
        let progress = engine.set_mode(sensor, mode);
        self.emit(CalibrationEvent::ModeChanged { sensor, mode });
        Ok(progress)
    }

    /// Apply one calibration point from raw operator input
    ///
    /// Completeness is enforced here for multi-point modes; 1-point mode
    /// defers the check to [`calibrate`](Self::calibrate). The parsed
    /// point is appended or, for a tracked index, replaces the prior
    /// capture (the Edit toggle resubmits this way).
    ///
    /// # Errors
    /// - `MissingValues` when a required field is blank
    /// - `PointOutOfSequence` when the index is neither tracked nor next
    /// - `StatePoisoned` on lock poisoning
    pub fn apply_point(
        &self,
        sensor: SensorKind,
        point_index: u32,
        input: &RawPointInput,
    ) -> Result<CalibrationProgress, CalibrationError> {
        let mut engine = self.lock_engine()?;
        let mode = engine.mode(sensor);

        if mode != CalibrationMode::OnePoint {
            input
                .ensure_complete(SubmitAction::Apply)
                .inspect_err(|err| log_calibration_error(err, "apply_point"))?;
        }

        let point = self.parse_point(sensor, mode, point_index, input);
        let progress = engine
            .submit_point(sensor, point)
            .inspect_err(|err| log_calibration_error(err, "apply_point"))?;

        self.emit(CalibrationEvent::PointCaptured {
            sensor,
            point_index,
            phase: progress.phase,
        });
        if let Some(readout) = engine.readout(sensor) {
            self.emit(CalibrationEvent::ReadoutUpdated {
                sensor,
                slope: readout.slope,
                offset: readout.offset,
            });
        }

        Ok(progress)
    }

    /// Run the Calibrate action for a sensor
    ///
    /// In 1-point mode the operator's point-1 fields come in with the
    /// request and replace whatever the session held; other modes derive
    /// over the points already applied. Latches and returns the readout
    /// plus post-derivation progress.
    ///
    /// # Errors
    /// - `MissingValues` in 1-point mode when fields are blank or absent
    /// - `NoPointsApplied` in multi-point modes with an empty session
    /// - `StatePoisoned` on lock poisoning
    pub fn calibrate(
        &self,
        sensor: SensorKind,
        input: Option<&RawPointInput>,
    ) -> Result<(Coefficients, CalibrationProgress), CalibrationError> {
        let mut engine = self.lock_engine()?;
        let mode = engine.mode(sensor);

        if mode == CalibrationMode::OnePoint {
            let input = input.ok_or(CalibrationError::MissingValues {
                action: SubmitAction::Calibrate,
            })?;
            input
                .ensure_complete(SubmitAction::Calibrate)
                .inspect_err(|err| log_calibration_error(err, "calibrate"))?;

            let point = self.parse_point(sensor, mode, 1, input);
            engine
                .submit_point(sensor, point)
                .inspect_err(|err| log_calibration_error(err, "calibrate"))?;
        }

        let coefficients = engine
            .calibrate(sensor)
            .inspect_err(|err| log_calibration_error(err, "calibrate"))?;

        self.emit(CalibrationEvent::ReadoutUpdated {
            sensor,
            slope: coefficients.slope,
            offset: coefficients.offset,
        });

        Ok((coefficients, engine.progress(sensor)))
    }

    /// Reset a sensor's displayed readout without touching its points
    pub fn clear_readout(&self, sensor: SensorKind) -> Result<(), CalibrationError> {
        let mut engine = self.lock_engine()?;
        engine.clear_readout(sensor);
        self.emit(CalibrationEvent::ReadoutCleared { sensor });
        Ok(())
    }

    /// Latched readout for a sensor, `None` while the placeholder shows
    pub fn readout(&self, sensor: SensorKind) -> Result<Option<Coefficients>, CalibrationError> {
        Ok(self.lock_engine()?.readout(sensor))
    }

    /// Captured points in index order
    pub fn points(&self, sensor: SensorKind) -> Result<Vec<CalibrationPoint>, CalibrationError> {
        Ok(self.lock_engine()?.points(sensor))
    }

    /// Table rows with per-point coefficients
    pub fn table(
        &self,
        sensor: SensorKind,
    ) -> Result<Vec<(CalibrationPoint, Coefficients)>, CalibrationError> {
        Ok(self.lock_engine()?.table(sensor))
    }

    /// Per-point table coefficients for one display index
    pub fn point_coefficients(
        &self,
        sensor: SensorKind,
        display_index: usize,
    ) -> Result<Option<Coefficients>, CalibrationError> {
        Ok(self.lock_engine()?.derive_for_point(sensor, display_index))
    }

    /// Capture progress for a sensor
    pub fn progress(&self, sensor: SensorKind) -> Result<CalibrationProgress, CalibrationError> {
        Ok(self.lock_engine()?.progress(sensor))
    }

    /// Active calibration mode for a sensor
    pub fn mode(&self, sensor: SensorKind) -> Result<CalibrationMode, CalibrationError> {
        Ok(self.lock_engine()?.mode(sensor))
    }

    /// Freeze the sensor's session into the committed report store
    ///
    /// The committed report is what the dashboard's values panel shows
    /// until the next commit overwrites it.
    pub fn commit_report(&self, sensor: SensorKind) -> Result<CalibrationReport, CalibrationError> {
        let report = {
            let engine = self.lock_engine()?;
            engine
                .build_report(sensor)
                .inspect_err(|err| log_calibration_error(err, "commit_report"))?
        };

        let mut reports = self.write_reports()?;
        reports.insert(sensor, report.clone());

        self.emit(CalibrationEvent::ReportCommitted {
            sensor,
            point_count: report.points.len(),
        });

        Ok(report)
    }

    /// Read back the committed report for a sensor
    pub fn report(&self, sensor: SensorKind) -> Result<Option<CalibrationReport>, CalibrationError> {
        let reports = self.read_reports()?;
        Ok(reports.get(&sensor).cloned())
    }

    // ========================================================================
    // HELPER METHODS - Lock management, parsing, event emission
    // ========================================================================

    /// Safely acquire the engine lock
    fn lock_engine(&self) -> Result<std::sync::MutexGuard<'_, CalibrationEngine>, CalibrationError> {
        self.engine.lock().map_err(|_| {
            let err = CalibrationError::StatePoisoned;
            log_calibration_error(&err, "lock_engine");
            err
        })
    }

    /// Safely acquire a read lock on the report store
    fn read_reports(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<SensorKind, CalibrationReport>>, CalibrationError>
    {
        self.reports
            .read()
            .map_err(|_| CalibrationError::StatePoisoned)
    }

    /// Safely acquire a write lock on the report store
    fn write_reports(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<SensorKind, CalibrationReport>>, CalibrationError>
    {
        self.reports
            .write()
            .map_err(|_| CalibrationError::StatePoisoned)
    }

    /// Parse raw input into a point, filling the DO saturation figure
    fn parse_point(
        &self,
        sensor: SensorKind,
        mode: CalibrationMode,
        point_index: u32,
        input: &RawPointInput,
    ) -> CalibrationPoint {
        let fallback = if sensor.operator_enters_primary() {
            0.0
        } else {
            self.settings.default_do_saturation(mode, point_index)
        };
        let (primary, voltage, temperature) = input.parse(fallback);
        CalibrationPoint::new(point_index, primary, voltage, temperature)
    }

    /// Fire-and-forget event broadcast; a lagging UI never blocks capture
    fn emit(&self, event: CalibrationEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for CalibrationManager {
    fn default() -> Self {
        Self::new(CalibrationSettings::default())
    }
}
