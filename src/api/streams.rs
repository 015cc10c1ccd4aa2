//! Calibration event stream for dashboard subscribers.

use futures::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::telemetry::CalibrationEvent;

/// Stream of calibration lifecycle events
///
/// Yields every event broadcast by the calibration manager: mode
/// changes, point captures, readout updates, clears, and report
/// commits. Lagged receivers skip missed events rather than erroring
/// out of the stream.
pub fn calibration_event_stream() -> impl Stream<Item = CalibrationEvent> {
    let rx = super::context().calibration().subscribe();
    BroadcastStream::new(rx).filter_map(|event| event.ok())
}
