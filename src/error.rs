//! Error types for device, tracker, queue and reporting failures.

use thiserror::Error;

use crate::device::{ColorResolution, DepthMode, FrameRate};

/// Failures while opening, configuring or starting a capture device.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeviceError {
    /// The SDK could not open the device at the given index.
    #[error("opening device {index} failed: {reason}")]
    OpenFailed { index: u32, reason: String },
    /// The device opened but its cameras refused to start.
    #[error("starting device cameras failed: {0}")]
    StartFailed(String),
    /// The requested mode combination is not supported by the sensor.
    #[error("invalid configuration: {depth_mode:?} / {color_resolution:?} at {camera_fps:?}")]
    InvalidConfiguration {
        depth_mode: DepthMode,
        color_resolution: ColorResolution,
        camera_fps: FrameRate,
    },
    /// No calibration could be read for the running modes.
    #[error("reading sensor calibration failed: {0}")]
    CalibrationFailed(String),
}

/// Failures of a single blocking capture read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("timed out waiting for a device capture")]
    Timeout,
    #[error("device capture failed: {0}")]
    DeviceFailed(String),
}

/// Failures while creating the body tracker.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    #[error("body tracker initialization failed: {0}")]
    InitFailed(String),
    /// Body tracking needs a depth stream.
    #[error("body tracking is not available for depth mode {0:?}")]
    UnsupportedDepthMode(DepthMode),
}

/// Failures of the tracker's input and output queues.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("tracker queue timed out")]
    Timeout,
    #[error("tracker queue operation failed")]
    Failed,
}

/// Failures while rendering or persisting skeleton data.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding skeleton record failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The stage of a capture cycle that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CycleError {
    #[error("get depth capture: {0}")]
    Capture(#[from] CaptureError),
    #[error("add capture to tracker process queue: {0}")]
    Enqueue(QueueError),
    #[error("pop body frame result: {0}")]
    Pop(QueueError),
}

impl CycleError {
    /// Whether the failure was a timeout rather than a hard failure.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Capture(CaptureError::Timeout)
                | Self::Enqueue(QueueError::Timeout)
                | Self::Pop(QueueError::Timeout)
        )
    }
}

/// Top-level error for a capture run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("capture cycle {cycle} failed: {source}")]
    Cycle {
        cycle: u64,
        #[source]
        source: CycleError,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl PipelineError {
    /// Whether the error happened before any cycle could run.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::Device(_) | Self::Tracker(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_timeout_detection() {
        assert!(CycleError::Capture(CaptureError::Timeout).is_timeout());
        assert!(CycleError::Pop(QueueError::Timeout).is_timeout());
        assert!(!CycleError::Enqueue(QueueError::Failed).is_timeout());
        assert!(!CycleError::Capture(CaptureError::DeviceFailed("usb".into())).is_timeout());
    }

    #[test]
    fn test_initialization_errors() {
        let err: PipelineError = DeviceError::StartFailed("busy".into()).into();
        assert!(err.is_initialization());

        let err = PipelineError::Cycle {
            cycle: 3,
            source: CycleError::Pop(QueueError::Failed),
        };
        assert!(!err.is_initialization());
        assert_eq!(
            err.to_string(),
            "capture cycle 3 failed: pop body frame result: tracker queue operation failed"
        );
    }
}
