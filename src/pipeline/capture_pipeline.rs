//! CapturePipeline combining a device session with a tracking session.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::SensorBackend;
use crate::body::SkeletonSample;
use crate::config::Timeout;
use crate::device::{CaptureDevice, DeviceConfiguration, DeviceSession};
use crate::error::{CycleError, PipelineError, QueueError};
use crate::pipeline::PipelineState;
use crate::tracking::{BodyFrame, BodyTracker, TrackerConfiguration, TrackingSession};

/// Outcome of one successful capture cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFrame {
    /// Bodies the tracker detected in the frame
    pub body_count: usize,
    /// Device timestamp of the underlying capture
    pub device_timestamp: Duration,
    /// First body's reported joints, `None` when nobody is visible
    pub skeleton: Option<SkeletonSample>,
}

/// A device and a body tracker driven as one unit.
///
/// Field order matters: the tracker is dropped before the device.
pub struct CapturePipeline<D, T>
where
    D: CaptureDevice,
    T: BodyTracker<Capture = D::Capture>,
{
    tracking: TrackingSession<T>,
    device: DeviceSession<D>,
    timeout: Timeout,
    state: PipelineState,
    /// Results of captures whose pop timed out, still queued in the tracker
    stale_results: usize,
}

impl<D, T> CapturePipeline<D, T>
where
    D: CaptureDevice,
    T: BodyTracker<Capture = D::Capture>,
{
    /// Open the device, read its calibration and create the tracker.
    ///
    /// Any failure tears down what was already opened.
    pub fn start<B>(
        backend: &mut B,
        device_config: DeviceConfiguration,
        tracker_config: TrackerConfiguration,
        timeout: Timeout,
    ) -> Result<Self, PipelineError>
    where
        B: SensorBackend<Device = D, Tracker = T>,
    {
        let device = DeviceSession::open_and_start(backend, device_config)?;
        debug!("Pipeline state: {:?}", PipelineState::DeviceOpen);

        let tracking = match device
            .calibration()
            .map_err(PipelineError::from)
            .and_then(|calibration| {
                TrackingSession::create(backend, &calibration, tracker_config)
                    .map_err(PipelineError::from)
            }) {
            Ok(tracking) => tracking,
            Err(err) => {
                device.stop_and_close();
                return Err(err);
            }
        };
        debug!("Pipeline state: {:?}", PipelineState::TrackerReady);

        Ok(Self::from_sessions(device, tracking, timeout))
    }

    /// Assemble a pipeline from sessions that are already running.
    pub fn from_sessions(
        device: DeviceSession<D>,
        tracking: TrackingSession<T>,
        timeout: Timeout,
    ) -> Self {
        Self {
            tracking,
            device,
            timeout,
            state: PipelineState::TrackerReady,
            stale_results: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run one capture cycle: acquire, enqueue, pop, copy out the first body.
    ///
    /// The capture is released before popping and the frame is released
    /// before returning, on every path. Results left behind by an earlier
    /// pop timeout are discarded first so the frame always answers this
    /// cycle's capture.
    pub fn step(&mut self) -> Result<TrackedFrame, CycleError> {
        if self.state == PipelineState::TrackerReady {
            self.state = PipelineState::Running;
            debug!("Pipeline state: {:?}", self.state);
        }

        self.discard_stale_results()?;

        let capture = self.device.acquire_frame(self.timeout)?;
        let submitted = self.tracking.submit(&*capture, self.timeout);
        capture.release();
        if let Err(err) = submitted {
            if self.timeout == Timeout::Infinite && err == QueueError::Timeout {
                warn!("Enqueue timed out despite an infinite wait");
            }
            return Err(CycleError::Enqueue(err));
        }

        let frame = match self.tracking.pop(self.timeout) {
            Ok(frame) => frame,
            Err(err) => {
                if err == QueueError::Timeout {
                    self.stale_results += 1;
                }
                return Err(CycleError::Pop(err));
            }
        };
        let body_count = frame.num_bodies();
        debug!("{} bodies detected", body_count);

        let skeleton = if body_count >= 1 {
            frame
                .body_skeleton(0)
                .map(|skeleton| skeleton.sample(frame.body_id(0).unwrap_or(0)))
        } else {
            None
        };
        let tracked = TrackedFrame {
            body_count,
            device_timestamp: frame.device_timestamp(),
            skeleton,
        };
        frame.release();

        Ok(tracked)
    }

    /// Pop and release results whose cycle already gave up on them.
    ///
    /// A timeout here leaves the backlog in place and fails the cycle before
    /// a new capture is queued behind it.
    fn discard_stale_results(&mut self) -> Result<(), CycleError> {
        while self.stale_results > 0 {
            match self.tracking.pop(self.timeout) {
                Ok(frame) => {
                    debug!(
                        "Discarded stale body frame from {:?}",
                        frame.device_timestamp()
                    );
                    frame.release();
                }
                Err(QueueError::Timeout) => return Err(CycleError::Pop(QueueError::Timeout)),
                Err(QueueError::Failed) => warn!("Stale body frame could not be popped"),
            }
            self.stale_results -= 1;
        }
        Ok(())
    }

    /// Tear down in order: tracker shutdown, tracker destroy, device stop,
    /// device close.
    pub fn shutdown(self) -> PipelineState {
        let Self {
            tracking, device, ..
        } = self;
        debug!("Pipeline state: {:?}", PipelineState::ShuttingDown);
        tracking.destroy();
        device.stop_and_close();
        info!("Finished body tracking processing");
        PipelineState::Closed
    }
}
