//! TrackingSession owning a body tracker for the lifetime of a capture run.

use std::ops::Deref;

use tracing::{debug, info, warn};

use crate::backend::SensorBackend;
use crate::config::Timeout;
use crate::device::Calibration;
use crate::error::{QueueError, TrackerError};
use crate::tracking::{BodyTracker, TrackerConfiguration};

/// A created body tracker.
///
/// Shut down and destroyed exactly once, either by
/// [`destroy`](Self::destroy) or when the session is dropped.
pub struct TrackingSession<T: BodyTracker> {
    tracker: T,
    config: TrackerConfiguration,
    active: bool,
}

impl<T: BodyTracker> TrackingSession<T> {
    /// Create a tracker for the given calibration.
    pub fn create<B>(
        backend: &mut B,
        calibration: &Calibration,
        config: TrackerConfiguration,
    ) -> Result<Self, TrackerError>
    where
        B: SensorBackend<Tracker = T>,
    {
        if !calibration.depth_mode.supports_body_tracking() {
            return Err(TrackerError::UnsupportedDepthMode(calibration.depth_mode));
        }

        info!(
            "Creating body tracker: {:?} processing, orientation {:?}",
            config.processing_mode, config.sensor_orientation
        );
        let tracker = backend.create_tracker(calibration, &config)?;
        Ok(Self::from_tracker(tracker, config))
    }

    /// Wrap an already created tracker.
    pub fn from_tracker(tracker: T, config: TrackerConfiguration) -> Self {
        Self {
            tracker,
            config,
            active: true,
        }
    }

    /// Queue a capture for processing.
    pub fn submit(&mut self, capture: &T::Capture, timeout: Timeout) -> Result<(), QueueError> {
        self.tracker.enqueue_capture(capture, timeout)
    }

    /// Pop the oldest processed frame.
    ///
    /// The returned guard releases the frame when dropped.
    pub fn pop(&mut self, timeout: Timeout) -> Result<FrameGuard<'_, T>, QueueError> {
        let frame = self.tracker.pop_result(timeout)?;
        Ok(FrameGuard {
            tracker: &self.tracker,
            frame: Some(frame),
        })
    }

    /// Shut the tracker down and destroy it.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        info!(
            "Shutting down {:?} body tracker on GPU {}",
            self.config.processing_mode, self.config.gpu_device_id
        );
        self.tracker.shutdown();
        self.tracker.destroy();
    }
}

impl<T: BodyTracker> Drop for TrackingSession<T> {
    fn drop(&mut self) {
        if self.active {
            warn!("Tracking session dropped while active, destroying");
            self.teardown();
        }
    }
}

/// A popped body frame, released on drop.
pub struct FrameGuard<'a, T: BodyTracker> {
    tracker: &'a T,
    frame: Option<T::Frame>,
}

impl<T: BodyTracker> FrameGuard<'_, T> {
    /// Release the frame now.
    pub fn release(self) {}
}

impl<T: BodyTracker> Deref for FrameGuard<'_, T> {
    type Target = T::Frame;

    fn deref(&self) -> &Self::Target {
        match &self.frame {
            Some(frame) => frame,
            None => unreachable!("frame taken before drop"),
        }
    }
}

impl<T: BodyTracker> Drop for FrameGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            debug!("Releasing body frame");
            self.tracker.release_frame(frame);
        }
    }
}
