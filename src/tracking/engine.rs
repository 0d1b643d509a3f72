//! Traits for body tracking SDK bindings.

use std::time::Duration;

use crate::body::Skeleton;
use crate::config::Timeout;
use crate::error::QueueError;

/// A body tracker bound to one device calibration.
///
/// Captures go in through [`enqueue_capture`](Self::enqueue_capture) and
/// results come out of [`pop_result`](Self::pop_result) in the same order.
/// Popped frames are reference counted by the SDK and must be handed back
/// through [`release_frame`](Self::release_frame).
pub trait BodyTracker {
    /// Capture handle type of the device feeding this tracker.
    type Capture;
    /// SDK body frame handle.
    type Frame: BodyFrame;

    /// Add a capture to the tracker's input queue.
    fn enqueue_capture(
        &mut self,
        capture: &Self::Capture,
        timeout: Timeout,
    ) -> Result<(), QueueError>;

    /// Take the oldest processed result off the output queue.
    fn pop_result(&mut self, timeout: Timeout) -> Result<Self::Frame, QueueError>;

    /// Hand a body frame back to the SDK.
    fn release_frame(&self, frame: Self::Frame);

    /// Stop processing; pending results are discarded.
    fn shutdown(&mut self);

    /// Free the tracker.
    fn destroy(&mut self);
}

/// Read access to a processed body frame.
pub trait BodyFrame {
    /// Number of bodies detected in this frame.
    fn num_bodies(&self) -> usize;

    /// Skeleton of the body at `index`.
    fn body_skeleton(&self, index: usize) -> Option<Skeleton>;

    /// Tracker-assigned id of the body at `index`.
    fn body_id(&self, index: usize) -> Option<u32>;

    /// Device timestamp of the capture this frame was computed from.
    fn device_timestamp(&self) -> Duration;
}
