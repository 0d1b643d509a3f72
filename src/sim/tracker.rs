//! Simulated body tracker with a FIFO processing queue.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::body::{JointId, Skeleton};
use crate::config::Timeout;
use crate::device::Calibration;
use crate::error::QueueError;
use crate::sim::{FaultPlan, LifecycleEvent, SimCapture, SimStats, standing_pose};
use crate::tracking::{BodyFrame, BodyTracker};

/// Body frame produced by a [`SimTracker`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimFrame {
    /// Index of the capture this frame answers
    pub capture_index: u64,
    pub device_timestamp: Duration,
    bodies: Vec<(u32, Skeleton)>,
}

impl BodyFrame for SimFrame {
    fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    fn body_skeleton(&self, index: usize) -> Option<Skeleton> {
        self.bodies.get(index).map(|(_, skeleton)| *skeleton)
    }

    fn body_id(&self, index: usize) -> Option<u32> {
        self.bodies.get(index).map(|(id, _)| *id)
    }

    fn device_timestamp(&self) -> Duration {
        self.device_timestamp
    }
}

/// Simulated tracker answering captures in submission order.
#[derive(Debug)]
pub struct SimTracker {
    calibration: Calibration,
    bodies: usize,
    faults: Arc<FaultPlan>,
    stats: Arc<SimStats>,
    queue: VecDeque<(u64, Duration)>,
    enqueue_calls: u64,
    pop_calls: u64,
    running: bool,
}

impl SimTracker {
    pub(crate) fn new(
        calibration: Calibration,
        bodies: usize,
        faults: Arc<FaultPlan>,
        stats: Arc<SimStats>,
    ) -> Self {
        Self {
            calibration,
            bodies,
            faults,
            stats,
            queue: VecDeque::new(),
            enqueue_calls: 0,
            pop_calls: 0,
            running: true,
        }
    }

    /// Whether the body's pelvis projects inside the depth image.
    fn in_view(&self, skeleton: &Skeleton) -> bool {
        let pelvis = skeleton.joint(JointId::Pelvis).position;
        if pelvis.z <= 0.0 {
            return false;
        }
        let depth = &self.calibration.depth;
        let u = depth.fx * pelvis.x / pelvis.z + depth.cx;
        let v = depth.fy * pelvis.y / pelvis.z + depth.cy;
        (0.0..depth.width as f32).contains(&u) && (0.0..depth.height as f32).contains(&v)
    }

    /// Captures waiting to be popped.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl BodyTracker for SimTracker {
    type Capture = SimCapture;
    type Frame = SimFrame;

    fn enqueue_capture(
        &mut self,
        capture: &SimCapture,
        _timeout: Timeout,
    ) -> Result<(), QueueError> {
        self.enqueue_calls += 1;
        if !self.running {
            return Err(QueueError::Failed);
        }
        if let Some(err) = self.faults.enqueue_fault(self.enqueue_calls) {
            return Err(err);
        }
        self.queue.push_back((capture.index, capture.device_timestamp));
        self.stats.capture_enqueued();
        Ok(())
    }

    fn pop_result(&mut self, timeout: Timeout) -> Result<SimFrame, QueueError> {
        self.pop_calls += 1;
        if let Some(err) = self.faults.pop_fault(self.pop_calls) {
            // A failed result is consumed; a timed out one is still pending.
            if err == QueueError::Failed {
                self.queue.pop_front();
            }
            return Err(err);
        }

        let Some((capture_index, device_timestamp)) = self.queue.pop_front() else {
            // Nothing will ever arrive, so an unbounded wait cannot succeed.
            return Err(match timeout {
                Timeout::Infinite => QueueError::Failed,
                Timeout::After(_) => QueueError::Timeout,
            });
        };

        let bodies = if self.faults.is_empty_pop(self.pop_calls) {
            Vec::new()
        } else {
            (0..self.bodies)
                .filter_map(|i| {
                    let skeleton = standing_pose(i, device_timestamp);
                    self.in_view(&skeleton).then_some((i as u32 + 1, skeleton))
                })
                .collect()
        };
        debug!("Simulated frame for capture {} with {} bodies", capture_index, bodies.len());

        self.stats.frame_popped();
        Ok(SimFrame {
            capture_index,
            device_timestamp,
            bodies,
        })
    }

    fn release_frame(&self, _frame: SimFrame) {
        self.stats.frame_released();
    }

    fn shutdown(&mut self) {
        self.running = false;
        self.queue.clear();
        self.stats.record(LifecycleEvent::TrackerShutdown);
    }

    fn destroy(&mut self) {
        self.stats.record(LifecycleEvent::TrackerDestroyed);
    }
}
