//! Failure injection for the simulated backend.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CaptureError, QueueError};

/// Which simulated calls fail, and how.
///
/// Per-call faults are keyed by the 1-based number of the call, counted
/// separately for captures, enqueues and pops.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    pub fail_open: bool,
    pub fail_start: bool,
    pub fail_calibration: bool,
    pub fail_tracker: bool,
    capture: BTreeMap<u64, CaptureError>,
    enqueue: BTreeMap<u64, QueueError>,
    pop: BTreeMap<u64, QueueError>,
    empty_pops: BTreeSet<u64>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn fail_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn fail_calibration(mut self) -> Self {
        self.fail_calibration = true;
        self
    }

    pub fn fail_tracker(mut self) -> Self {
        self.fail_tracker = true;
        self
    }

    /// Fail the `call`-th capture read.
    pub fn capture_error(mut self, call: u64, err: CaptureError) -> Self {
        self.capture.insert(call, err);
        self
    }

    /// Fail the `call`-th enqueue.
    pub fn enqueue_error(mut self, call: u64, err: QueueError) -> Self {
        self.enqueue.insert(call, err);
        self
    }

    /// Fail the `call`-th pop.
    pub fn pop_error(mut self, call: u64, err: QueueError) -> Self {
        self.pop.insert(call, err);
        self
    }

    /// Show nobody in the frame returned by the `call`-th pop.
    pub fn no_bodies_on(mut self, call: u64) -> Self {
        self.empty_pops.insert(call);
        self
    }

    pub fn capture_fault(&self, call: u64) -> Option<CaptureError> {
        self.capture.get(&call).cloned()
    }

    pub fn enqueue_fault(&self, call: u64) -> Option<QueueError> {
        self.enqueue.get(&call).copied()
    }

    pub fn pop_fault(&self, call: u64) -> Option<QueueError> {
        self.pop.get(&call).copied()
    }

    pub fn is_empty_pop(&self, call: u64) -> bool {
        self.empty_pops.contains(&call)
    }
}
