//! Call counters shared by the simulated device and tracker.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle calls in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    DeviceOpened,
    CamerasStarted,
    TrackerCreated,
    TrackerShutdown,
    TrackerDestroyed,
    CamerasStopped,
    DeviceClosed,
}

/// Counters for resource acquisition and release.
#[derive(Debug, Default)]
pub struct SimStats {
    captures_acquired: AtomicU64,
    captures_released: AtomicU64,
    captures_enqueued: AtomicU64,
    frames_popped: AtomicU64,
    frames_released: AtomicU64,
    lifecycle: Mutex<Vec<LifecycleEvent>>,
}

/// Point-in-time copy of [`SimStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub captures_acquired: u64,
    pub captures_released: u64,
    pub captures_enqueued: u64,
    pub frames_popped: u64,
    pub frames_released: u64,
}

impl SimStats {
    pub(crate) fn capture_acquired(&self) {
        self.captures_acquired.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn capture_released(&self) {
        self.captures_released.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn capture_enqueued(&self) {
        self.captures_enqueued.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn frame_popped(&self) {
        self.frames_popped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn frame_released(&self) {
        self.frames_released.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record(&self, event: LifecycleEvent) {
        if let Ok(mut log) = self.lifecycle.lock() {
            log.push(event);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            captures_acquired: self.captures_acquired.load(Ordering::SeqCst),
            captures_released: self.captures_released.load(Ordering::SeqCst),
            captures_enqueued: self.captures_enqueued.load(Ordering::SeqCst),
            frames_popped: self.frames_popped.load(Ordering::SeqCst),
            frames_released: self.frames_released.load(Ordering::SeqCst),
        }
    }

    pub fn lifecycle(&self) -> Vec<LifecycleEvent> {
        match self.lifecycle.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
