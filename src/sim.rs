//! Simulated sensor backend.
//!
//! Stands in for the camera and body tracking SDKs so the pipeline can run
//! without hardware. The device produces timestamped captures at the
//! configured frame rate; the tracker answers each capture, in order, with
//! a frame holding a configurable number of synthetic standing bodies.
//! A [`FaultPlan`] injects failures at chosen calls and [`SimStats`] counts
//! every acquire, release and lifecycle call.

mod device;
mod faults;
mod pose;
mod stats;
mod tracker;

use std::sync::Arc;

use tracing::info;

pub use device::{SimCapture, SimDevice};
pub use faults::FaultPlan;
pub use pose::standing_pose;
pub use stats::{LifecycleEvent, SimStats, StatsSnapshot};
pub use tracker::{SimFrame, SimTracker};

use crate::backend::SensorBackend;
use crate::device::Calibration;
use crate::error::{DeviceError, TrackerError};
use crate::tracking::TrackerConfiguration;

/// Behaviour of the simulated sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// People standing side by side in front of the sensor. Only those whose
    /// pelvis projects into the depth image are detected.
    pub bodies: usize,
    /// Pace captures at the device frame rate instead of returning at once
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bodies: 1,
            realtime: false,
        }
    }
}

/// Backend producing [`SimDevice`] and [`SimTracker`] instances.
#[derive(Debug, Default)]
pub struct SimBackend {
    config: SimConfig,
    faults: Arc<FaultPlan>,
    stats: Arc<SimStats>,
}

impl SimBackend {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = Arc::new(faults);
        self
    }

    /// Counters shared with every device and tracker this backend creates.
    pub fn stats(&self) -> Arc<SimStats> {
        Arc::clone(&self.stats)
    }
}

impl SensorBackend for SimBackend {
    type Device = SimDevice;
    type Tracker = SimTracker;

    fn open_device(&mut self, index: u32) -> Result<SimDevice, DeviceError> {
        if self.faults.fail_open || index != 0 {
            return Err(DeviceError::OpenFailed {
                index,
                reason: "no simulated device at this index".into(),
            });
        }
        info!("Opened simulated device {}", index);
        self.stats.record(LifecycleEvent::DeviceOpened);
        Ok(SimDevice::new(
            self.config.realtime,
            Arc::clone(&self.faults),
            Arc::clone(&self.stats),
        ))
    }

    fn create_tracker(
        &mut self,
        calibration: &Calibration,
        config: &TrackerConfiguration,
    ) -> Result<SimTracker, TrackerError> {
        if self.faults.fail_tracker {
            return Err(TrackerError::InitFailed(format!(
                "simulated {:?} tracker refused to start",
                config.processing_mode
            )));
        }
        self.stats.record(LifecycleEvent::TrackerCreated);
        Ok(SimTracker::new(
            calibration.clone(),
            self.config.bodies,
            Arc::clone(&self.faults),
            Arc::clone(&self.stats),
        ))
    }
}
