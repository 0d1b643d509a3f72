//! Run configuration: modes, timeouts and the per-cycle error policy.

use std::path::PathBuf;
use std::time::Duration;

use crate::device::DeviceConfiguration;
use crate::pipeline::ContinuousPlan;
use crate::tracking::TrackerConfiguration;

/// Wait bound for blocking SDK calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    #[default]
    Infinite,
    After(Duration),
}

impl Timeout {
    /// `None` means wait forever.
    pub fn from_millis(millis: Option<u64>) -> Self {
        match millis {
            Some(ms) => Self::After(Duration::from_millis(ms)),
            None => Self::Infinite,
        }
    }

    /// Whether a wait of `needed` fits in this bound.
    pub fn allows(self, needed: Duration) -> bool {
        match self {
            Self::Infinite => true,
            Self::After(limit) => needed <= limit,
        }
    }
}

/// What the driver does after a capture cycle fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleErrorPolicy {
    /// Log the failure and move on to the next cycle
    #[default]
    Continue,
    /// Stop the run and report the failure
    Abort,
}

/// How many cycles to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// One capture cycle
    #[default]
    Single,
    /// Repeated cycles for a bounded duration
    Continuous { duration_secs: u64 },
}

/// Everything needed to run a capture session.
#[derive(Debug, Clone, Default)]
pub struct CaptureConfig {
    pub device: DeviceConfiguration,
    pub tracker: TrackerConfiguration,
    pub mode: RunMode,
    pub timeout: Timeout,
    pub error_policy: CycleErrorPolicy,
    /// Spacing between continuous cycles; defaults to the device frame period
    pub interval: Option<Duration>,
    /// Print the full joint dump for every skeleton
    pub verbose: bool,
    /// JSON-lines file receiving one record per skeleton
    pub output: Option<PathBuf>,
}

impl CaptureConfig {
    /// The continuous schedule, if running in continuous mode.
    pub fn continuous_plan(&self) -> Option<ContinuousPlan> {
        match self.mode {
            RunMode::Single => None,
            RunMode::Continuous { duration_secs } => {
                let plan = ContinuousPlan::new(duration_secs, self.device.camera_fps);
                Some(match self.interval {
                    Some(interval) => plan.with_interval(interval),
                    None => plan,
                })
            }
        }
    }
}
