//! Depth camera body-tracking capture driver.
//!
//! Opens a capture device, feeds each capture into a body tracker and
//! reports the first detected body's skeleton. The camera and tracking SDKs
//! sit behind the [`SensorBackend`], [`CaptureDevice`] and [`BodyTracker`]
//! traits; [`sim`] provides a simulated backend.
//!
//! # Example
//!
//! ```no_run
//! use bodytrack_capture::{CaptureConfig, ConsoleSink, SimBackend, SimConfig};
//!
//! let mut backend = SimBackend::new(SimConfig::default());
//! let mut sink = ConsoleSink::stdout(false);
//! let summary = bodytrack_capture::pipeline::run(
//!     &mut backend,
//!     &CaptureConfig::default(),
//!     &mut sink,
//!     None,
//! )?;
//! println!("{} skeletons", summary.skeletons);
//! # Ok::<(), bodytrack_capture::PipelineError>(())
//! ```

pub mod backend;
pub mod body;
pub mod config;
pub mod device;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sim;
pub mod tracking;

pub use backend::SensorBackend;
pub use body::{Joint, JointConfidence, JointId, Skeleton, SkeletonSample};
pub use config::{CaptureConfig, CycleErrorPolicy, RunMode, Timeout};
pub use device::{CaptureDevice, DeviceConfiguration};
pub use error::{CaptureError, CycleError, DeviceError, PipelineError, QueueError, TrackerError};
pub use pipeline::{CapturePipeline, PipelineState, RunSummary, TrackedFrame};
pub use report::{ConsoleSink, JsonLinesSink, SkeletonSink};
pub use sim::{SimBackend, SimConfig};
pub use tracking::{BodyFrame, BodyTracker, TrackerConfiguration};
