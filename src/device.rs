//! Capture device configuration, calibration and session lifecycle.

mod calibration;
mod config;
mod session;
mod source;

pub use calibration::{Calibration, CameraIntrinsics};
pub use config::{ColorResolution, DepthMode, DeviceConfiguration, FrameRate};
pub use session::{CaptureGuard, DeviceSession};
pub use source::CaptureDevice;
