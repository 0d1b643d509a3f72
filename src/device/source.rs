//! Trait for depth camera SDK bindings.

use crate::config::Timeout;
use crate::device::{Calibration, ColorResolution, DepthMode, DeviceConfiguration};
use crate::error::{CaptureError, DeviceError};

/// An opened capture device.
///
/// Implement this trait to connect a camera SDK to the capture pipeline.
/// Handles returned by [`get_capture`](Self::get_capture) are reference
/// counted by the SDK and must be handed back through
/// [`release_capture`](Self::release_capture); [`DeviceSession`] does that
/// through a guard so callers never release by hand.
///
/// # Example
///
/// ```ignore
/// use bodytrack_capture::device::CaptureDevice;
///
/// struct MyCamera {
///     // SDK handle here
/// }
///
/// impl CaptureDevice for MyCamera {
///     type Capture = MyCaptureHandle;
///
///     fn get_capture(&mut self, timeout: Timeout) -> Result<Self::Capture, CaptureError> {
///         // Block on the SDK until the next capture arrives
///     }
///
///     // ...
/// }
/// ```
///
/// [`DeviceSession`]: crate::device::DeviceSession
pub trait CaptureDevice {
    /// SDK capture handle.
    type Capture;

    /// Start streaming with the given configuration.
    fn start_cameras(&mut self, config: &DeviceConfiguration) -> Result<(), DeviceError>;

    /// Read the calibration for a pair of running sensor modes.
    fn calibration(
        &self,
        depth_mode: DepthMode,
        color_resolution: ColorResolution,
    ) -> Result<Calibration, DeviceError>;

    /// Block until the next capture is available or the timeout elapses.
    fn get_capture(&mut self, timeout: Timeout) -> Result<Self::Capture, CaptureError>;

    /// Hand a capture handle back to the SDK.
    fn release_capture(&self, capture: Self::Capture);

    fn stop_cameras(&mut self);

    fn close(&mut self);
}
