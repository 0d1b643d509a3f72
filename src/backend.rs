//! Seam between the capture pipeline and a concrete sensor SDK.

use crate::device::{Calibration, CaptureDevice};
use crate::error::{DeviceError, TrackerError};
use crate::tracking::{BodyTracker, TrackerConfiguration};

/// Opens devices and creates trackers for one SDK pairing.
///
/// The tracker consumes the device's capture handles directly, so both
/// halves must come from the same backend.
pub trait SensorBackend {
    type Device: CaptureDevice;
    type Tracker: BodyTracker<Capture = <Self::Device as CaptureDevice>::Capture>;

    /// Open the device at `index`.
    fn open_device(&mut self, index: u32) -> Result<Self::Device, DeviceError>;

    /// Create a body tracker bound to a device calibration.
    fn create_tracker(
        &mut self,
        calibration: &Calibration,
        config: &TrackerConfiguration,
    ) -> Result<Self::Tracker, TrackerError>;
}
