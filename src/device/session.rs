//! DeviceSession owning an open, streaming capture device.

use std::ops::Deref;

use tracing::{debug, info, warn};

use crate::backend::SensorBackend;
use crate::config::Timeout;
use crate::device::{Calibration, CaptureDevice, DeviceConfiguration};
use crate::error::{CaptureError, DeviceError};

/// An open device with its cameras started.
///
/// The cameras are stopped and the device closed exactly once, either by
/// [`stop_and_close`](Self::stop_and_close) or when the session is dropped.
pub struct DeviceSession<D: CaptureDevice> {
    device: D,
    config: DeviceConfiguration,
    open: bool,
}

impl<D: CaptureDevice> DeviceSession<D> {
    /// Open the configured device through `backend` and start streaming.
    pub fn open_and_start<B>(
        backend: &mut B,
        config: DeviceConfiguration,
    ) -> Result<Self, DeviceError>
    where
        B: SensorBackend<Device = D>,
    {
        config.validate()?;

        info!("Opening capture device {}", config.device_index);
        let device = backend.open_device(config.device_index)?;
        Self::start(device, config)
    }

    /// Start the cameras of an already opened device.
    ///
    /// The device is closed again if the cameras fail to start.
    pub fn start(mut device: D, config: DeviceConfiguration) -> Result<Self, DeviceError> {
        info!(
            "Starting cameras: depth {:?}, color {:?}, {} fps",
            config.depth_mode,
            config.color_resolution,
            config.camera_fps.fps()
        );
        if let Err(err) = device.start_cameras(&config) {
            device.close();
            return Err(err);
        }

        Ok(Self {
            device,
            config,
            open: true,
        })
    }

    /// Calibration for the modes the cameras were started with.
    pub fn calibration(&self) -> Result<Calibration, DeviceError> {
        self.device
            .calibration(self.config.depth_mode, self.config.color_resolution)
    }

    /// Block for the next capture.
    ///
    /// The returned guard releases the capture when dropped.
    pub fn acquire_frame(&mut self, timeout: Timeout) -> Result<CaptureGuard<'_, D>, CaptureError> {
        let capture = self.device.get_capture(timeout)?;
        Ok(CaptureGuard {
            device: &self.device,
            capture: Some(capture),
        })
    }

    /// Stop the cameras and close the device.
    pub fn stop_and_close(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        info!("Stopping cameras and closing device {}", self.config.device_index);
        self.device.stop_cameras();
        self.device.close();
    }
}

impl<D: CaptureDevice> Drop for DeviceSession<D> {
    fn drop(&mut self) {
        if self.open {
            warn!("Device session dropped while open, closing");
            self.teardown();
        }
    }
}

/// A capture borrowed from the device, released on drop.
pub struct CaptureGuard<'a, D: CaptureDevice> {
    device: &'a D,
    capture: Option<D::Capture>,
}

impl<D: CaptureDevice> CaptureGuard<'_, D> {
    /// Release the capture now.
    pub fn release(self) {}
}

impl<D: CaptureDevice> Deref for CaptureGuard<'_, D> {
    type Target = D::Capture;

    fn deref(&self) -> &Self::Target {
        match &self.capture {
            Some(capture) => capture,
            None => unreachable!("capture taken before drop"),
        }
    }
}

impl<D: CaptureDevice> Drop for CaptureGuard<'_, D> {
    fn drop(&mut self) {
        if let Some(capture) = self.capture.take() {
            debug!("Releasing device capture");
            self.device.release_capture(capture);
        }
    }
}
