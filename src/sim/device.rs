//! Simulated depth camera.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Timeout;
use crate::device::{Calibration, CaptureDevice, ColorResolution, DepthMode, DeviceConfiguration};
use crate::error::{CaptureError, DeviceError};
use crate::sim::{FaultPlan, LifecycleEvent, SimStats};

/// Capture handle from a [`SimDevice`].
#[derive(Debug, PartialEq, Eq)]
pub struct SimCapture {
    /// 1-based number of the capture since the cameras started
    pub index: u64,
    pub device_timestamp: Duration,
}

/// Simulated depth camera.
#[derive(Debug)]
pub struct SimDevice {
    realtime: bool,
    faults: Arc<FaultPlan>,
    stats: Arc<SimStats>,
    frame_period: Option<Duration>,
    calls: u64,
    delivered: u64,
    last_delivery: Option<Instant>,
}

impl SimDevice {
    pub(crate) fn new(realtime: bool, faults: Arc<FaultPlan>, stats: Arc<SimStats>) -> Self {
        Self {
            realtime,
            faults,
            stats,
            frame_period: None,
            calls: 0,
            delivered: 0,
            last_delivery: None,
        }
    }

    /// Sleep until the next frame is due, or report a timeout if the wait
    /// would exceed the caller's bound.
    fn wait_for_frame(&self, period: Duration, timeout: Timeout) -> Result<(), CaptureError> {
        let due = match self.last_delivery {
            Some(last) => (last + period).saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        };
        if !timeout.allows(due) {
            if let Timeout::After(limit) = timeout {
                thread::sleep(limit);
            }
            return Err(CaptureError::Timeout);
        }
        thread::sleep(due);
        Ok(())
    }
}

impl CaptureDevice for SimDevice {
    type Capture = SimCapture;

    fn start_cameras(&mut self, config: &DeviceConfiguration) -> Result<(), DeviceError> {
        if self.faults.fail_start {
            return Err(DeviceError::StartFailed("simulated start failure".into()));
        }
        self.frame_period = Some(config.camera_fps.frame_period());
        self.stats.record(LifecycleEvent::CamerasStarted);
        Ok(())
    }

    fn calibration(
        &self,
        depth_mode: DepthMode,
        color_resolution: ColorResolution,
    ) -> Result<Calibration, DeviceError> {
        if self.faults.fail_calibration {
            return Err(DeviceError::CalibrationFailed("simulated calibration failure".into()));
        }
        Calibration::nominal(depth_mode, color_resolution).ok_or_else(|| {
            DeviceError::CalibrationFailed(format!("no depth calibration for {:?}", depth_mode))
        })
    }

    fn get_capture(&mut self, timeout: Timeout) -> Result<SimCapture, CaptureError> {
        self.calls += 1;
        let Some(period) = self.frame_period else {
            return Err(CaptureError::DeviceFailed("cameras not started".into()));
        };
        if let Some(err) = self.faults.capture_fault(self.calls) {
            return Err(err);
        }
        if self.realtime {
            self.wait_for_frame(period, timeout)?;
            self.last_delivery = Some(Instant::now());
        }

        let capture = SimCapture {
            index: self.delivered + 1,
            device_timestamp: period * u32::try_from(self.delivered).unwrap_or(u32::MAX),
        };
        self.delivered += 1;
        self.stats.capture_acquired();
        debug!("Simulated capture {} at {:?}", capture.index, capture.device_timestamp);
        Ok(capture)
    }

    fn release_capture(&self, _capture: SimCapture) {
        self.stats.capture_released();
    }

    fn stop_cameras(&mut self) {
        self.frame_period = None;
        self.stats.record(LifecycleEvent::CamerasStopped);
    }

    fn close(&mut self) {
        self.stats.record(LifecycleEvent::DeviceClosed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> SimDevice {
        let mut device = SimDevice::new(false, Arc::default(), Arc::default());
        device.start_cameras(&DeviceConfiguration::default()).unwrap();
        device
    }

    #[test]
    fn test_timestamps_advance_by_frame_period() {
        let mut device = started();
        let first = device.get_capture(Timeout::Infinite).unwrap();
        let second = device.get_capture(Timeout::Infinite).unwrap();

        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert_eq!(second.device_timestamp - first.device_timestamp, device.frame_period.unwrap());
    }

    #[test]
    fn test_capture_before_start_fails() {
        let mut device = SimDevice::new(false, Arc::default(), Arc::default());
        assert!(matches!(
            device.get_capture(Timeout::Infinite),
            Err(CaptureError::DeviceFailed(_))
        ));
    }

    #[test]
    fn test_injected_capture_fault_skips_no_frame() {
        let faults = FaultPlan::new().capture_error(1, CaptureError::Timeout);
        let mut device = SimDevice::new(false, Arc::new(faults), Arc::default());
        device.start_cameras(&DeviceConfiguration::default()).unwrap();

        assert_eq!(device.get_capture(Timeout::Infinite), Err(CaptureError::Timeout));
        assert_eq!(device.get_capture(Timeout::Infinite).unwrap().index, 1);
    }

    #[test]
    fn test_realtime_bounded_timeout_expires() {
        let mut device = SimDevice::new(true, Arc::default(), Arc::default());
        let config = DeviceConfiguration {
            camera_fps: crate::device::FrameRate::Fps5,
            ..Default::default()
        };
        device.start_cameras(&config).unwrap();

        let timeout = Timeout::After(Duration::from_millis(5));
        assert!(device.get_capture(timeout).is_ok());
        assert_eq!(device.get_capture(timeout), Err(CaptureError::Timeout));
    }
}
