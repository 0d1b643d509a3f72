//! Sensor calibration snapshot handed to the body tracker.

use crate::device::{ColorResolution, DepthMode};

/// Pinhole intrinsics of the depth camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    pub width: u32,
    pub height: u32,
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

/// Calibration read from a running device for one pair of sensor modes.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub depth_mode: DepthMode,
    pub color_resolution: ColorResolution,
    pub depth: CameraIntrinsics,
}

impl Calibration {
    /// Ideal intrinsics derived from the nominal field of view of a depth mode.
    ///
    /// Returns `None` for modes without a depth image.
    pub fn nominal(depth_mode: DepthMode, color_resolution: ColorResolution) -> Option<Self> {
        let (width, height) = depth_mode.resolution()?;
        let (hfov, vfov) = depth_mode.field_of_view()?;

        let fx = width as f32 / 2.0 / (hfov.to_radians() / 2.0).tan();
        let fy = height as f32 / 2.0 / (vfov.to_radians() / 2.0).tan();

        Some(Self {
            depth_mode,
            color_resolution,
            depth: CameraIntrinsics {
                width,
                height,
                fx,
                fy,
                cx: width as f32 / 2.0,
                cy: height as f32 / 2.0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_nfov_intrinsics() {
        let calib = Calibration::nominal(DepthMode::NfovUnbinned, ColorResolution::Off).unwrap();
        assert_eq!(calib.depth.width, 640);
        assert_eq!(calib.depth.height, 576);
        assert_eq!(calib.depth.cx, 320.0);
        // 320 / tan(37.5 deg)
        assert!((calib.depth.fx - 417.03).abs() < 0.1);
    }

    #[test]
    fn test_no_calibration_without_depth() {
        assert!(Calibration::nominal(DepthMode::Off, ColorResolution::R720p).is_none());
    }
}
