//! Sensor modes and the immutable device configuration applied at start.

use std::time::Duration;

use clap::ValueEnum;

use crate::error::DeviceError;

/// Depth sensor operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DepthMode {
    /// Depth sensor disabled
    Off,
    /// Narrow field of view, 2x2 binned
    NfovBinned,
    /// Narrow field of view, full resolution
    #[default]
    NfovUnbinned,
    /// Wide field of view, 2x2 binned
    WfovBinned,
    /// Wide field of view, full resolution
    WfovUnbinned,
    /// Passive infrared only, no depth
    PassiveIr,
}

impl DepthMode {
    /// Depth image size in pixels, `None` when the mode produces no image.
    pub fn resolution(self) -> Option<(u32, u32)> {
        match self {
            Self::Off => None,
            Self::NfovBinned => Some((320, 288)),
            Self::NfovUnbinned => Some((640, 576)),
            Self::WfovBinned => Some((512, 512)),
            Self::WfovUnbinned | Self::PassiveIr => Some((1024, 1024)),
        }
    }

    /// Horizontal and vertical field of view in degrees.
    pub fn field_of_view(self) -> Option<(f32, f32)> {
        match self {
            Self::Off => None,
            Self::NfovBinned | Self::NfovUnbinned => Some((75.0, 65.0)),
            Self::WfovBinned | Self::WfovUnbinned | Self::PassiveIr => Some((120.0, 120.0)),
        }
    }

    /// Whether the mode yields depth data a body tracker can consume.
    pub fn supports_body_tracking(self) -> bool {
        !matches!(self, Self::Off | Self::PassiveIr)
    }
}

/// Color camera resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum ColorResolution {
    #[default]
    Off,
    #[value(name = "720p")]
    R720p,
    #[value(name = "1080p")]
    R1080p,
    #[value(name = "1440p")]
    R1440p,
    #[value(name = "1536p")]
    R1536p,
    #[value(name = "2160p")]
    R2160p,
    #[value(name = "3072p")]
    R3072p,
}

impl ColorResolution {
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            Self::Off => None,
            Self::R720p => Some((1280, 720)),
            Self::R1080p => Some((1920, 1080)),
            Self::R1440p => Some((2560, 1440)),
            Self::R1536p => Some((2048, 1536)),
            Self::R2160p => Some((3840, 2160)),
            Self::R3072p => Some((4096, 3072)),
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// Camera frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum FrameRate {
    #[value(name = "5")]
    Fps5,
    #[value(name = "15")]
    Fps15,
    #[default]
    #[value(name = "30")]
    Fps30,
}

impl FrameRate {
    pub fn fps(self) -> u32 {
        match self {
            Self::Fps5 => 5,
            Self::Fps15 => 15,
            Self::Fps30 => 30,
        }
    }

    /// Time between two consecutive device frames.
    pub fn frame_period(self) -> Duration {
        Duration::from_secs(1) / self.fps()
    }
}

/// Configuration applied when the device cameras are started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfiguration {
    pub depth_mode: DepthMode,
    pub color_resolution: ColorResolution,
    pub camera_fps: FrameRate,
    /// Index of the device to open
    pub device_index: u32,
}

impl Default for DeviceConfiguration {
    fn default() -> Self {
        Self {
            depth_mode: DepthMode::NfovUnbinned,
            color_resolution: ColorResolution::Off,
            camera_fps: FrameRate::Fps30,
            device_index: 0,
        }
    }
}

impl DeviceConfiguration {
    /// Reject mode combinations the sensor cannot stream.
    ///
    /// Full-resolution wide depth and 3072p color top out at 15 fps, and at
    /// least one stream has to be enabled.
    pub fn validate(&self) -> Result<(), DeviceError> {
        let too_fast = self.camera_fps == FrameRate::Fps30
            && (self.depth_mode == DepthMode::WfovUnbinned
                || self.color_resolution == ColorResolution::R3072p);
        let nothing_enabled =
            self.depth_mode == DepthMode::Off && !self.color_resolution.is_enabled();

        if too_fast || nothing_enabled {
            return Err(DeviceError::InvalidConfiguration {
                depth_mode: self.depth_mode,
                color_resolution: self.color_resolution,
                camera_fps: self.camera_fps,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_depth_only_capture() {
        let config = DeviceConfiguration::default();
        assert_eq!(config.depth_mode, DepthMode::NfovUnbinned);
        assert!(!config.color_resolution.is_enabled());
        assert_eq!(config.camera_fps.fps(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wide_unbinned_rejected_at_30fps() {
        let config = DeviceConfiguration {
            depth_mode: DepthMode::WfovUnbinned,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DeviceError::InvalidConfiguration { .. })
        ));

        let config = DeviceConfiguration {
            camera_fps: FrameRate::Fps15,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_streams_off_rejected() {
        let config = DeviceConfiguration {
            depth_mode: DepthMode::Off,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_period() {
        assert_eq!(FrameRate::Fps5.frame_period(), Duration::from_millis(200));
        assert_eq!(FrameRate::Fps30.frame_period(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn test_tracking_capable_modes() {
        assert!(DepthMode::NfovBinned.supports_body_tracking());
        assert!(DepthMode::WfovUnbinned.supports_body_tracking());
        assert!(!DepthMode::PassiveIr.supports_body_tracking());
        assert!(!DepthMode::Off.supports_body_tracking());
    }
}
