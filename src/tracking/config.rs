//! Body tracker configuration.

use clap::ValueEnum;

/// Mounting orientation of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SensorOrientation {
    #[default]
    Default,
    Clockwise90,
    CounterClockwise90,
    Flip180,
}

/// Where the tracker runs inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProcessingMode {
    #[default]
    Gpu,
    Cpu,
}

/// Configuration for creating a body tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfiguration {
    pub sensor_orientation: SensorOrientation,
    pub processing_mode: ProcessingMode,
    pub gpu_device_id: u32,
}

impl Default for TrackerConfiguration {
    fn default() -> Self {
        Self {
            sensor_orientation: SensorOrientation::Default,
            processing_mode: ProcessingMode::Gpu,
            gpu_device_id: 0,
        }
    }
}
