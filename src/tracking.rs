mod config;
mod engine;
mod session;

pub use config::{ProcessingMode, SensorOrientation, TrackerConfiguration};
pub use engine::{BodyFrame, BodyTracker};
pub use session::{FrameGuard, TrackingSession};
