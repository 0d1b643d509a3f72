//! Reporting sinks that render or persist collected skeletons.

mod console;
mod record;
mod sink;

pub use console::ConsoleSink;
pub use record::{JointRecord, JsonLinesSink, SkeletonRecord};
pub use sink::{SkeletonReport, SkeletonSink};
