//! Skeleton data model: joints, confidence levels and copied-out skeletons.

mod builder;
mod confidence;
mod joint;
mod skeleton;

pub use builder::SkeletonBuilder;
pub use confidence::JointConfidence;
pub use joint::{Joint, JointId};
pub use skeleton::{JOINT_COUNT, REPORTED_JOINT_COUNT, Skeleton, SkeletonSample};
