//! Full tracker skeletons and the reported subset copied out of a frame.

use nalgebra::Vector3;
use ndarray::{Array2, Axis};

use crate::body::{Joint, JointConfidence, JointId};

/// Number of joints in a tracker skeleton.
pub const JOINT_COUNT: usize = 32;

/// Number of joints copied out and reported, indices `0..25`.
pub const REPORTED_JOINT_COUNT: usize = 25;

/// Skeleton as produced by the body tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Skeleton {
    pub joints: [Joint; JOINT_COUNT],
}

impl Skeleton {
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// Copy the reported joint range out of this skeleton.
    pub fn sample(&self, body_id: u32) -> SkeletonSample {
        let mut joints = [Joint::default(); REPORTED_JOINT_COUNT];
        joints.copy_from_slice(&self.joints[..REPORTED_JOINT_COUNT]);
        SkeletonSample { body_id, joints }
    }
}

/// The first 25 joints of one tracked body, owned independently of the
/// frame they were read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonSample {
    /// Tracker-assigned body id
    pub body_id: u32,
    pub joints: [Joint; REPORTED_JOINT_COUNT],
}

impl SkeletonSample {
    /// Joints paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &Joint)> {
        JointId::ALL.iter().copied().zip(self.joints.iter())
    }

    /// Joint positions as a `(25, 3)` matrix in millimetres.
    pub fn positions(&self) -> Array2<f32> {
        Array2::from_shape_fn((REPORTED_JOINT_COUNT, 3), |(i, axis)| {
            self.joints[i].position[axis]
        })
    }

    /// Mean position of the reported joints.
    pub fn centroid(&self) -> Vector3<f32> {
        match self.positions().mean_axis(Axis(0)) {
            Some(mean) => Vector3::new(mean[0], mean[1], mean[2]),
            None => Vector3::zeros(),
        }
    }

    /// Lowest confidence among the reported joints.
    pub fn min_confidence(&self) -> JointConfidence {
        self.joints
            .iter()
            .map(|j| j.confidence)
            .min()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::SkeletonBuilder;

    #[test]
    fn test_sample_keeps_first_25_joints() {
        let skeleton = SkeletonBuilder::new()
            .position(JointId::AnkleRight, 1.0, 2.0, 3.0)
            .position(JointId::FootRight, 9.0, 9.0, 9.0)
            .build();

        let sample = skeleton.sample(7);
        assert_eq!(sample.joints.len(), REPORTED_JOINT_COUNT);
        assert_eq!(sample.body_id, 7);
        assert_eq!(sample.joints[24].position, Vector3::new(1.0, 2.0, 3.0));
        assert!(sample.iter().all(|(id, _)| id != JointId::FootRight));
    }

    #[test]
    fn test_positions_and_centroid() {
        let sample = SkeletonBuilder::new()
            .offset(100.0, -50.0, 2000.0)
            .build()
            .sample(1);

        let positions = sample.positions();
        assert_eq!(positions.dim(), (REPORTED_JOINT_COUNT, 3));
        assert_eq!(positions[[3, 2]], 2000.0);

        let centroid = sample.centroid();
        assert!((centroid - Vector3::new(100.0, -50.0, 2000.0)).norm() < 1e-3);
    }

    #[test]
    fn test_min_confidence() {
        let sample = SkeletonBuilder::new()
            .all_confidence(JointConfidence::High)
            .confidence(JointId::WristLeft, JointConfidence::Low)
            .build()
            .sample(1);
        assert_eq!(sample.min_confidence(), JointConfidence::Low);
    }
}
