//! Builder for assembling skeletons joint by joint.

use nalgebra::{Quaternion, Vector3};

use crate::body::{Joint, JointConfidence, JointId, Skeleton};

/// Builder for creating `Skeleton` values.
#[derive(Debug, Clone, Default)]
pub struct SkeletonBuilder {
    skeleton: Skeleton,
}

impl SkeletonBuilder {
    /// Create a builder with every joint at the origin, identity
    /// orientation and no confidence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a joint position in millimetres.
    pub fn position(mut self, id: JointId, x: f32, y: f32, z: f32) -> Self {
        self.skeleton.joints[id.index()].position = Vector3::new(x, y, z);
        self
    }

    /// Set a joint orientation in WXYZ order.
    pub fn orientation(mut self, id: JointId, w: f32, x: f32, y: f32, z: f32) -> Self {
        self.skeleton.joints[id.index()].orientation = Quaternion::new(w, x, y, z);
        self
    }

    /// Set the confidence of one joint.
    pub fn confidence(mut self, id: JointId, confidence: JointConfidence) -> Self {
        self.skeleton.joints[id.index()].confidence = confidence;
        self
    }

    /// Set the confidence of every joint.
    pub fn all_confidence(mut self, confidence: JointConfidence) -> Self {
        for joint in &mut self.skeleton.joints {
            joint.confidence = confidence;
        }
        self
    }

    /// Replace a whole joint.
    pub fn joint(mut self, id: JointId, joint: Joint) -> Self {
        self.skeleton.joints[id.index()] = joint;
        self
    }

    /// Translate every joint.
    pub fn offset(mut self, dx: f32, dy: f32, dz: f32) -> Self {
        let delta = Vector3::new(dx, dy, dz);
        for joint in &mut self.skeleton.joints {
            joint.position += delta;
        }
        self
    }

    /// Build the final `Skeleton`.
    pub fn build(self) -> Skeleton {
        self.skeleton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_builder() {
        let skeleton = SkeletonBuilder::new()
            .position(JointId::Head, 0.0, -600.0, 2000.0)
            .orientation(JointId::Head, 0.7, 0.0, 0.7, 0.0)
            .confidence(JointId::Head, JointConfidence::Medium)
            .offset(10.0, 0.0, 0.0)
            .build();

        let head = skeleton.joint(JointId::Head);
        assert_eq!(head.position, Vector3::new(10.0, -600.0, 2000.0));
        assert_eq!(head.wxyz(), [0.7, 0.0, 0.7, 0.0]);
        assert_eq!(head.confidence, JointConfidence::Medium);
        assert_eq!(skeleton.joint(JointId::Pelvis).confidence, JointConfidence::None);
    }
}
