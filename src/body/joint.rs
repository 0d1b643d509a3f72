//! Joint identifiers and per-joint pose data.

use nalgebra::{Quaternion, Vector3};

use crate::body::JointConfidence;

/// The 32 joints reported by the body tracker, in SDK index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointId {
    Pelvis,
    SpineNavel,
    SpineChest,
    Neck,
    ClavicleLeft,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    HandTipLeft,
    ThumbLeft,
    ClavicleRight,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HandTipRight,
    ThumbRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    Head,
    Nose,
    EyeLeft,
    EarLeft,
    EyeRight,
    EarRight,
}

impl JointId {
    pub const ALL: [JointId; 32] = [
        Self::Pelvis,
        Self::SpineNavel,
        Self::SpineChest,
        Self::Neck,
        Self::ClavicleLeft,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::ClavicleRight,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HandTipRight,
        Self::ThumbRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::Head,
        Self::Nose,
        Self::EyeLeft,
        Self::EarLeft,
        Self::EyeRight,
        Self::EarRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// SDK-style upper case name, e.g. `SHOULDER_LEFT`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pelvis => "PELVIS",
            Self::SpineNavel => "SPINE_NAVEL",
            Self::SpineChest => "SPINE_CHEST",
            Self::Neck => "NECK",
            Self::ClavicleLeft => "CLAVICLE_LEFT",
            Self::ShoulderLeft => "SHOULDER_LEFT",
            Self::ElbowLeft => "ELBOW_LEFT",
            Self::WristLeft => "WRIST_LEFT",
            Self::HandLeft => "HAND_LEFT",
            Self::HandTipLeft => "HANDTIP_LEFT",
            Self::ThumbLeft => "THUMB_LEFT",
            Self::ClavicleRight => "CLAVICLE_RIGHT",
            Self::ShoulderRight => "SHOULDER_RIGHT",
            Self::ElbowRight => "ELBOW_RIGHT",
            Self::WristRight => "WRIST_RIGHT",
            Self::HandRight => "HAND_RIGHT",
            Self::HandTipRight => "HANDTIP_RIGHT",
            Self::ThumbRight => "THUMB_RIGHT",
            Self::HipLeft => "HIP_LEFT",
            Self::KneeLeft => "KNEE_LEFT",
            Self::AnkleLeft => "ANKLE_LEFT",
            Self::FootLeft => "FOOT_LEFT",
            Self::HipRight => "HIP_RIGHT",
            Self::KneeRight => "KNEE_RIGHT",
            Self::AnkleRight => "ANKLE_RIGHT",
            Self::FootRight => "FOOT_RIGHT",
            Self::Head => "HEAD",
            Self::Nose => "NOSE",
            Self::EyeLeft => "EYE_LEFT",
            Self::EarLeft => "EAR_LEFT",
            Self::EyeRight => "EYE_RIGHT",
            Self::EarRight => "EAR_RIGHT",
        }
    }
}

/// Pose of a single joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    /// Position in millimetres, depth camera coordinates
    pub position: Vector3<f32>,
    /// Orientation as a (w, x, y, z) quaternion
    pub orientation: Quaternion<f32>,
    pub confidence: JointConfidence,
}

impl Default for Joint {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: Quaternion::identity(),
            confidence: JointConfidence::None,
        }
    }
}

impl Joint {
    pub fn new(
        position: Vector3<f32>,
        orientation: Quaternion<f32>,
        confidence: JointConfidence,
    ) -> Self {
        Self {
            position,
            orientation,
            confidence,
        }
    }

    /// Orientation components in `[w, x, y, z]` order.
    pub fn wxyz(&self) -> [f32; 4] {
        let q = &self.orientation;
        [q.w, q.i, q.j, q.k]
    }
}
