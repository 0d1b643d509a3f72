//! Synthetic standing pose used by the simulated tracker.

use std::f32::consts::TAU;
use std::time::Duration;

use nalgebra::{UnitQuaternion, Vector3};

use crate::body::{Joint, JointConfidence, JointId, Skeleton, SkeletonBuilder};

/// Joint offsets from the pelvis in millimetres, y pointing down.
const STANDING: [(JointId, [f32; 3]); 32] = [
    (JointId::Pelvis, [0.0, 0.0, 0.0]),
    (JointId::SpineNavel, [0.0, -180.0, 10.0]),
    (JointId::SpineChest, [0.0, -360.0, 20.0]),
    (JointId::Neck, [0.0, -560.0, 20.0]),
    (JointId::ClavicleLeft, [-40.0, -520.0, 20.0]),
    (JointId::ShoulderLeft, [-170.0, -500.0, 30.0]),
    (JointId::ElbowLeft, [-200.0, -230.0, 40.0]),
    (JointId::WristLeft, [-210.0, 20.0, 50.0]),
    (JointId::HandLeft, [-215.0, 90.0, 50.0]),
    (JointId::HandTipLeft, [-220.0, 170.0, 50.0]),
    (JointId::ThumbLeft, [-190.0, 110.0, 20.0]),
    (JointId::ClavicleRight, [40.0, -520.0, 20.0]),
    (JointId::ShoulderRight, [170.0, -500.0, 30.0]),
    (JointId::ElbowRight, [200.0, -230.0, 40.0]),
    (JointId::WristRight, [210.0, 20.0, 50.0]),
    (JointId::HandRight, [215.0, 90.0, 50.0]),
    (JointId::HandTipRight, [220.0, 170.0, 50.0]),
    (JointId::ThumbRight, [190.0, 110.0, 20.0]),
    (JointId::HipLeft, [-90.0, 0.0, 0.0]),
    (JointId::KneeLeft, [-100.0, 420.0, 10.0]),
    (JointId::AnkleLeft, [-100.0, 820.0, 30.0]),
    (JointId::FootLeft, [-100.0, 860.0, -100.0]),
    (JointId::HipRight, [90.0, 0.0, 0.0]),
    (JointId::KneeRight, [100.0, 420.0, 10.0]),
    (JointId::AnkleRight, [100.0, 820.0, 30.0]),
    (JointId::FootRight, [100.0, 860.0, -100.0]),
    (JointId::Head, [0.0, -680.0, 20.0]),
    (JointId::Nose, [0.0, -660.0, -80.0]),
    (JointId::EyeLeft, [-35.0, -700.0, -60.0]),
    (JointId::EarLeft, [-75.0, -680.0, 10.0]),
    (JointId::EyeRight, [35.0, -700.0, -60.0]),
    (JointId::EarRight, [75.0, -680.0, 10.0]),
];

/// Pelvis of the first body, 2 m in front of the sensor.
const PELVIS: [f32; 3] = [0.0, 100.0, 2000.0];

/// Spacing between bodies along x.
const BODY_SPACING_MM: f32 = 800.0;

/// Peak sway about the vertical axis, in radians.
const SWAY_AMPLITUDE: f32 = 0.1;
const SWAY_HZ: f32 = 0.25;

fn confidence_for(id: JointId) -> JointConfidence {
    match id {
        JointId::HandTipLeft | JointId::ThumbLeft | JointId::HandTipRight | JointId::ThumbRight => {
            JointConfidence::Low
        }
        id if id >= JointId::Head => JointConfidence::Medium,
        _ => JointConfidence::High,
    }
}

/// A standing body swaying slowly about its pelvis.
///
/// `body_index` shifts the body sideways so several bodies do not overlap.
pub fn standing_pose(body_index: usize, t: Duration) -> Skeleton {
    let angle = SWAY_AMPLITUDE * (TAU * SWAY_HZ * t.as_secs_f32()).sin();
    let sway = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle);
    let pelvis = Vector3::new(
        PELVIS[0] + body_index as f32 * BODY_SPACING_MM,
        PELVIS[1],
        PELVIS[2],
    );

    STANDING
        .iter()
        .fold(SkeletonBuilder::new(), |builder, &(id, [x, y, z])| {
            let position = pelvis + sway * Vector3::new(x, y, z);
            builder.joint(id, Joint::new(position, *sway.quaternion(), confidence_for(id)))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_joint_in_order() {
        for (i, (id, _)) in STANDING.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_pelvis_stays_put_while_swaying() {
        let still = standing_pose(0, Duration::ZERO);
        let swayed = standing_pose(0, Duration::from_secs(1));

        assert_eq!(
            still.joint(JointId::Pelvis).position,
            swayed.joint(JointId::Pelvis).position
        );
        assert_ne!(
            still.joint(JointId::ShoulderLeft).position,
            swayed.joint(JointId::ShoulderLeft).position
        );
    }

    #[test]
    fn test_bodies_are_spaced_apart() {
        let a = standing_pose(0, Duration::ZERO);
        let b = standing_pose(1, Duration::ZERO);
        let dx = b.joint(JointId::Pelvis).position.x - a.joint(JointId::Pelvis).position.x;
        assert_eq!(dx, BODY_SPACING_MM);
    }

    #[test]
    fn test_confidence_levels() {
        let skeleton = standing_pose(0, Duration::ZERO);
        assert_eq!(skeleton.joint(JointId::Pelvis).confidence, JointConfidence::High);
        assert_eq!(skeleton.joint(JointId::ThumbRight).confidence, JointConfidence::Low);
        assert_eq!(skeleton.joint(JointId::EarLeft).confidence, JointConfidence::Medium);
    }
}
