/// Confidence the tracker assigns to a joint estimate.
///
/// Levels are ordered, so `Low < High` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum JointConfidence {
    /// The joint is out of range
    #[default]
    None,
    /// The joint is not observed and its position is predicted
    Low,
    /// Medium confidence in the joint pose
    Medium,
    /// High confidence in the joint pose
    High,
}

impl JointConfidence {
    /// Label printed in joint dumps.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "K4ABT_JOINT_CONFIDENCE_NONE",
            Self::Low => "K4ABT_JOINT_CONFIDENCE_LOW",
            Self::Medium => "K4ABT_JOINT_CONFIDENCE_MEDIUM",
            Self::High => "K4ABT_JOINT_CONFIDENCE_HIGH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(JointConfidence::None < JointConfidence::Low);
        assert!(JointConfidence::Medium < JointConfidence::High);
        assert_eq!(
            [JointConfidence::High, JointConfidence::None].iter().min(),
            Some(&JointConfidence::None)
        );
    }
}
