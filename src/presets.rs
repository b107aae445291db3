//! Built-in movement tables.

use crate::landmark::*;
use crate::movement::{AngleSpec, Comparator, MovementConfig, PositionSpec, VisibilityPolicy};

pub const RIGHT_ARM_EXTENSION: &str = "right arm extension";
pub const LEFT_ARM_EXTENSION: &str = "left arm extension";
pub const SIT_TO_STAND: &str = "sit to stand";

/// Forearm opens past 130° with the upper arm raised past 30° from the torso.
pub fn right_arm_extension() -> MovementConfig {
    MovementConfig::new(
        RIGHT_ARM_EXTENSION,
        vec![
            AngleSpec::new(RIGHT_WRIST, RIGHT_ELBOW, LEFT_SHOULDER, 130.0),
            AngleSpec::new(RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_HIP, 30.0),
        ],
    )
    .with_positions(vec![PositionSpec::new(
        RIGHT_ELBOW,
        RIGHT_SHOULDER,
        Comparator::GreaterThan,
        1.0,
    )])
}

pub fn left_arm_extension() -> MovementConfig {
    MovementConfig::new(
        LEFT_ARM_EXTENSION,
        vec![
            AngleSpec::new(LEFT_WRIST, LEFT_ELBOW, LEFT_SHOULDER, 130.0),
            AngleSpec::new(LEFT_ELBOW, LEFT_SHOULDER, LEFT_HIP, 30.0),
        ],
    )
    .with_positions(vec![PositionSpec::new(
        LEFT_ELBOW,
        LEFT_SHOULDER,
        Comparator::GreaterThan,
        1.0,
    )])
}

/// Knees and hips both straighten past 150° with the hips risen to within
/// 0.2 of knee height.
pub fn sit_to_stand() -> MovementConfig {
    MovementConfig::new(
        SIT_TO_STAND,
        vec![
            AngleSpec::new(RIGHT_ANKLE, RIGHT_KNEE, RIGHT_HIP, 150.0),
            AngleSpec::new(LEFT_ANKLE, LEFT_KNEE, LEFT_HIP, 150.0),
            AngleSpec::new(RIGHT_KNEE, RIGHT_HIP, RIGHT_SHOULDER, 150.0),
            AngleSpec::new(LEFT_KNEE, LEFT_HIP, LEFT_SHOULDER, 150.0),
        ],
    )
    .with_positions(vec![
        PositionSpec::new(LEFT_KNEE, LEFT_HIP, Comparator::GreaterThan, 0.2),
        PositionSpec::new(RIGHT_KNEE, RIGHT_HIP, Comparator::GreaterThan, 0.2),
    ])
    .with_visibility(VisibilityPolicy::Ignored)
}

pub fn all() -> Vec<MovementConfig> {
    vec![right_arm_extension(), left_arm_extension(), sit_to_stand()]
}
