//! Per-exercise rep-counting configuration and tunable thresholds.

use formpulse_core::{Error, Joint, Result};
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseType;

/// Which end of the movement cycle the working position sits at.
///
/// Down-up movements (squat, deadlift, push-up) start extended and
/// descend first; up-down movements (curl, row, press) contract first.
/// The two count reps at opposite ends of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepDirection {
    DownUp,
    UpDown,
}

/// Three joints defining an angle, with `vertex` at the apex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub first: Joint,
    pub vertex: Joint,
    pub last: Joint,
}

impl JointTriple {
    pub const fn new(first: Joint, vertex: Joint, last: Joint) -> Self {
        Self { first, vertex, last }
    }
}

/// Static rep-counting configuration for one exercise.
///
/// `bottom_range` is the contracted posture and must lie numerically
/// below `top_range` (the extended posture); exercises whose range of
/// motion is not countable from a single joint angle have no config at
/// all and are simply not rep-counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepConfig {
    pub primary: JointTriple,
    pub secondary: Option<JointTriple>,
    /// [min, max] degrees at the bottom (contracted) end
    pub bottom_range: (f64, f64),
    /// [min, max] degrees at the top (extended) end
    pub top_range: (f64, f64),
    pub direction: RepDirection,
    /// Average the primary and secondary (left/right) angles when both visible
    pub use_average: bool,
}

impl RepConfig {
    pub fn validate(&self) -> Result<()> {
        let (b_min, b_max) = self.bottom_range;
        let (t_min, t_max) = self.top_range;
        if b_min >= b_max || t_min >= t_max {
            return Err(Error::InvalidRepConfig(format!(
                "empty angle range: bottom ({b_min}, {b_max}), top ({t_min}, {t_max})"
            )));
        }
        if b_max >= t_min {
            return Err(Error::OverlappingRanges {
                bottom: self.bottom_range,
                top: self.top_range,
            });
        }
        Ok(())
    }
}

const fn left_knee() -> JointTriple {
    JointTriple::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)
}

const fn right_knee() -> JointTriple {
    JointTriple::new(Joint::RightHip, Joint::RightKnee, Joint::RightAnkle)
}

const fn left_hip() -> JointTriple {
    JointTriple::new(Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee)
}

const fn right_hip() -> JointTriple {
    JointTriple::new(Joint::RightShoulder, Joint::RightHip, Joint::RightKnee)
}

const fn left_elbow() -> JointTriple {
    JointTriple::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist)
}

const fn right_elbow() -> JointTriple {
    JointTriple::new(Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist)
}

/// Lookup the rep-counting configuration for an exercise.
///
/// `None` means the exercise is not rep-counted (plank, carries,
/// fast-alternating movements, and the generic fallback); the form rule
/// engine still runs for those.
pub fn rep_config(exercise: ExerciseType) -> Option<RepConfig> {
    use ExerciseType::*;

    let config = match exercise {
        Squat | GobletSquat => RepConfig {
            primary: left_knee(),
            secondary: Some(right_knee()),
            bottom_range: (70.0, 100.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        Lunge => RepConfig {
            primary: left_knee(),
            secondary: None,
            bottom_range: (80.0, 110.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: false,
        },
        Deadlift => RepConfig {
            primary: left_hip(),
            secondary: Some(right_hip()),
            bottom_range: (80.0, 110.0),
            top_range: (170.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        RomanianDeadlift => RepConfig {
            primary: left_hip(),
            secondary: Some(right_hip()),
            bottom_range: (80.0, 120.0),
            top_range: (170.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        BenchPress => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (70.0, 100.0),
            top_range: (150.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        OverheadPress => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (70.0, 100.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::UpDown,
            use_average: true,
        },
        BicepCurl => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (30.0, 60.0),
            top_range: (140.0, 170.0),
            direction: RepDirection::UpDown,
            use_average: true,
        },
        LatPulldown | PullUp => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (40.0, 70.0),
            top_range: (140.0, 170.0),
            direction: RepDirection::UpDown,
            use_average: true,
        },
        BarbellRow => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (40.0, 80.0),
            top_range: (140.0, 170.0),
            direction: RepDirection::UpDown,
            use_average: true,
        },
        DumbbellRow => RepConfig {
            primary: left_elbow(),
            secondary: None,
            bottom_range: (40.0, 80.0),
            top_range: (140.0, 170.0),
            direction: RepDirection::UpDown,
            use_average: false,
        },
        PushUp | Dips => RepConfig {
            primary: left_elbow(),
            secondary: Some(right_elbow()),
            bottom_range: (70.0, 100.0),
            top_range: (150.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        HipThrust => RepConfig {
            primary: left_hip(),
            secondary: Some(right_hip()),
            bottom_range: (80.0, 120.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        GluteBridge => RepConfig {
            primary: left_hip(),
            secondary: Some(right_hip()),
            bottom_range: (80.0, 120.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: true,
        },
        CalfRaise => RepConfig {
            primary: JointTriple::new(Joint::LeftKnee, Joint::LeftAnkle, Joint::LeftAnkle),
            secondary: None,
            bottom_range: (80.0, 100.0),
            top_range: (160.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: false,
        },
        // No countable single-joint range of motion
        LateralRaise | KettlebellSwing | MountainClimber | Plank | General => return None,
    };

    Some(config)
}

/// Tunable thresholds for rep counting.
///
/// The margins and intervals are empirically chosen against recorded rep
/// sequences rather than derived from movement physics; treat them as
/// configuration when validating new exercise types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CounterTuning {
    /// Minimum keypoint confidence for a joint to count as visible
    pub confidence_threshold: f32,
    /// Rolling-average window length, in samples
    pub smoothing_window: usize,
    /// Degrees past the resting range before leaving `idle`
    pub idle_margin: f64,
    /// Degrees past the bottom range before leaving `bottom` (must exceed
    /// the idle margin: escaping the bottom is a decisive movement, not noise)
    pub bottom_exit_margin: f64,
    /// Minimum milliseconds between counted reps
    pub min_rep_interval_ms: i64,
    /// Milliseconds the `is_valid_rep` flash flag stays set
    pub rep_flash_ms: i64,
}

impl Default for CounterTuning {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            smoothing_window: 5,
            idle_margin: 10.0,
            bottom_exit_margin: 15.0,
            min_rep_interval_ms: 500,
            rep_flash_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_configs_valid() {
        let all = [
            ExerciseType::Squat,
            ExerciseType::GobletSquat,
            ExerciseType::Lunge,
            ExerciseType::Deadlift,
            ExerciseType::RomanianDeadlift,
            ExerciseType::BenchPress,
            ExerciseType::OverheadPress,
            ExerciseType::BicepCurl,
            ExerciseType::LatPulldown,
            ExerciseType::PullUp,
            ExerciseType::BarbellRow,
            ExerciseType::DumbbellRow,
            ExerciseType::PushUp,
            ExerciseType::HipThrust,
            ExerciseType::GluteBridge,
            ExerciseType::LateralRaise,
            ExerciseType::CalfRaise,
            ExerciseType::KettlebellSwing,
            ExerciseType::MountainClimber,
            ExerciseType::Plank,
            ExerciseType::Dips,
            ExerciseType::General,
        ];

        for exercise in all {
            if let Some(config) = rep_config(exercise) {
                config.validate().unwrap();
            }
        }
    }

    #[test]
    fn test_uncounted_exercises_have_no_config() {
        assert!(rep_config(ExerciseType::Plank).is_none());
        assert!(rep_config(ExerciseType::General).is_none());
        assert!(rep_config(ExerciseType::MountainClimber).is_none());
    }

    #[test]
    fn test_overlapping_ranges_rejected() {
        let config = RepConfig {
            primary: left_knee(),
            secondary: None,
            bottom_range: (70.0, 160.0),
            top_range: (150.0, 180.0),
            direction: RepDirection::DownUp,
            use_average: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_curl_counts_at_contracted_end() {
        let config = rep_config(ExerciseType::BicepCurl).unwrap();
        assert_eq!(config.direction, RepDirection::UpDown);
        assert!(config.bottom_range.1 < config.top_range.0);
    }
}
