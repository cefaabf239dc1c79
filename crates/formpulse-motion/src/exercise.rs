//! Exercise taxonomy and free-text name resolution.

use serde::{Deserialize, Serialize};

/// Closed set of exercises the engine understands.
///
/// Selected once per analysis session; switching resets all dependent
/// counter state. Names arriving from user-editable program data are
/// mapped onto this enum by [`ExerciseType::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    Squat,
    GobletSquat,
    Lunge,
    Deadlift,
    RomanianDeadlift,
    BenchPress,
    OverheadPress,
    BicepCurl,
    LatPulldown,
    PullUp,
    BarbellRow,
    DumbbellRow,
    PushUp,
    HipThrust,
    GluteBridge,
    LateralRaise,
    CalfRaise,
    KettlebellSwing,
    MountainClimber,
    Plank,
    Dips,
    /// Fallback for anything the resolver does not recognize
    General,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::GobletSquat => "goblet-squat",
            Self::Lunge => "lunge",
            Self::Deadlift => "deadlift",
            Self::RomanianDeadlift => "romanian-deadlift",
            Self::BenchPress => "bench-press",
            Self::OverheadPress => "overhead-press",
            Self::BicepCurl => "bicep-curl",
            Self::LatPulldown => "lat-pulldown",
            Self::PullUp => "pull-up",
            Self::BarbellRow => "barbell-row",
            Self::DumbbellRow => "dumbbell-row",
            Self::PushUp => "push-up",
            Self::HipThrust => "hip-thrust",
            Self::GluteBridge => "glute-bridge",
            Self::LateralRaise => "lateral-raise",
            Self::CalfRaise => "calf-raise",
            Self::KettlebellSwing => "kettlebell-swing",
            Self::MountainClimber => "mountain-climber",
            Self::Plank => "plank",
            Self::Dips => "dips",
            Self::General => "general",
        }
    }

    /// Map a free-text exercise name onto the closed enum.
    ///
    /// Total: patterns are matched most-specific-first over the
    /// lower-cased input ("romanian"/"rdl" before the generic "deadlift",
    /// "goblet" before "squat"), and anything unmatched lands on
    /// [`ExerciseType::General`]. Names come from user-editable program
    /// data, so this must never fail.
    pub fn resolve(name: &str) -> Self {
        let name = name.to_lowercase();

        if name.contains("goblet") {
            return Self::GobletSquat;
        }
        if name.contains("lunge") || name.contains("split squat") {
            return Self::Lunge;
        }
        if name.contains("squat") {
            return Self::Squat;
        }
        if name.contains("romanian") || name.contains("rdl") {
            return Self::RomanianDeadlift;
        }
        if name.contains("deadlift") {
            return Self::Deadlift;
        }
        if name.contains("bench") {
            return Self::BenchPress;
        }
        if name.contains("overhead") || name.contains("military") || name.contains("shoulder press")
        {
            return Self::OverheadPress;
        }
        if name.contains("curl") {
            return Self::BicepCurl;
        }
        if name.contains("pulldown") || name.contains("pull-down") || name.contains("pull down") {
            return Self::LatPulldown;
        }
        if name.contains("pull-up") || name.contains("pullup") || name.contains("chin") {
            return Self::PullUp;
        }
        if name.contains("dumbbell row") || name.contains("db row") || name.contains("single arm")
        {
            return Self::DumbbellRow;
        }
        if name.contains("row") {
            return Self::BarbellRow;
        }
        if name.contains("push-up") || name.contains("pushup") || name.contains("push up") {
            return Self::PushUp;
        }
        if name.contains("thrust") {
            return Self::HipThrust;
        }
        if name.contains("bridge") {
            return Self::GluteBridge;
        }
        if name.contains("lateral raise") || name.contains("side raise") {
            return Self::LateralRaise;
        }
        if name.contains("calf") {
            return Self::CalfRaise;
        }
        if name.contains("kettlebell") || name.contains("swing") {
            return Self::KettlebellSwing;
        }
        if name.contains("mountain") {
            return Self::MountainClimber;
        }
        if name.contains("plank") {
            return Self::Plank;
        }
        if name.contains("dip") {
            return Self::Dips;
        }

        Self::General
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_specific_before_generic() {
        assert_eq!(
            ExerciseType::resolve("Romanian Deadlift"),
            ExerciseType::RomanianDeadlift
        );
        assert_eq!(ExerciseType::resolve("Barbell RDL"), ExerciseType::RomanianDeadlift);
        assert_eq!(ExerciseType::resolve("Conventional Deadlift"), ExerciseType::Deadlift);
        assert_eq!(ExerciseType::resolve("Goblet Squat"), ExerciseType::GobletSquat);
        assert_eq!(ExerciseType::resolve("Back Squat 5x5"), ExerciseType::Squat);
        assert_eq!(ExerciseType::resolve("Lat Pulldown"), ExerciseType::LatPulldown);
        assert_eq!(ExerciseType::resolve("Weighted Pull-up"), ExerciseType::PullUp);
    }

    #[test]
    fn test_resolver_totality() {
        assert_eq!(ExerciseType::resolve(""), ExerciseType::General);
        assert_eq!(
            ExerciseType::resolve("xyz-unrecognized-456"),
            ExerciseType::General
        );
    }

    #[test]
    fn test_resolver_case_insensitive() {
        assert_eq!(ExerciseType::resolve("BENCH PRESS"), ExerciseType::BenchPress);
        assert_eq!(ExerciseType::resolve("bicep CURL"), ExerciseType::BicepCurl);
    }

    #[test]
    fn test_kebab_case_serde() {
        let json = serde_json::to_string(&ExerciseType::OverheadPress).unwrap();
        assert_eq!(json, "\"overhead-press\"");
        let back: ExerciseType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExerciseType::OverheadPress);
    }
}
