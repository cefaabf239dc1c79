//! Form-correctness rules evaluated against raw keypoints.
//!
//! Each rule is a pure, stateless predicate over one frame: it sees no
//! history, so a transient misread can fire spuriously. Debouncing noisy
//! feedback is the feedback-history collaborator's job, not this
//! engine's. Rules never short-circuit each other; a frame violating two
//! unrelated rules produces two feedback items.

use formpulse_core::{joint_angle, FeedbackItem, Joint, KeypointFrame, Severity};

use crate::exercise::ExerciseType;

/// Keypoint confidence below which a rule treats the joint as invisible
const RULE_CONFIDENCE: f32 = 0.3;

/// One independent form check.
///
/// `check` returns `None` both when the form is acceptable and when a
/// required joint is not confidently visible this frame.
pub trait FormRule: Sync {
    fn name(&self) -> &'static str;
    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem>;
}

/// Evaluate every rule in the active set for an exercise.
///
/// All firing rules emit in the same call; exercises without a specific
/// rule set fall back to the generic posture rules.
pub fn evaluate(frame: &KeypointFrame, exercise: ExerciseType) -> Vec<FeedbackItem> {
    rules_for(exercise)
        .iter()
        .filter_map(|rule| rule.check(frame))
        .collect()
}

/// Static rule set for an exercise
pub fn rules_for(exercise: ExerciseType) -> &'static [&'static dyn FormRule] {
    use ExerciseType::*;

    match exercise {
        Squat | GobletSquat => SQUAT_RULES,
        Lunge => LUNGE_RULES,
        Deadlift | RomanianDeadlift | KettlebellSwing => HINGE_RULES,
        HipThrust | GluteBridge => BRIDGE_RULES,
        PushUp | Plank | MountainClimber => BODY_LINE_RULES,
        BicepCurl => CURL_RULES,
        OverheadPress => PRESS_RULES,
        BenchPress | LatPulldown | PullUp | BarbellRow | DumbbellRow | LateralRaise
        | CalfRaise | Dips | General => GENERIC_RULES,
    }
}

const SQUAT_RULES: &[&dyn FormRule] = &[&SquatDepth, &ForwardLean];
const LUNGE_RULES: &[&dyn FormRule] = &[&LungeFrontKnee, &TorsoUpright];
const HINGE_RULES: &[&dyn FormRule] = &[&HingeBackAngle, &ForwardLean];
const BRIDGE_RULES: &[&dyn FormRule] = &[&BridgeLockout];
const BODY_LINE_RULES: &[&dyn FormRule] = &[&BodyLine];
const CURL_RULES: &[&dyn FormRule] = &[&ElbowDrift, &TorsoUpright];
const PRESS_RULES: &[&dyn FormRule] = &[&LumbarLean, &ElbowDrift];
const GENERIC_RULES: &[&dyn FormRule] = &[&TorsoUpright, &ShoulderLevel];

fn triple_angle(
    frame: &KeypointFrame,
    first: Joint,
    vertex: Joint,
    last: Joint,
) -> Option<f64> {
    let p1 = frame.confident(first, RULE_CONFIDENCE)?;
    let p2 = frame.confident(vertex, RULE_CONFIDENCE)?;
    let p3 = frame.confident(last, RULE_CONFIDENCE)?;
    Some(joint_angle(&p1.position, &p2.position, &p3.position))
}

/// Squat depth band: too deep strains the knees, too shallow is a partial rep
struct SquatDepth;

impl FormRule for SquatDepth {
    fn name(&self) -> &'static str {
        "knee-alignment"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let knee_angle =
            triple_angle(frame, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)?;

        if knee_angle < 70.0 {
            return Some(FeedbackItem::new(
                "You're going too deep - stop when thighs are parallel to ground",
                Severity::Warning,
                "knees",
            ));
        }

        if knee_angle > 140.0 {
            return Some(FeedbackItem::new(
                "Lower your hips more - aim for thighs parallel to ground",
                Severity::Info,
                "hips",
            ));
        }

        None
    }
}

/// Shoulders drifting forward of the hips
struct ForwardLean;

impl FormRule for ForwardLean {
    fn name(&self) -> &'static str {
        "back-straight"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let shoulder = frame.confident(Joint::LeftShoulder, RULE_CONFIDENCE)?;
        let hip = frame.confident(Joint::LeftHip, RULE_CONFIDENCE)?;

        let lean = shoulder.position.x - hip.position.x;
        if lean.abs() > 100.0 {
            return Some(FeedbackItem::new(
                "Keep your chest up and back straight",
                Severity::Warning,
                "back",
            ));
        }

        None
    }
}

/// Front knee collapsing past the toes in a lunge
struct LungeFrontKnee;

impl FormRule for LungeFrontKnee {
    fn name(&self) -> &'static str {
        "front-knee-angle"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let knee_angle =
            triple_angle(frame, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)?;

        if knee_angle < 80.0 {
            return Some(FeedbackItem::new(
                "Don't let your knee go past your toes - step further forward",
                Severity::Error,
                "knee",
            ));
        }

        None
    }
}

/// Head drifting forward of the hips
struct TorsoUpright;

impl FormRule for TorsoUpright {
    fn name(&self) -> &'static str {
        "torso-upright"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let nose = frame.confident(Joint::Nose, RULE_CONFIDENCE)?;
        let hip = frame.confident(Joint::LeftHip, RULE_CONFIDENCE)?;

        let tilt = (nose.position.x - hip.position.x).abs();
        if tilt > 80.0 {
            return Some(FeedbackItem::new(
                "Keep your torso upright - don't lean forward",
                Severity::Warning,
                "torso",
            ));
        }

        None
    }
}

/// Spine rounding during a hip hinge, read from the shoulder-hip-knee angle
struct HingeBackAngle;

impl FormRule for HingeBackAngle {
    fn name(&self) -> &'static str {
        "hinge-back-angle"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let hip_angle =
            triple_angle(frame, Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee)?;

        if hip_angle < 70.0 {
            return Some(FeedbackItem::new(
                "Keep your back flat - push your hips back instead of folding your spine",
                Severity::Error,
                "back",
            ));
        }

        None
    }
}

/// Incomplete hip extension at the top of a thrust or bridge
struct BridgeLockout;

impl FormRule for BridgeLockout {
    fn name(&self) -> &'static str {
        "hip-lockout"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let hip_angle =
            triple_angle(frame, Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee)?;
        let knee = frame.confident(Joint::LeftKnee, RULE_CONFIDENCE)?;
        let hip = frame.confident(Joint::LeftHip, RULE_CONFIDENCE)?;

        // Only meaningful near the top: hips above the knee line
        if hip.position.y < knee.position.y && hip_angle < 150.0 {
            return Some(FeedbackItem::new(
                "Squeeze your glutes and push your hips all the way up",
                Severity::Info,
                "hips",
            ));
        }

        None
    }
}

/// Hips sagging or piking out of the shoulder-hip-ankle line
struct BodyLine;

impl FormRule for BodyLine {
    fn name(&self) -> &'static str {
        "body-line"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let line_angle =
            triple_angle(frame, Joint::LeftShoulder, Joint::LeftHip, Joint::LeftAnkle)?;

        if line_angle < 150.0 {
            return Some(FeedbackItem::new(
                "Keep your body in a straight line - squeeze your glutes",
                Severity::Warning,
                "hips",
            ));
        }

        None
    }
}

/// Elbow swinging away from the torso during a curl or press
struct ElbowDrift;

impl FormRule for ElbowDrift {
    fn name(&self) -> &'static str {
        "elbow-drift"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let elbow = frame.confident(Joint::LeftElbow, RULE_CONFIDENCE)?;
        let shoulder = frame.confident(Joint::LeftShoulder, RULE_CONFIDENCE)?;

        let drift = (elbow.position.x - shoulder.position.x).abs();
        if drift > 50.0 {
            return Some(FeedbackItem::new(
                "Keep your elbows tucked close to your body",
                Severity::Warning,
                "elbows",
            ));
        }

        None
    }
}

/// Lower back arching under an overhead load
struct LumbarLean;

impl FormRule for LumbarLean {
    fn name(&self) -> &'static str {
        "lumbar-lean"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let shoulder = frame.confident(Joint::LeftShoulder, RULE_CONFIDENCE)?;
        let hip = frame.confident(Joint::LeftHip, RULE_CONFIDENCE)?;

        let arch = (shoulder.position.x - hip.position.x).abs();
        if arch > 70.0 {
            return Some(FeedbackItem::new(
                "Don't arch your lower back - brace your core",
                Severity::Warning,
                "back",
            ));
        }

        None
    }
}

/// One shoulder riding higher than the other
struct ShoulderLevel;

impl FormRule for ShoulderLevel {
    fn name(&self) -> &'static str {
        "shoulder-level"
    }

    fn check(&self, frame: &KeypointFrame) -> Option<FeedbackItem> {
        let left = frame.confident(Joint::LeftShoulder, RULE_CONFIDENCE)?;
        let right = frame.confident(Joint::RightShoulder, RULE_CONFIDENCE)?;

        let tilt = (left.position.y - right.position.y).abs();
        if tilt > 40.0 {
            return Some(FeedbackItem::new(
                "Keep your shoulders level",
                Severity::Info,
                "shoulders",
            ));
        }

        None
    }
}
