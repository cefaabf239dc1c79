//! Session-level motion analyzer combining rep counting and form rules.

use formpulse_core::{FeedbackItem, KeypointFrame, SessionId};
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseType;
use crate::rep_counter::{RepCounter, RepCounterState};
use crate::rules;

/// Result of analyzing one keypoint frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub rep_state: RepCounterState,
    pub feedback: Vec<FeedbackItem>,
}

/// One analysis session: a single tracked subject performing a single
/// exercise.
///
/// Synchronous-per-frame and single-threaded by design; the caller drives
/// it from its frame callback and owns frame dropping if the source runs
/// ahead. Create one instance per concurrent session rather than sharing.
#[derive(Debug)]
pub struct MotionAnalyzer {
    session_id: SessionId,
    exercise: ExerciseType,
    counter: RepCounter,
}

impl MotionAnalyzer {
    pub fn new(exercise: ExerciseType) -> Self {
        let session_id = SessionId::new();
        tracing::debug!(session = ?session_id, exercise = %exercise, "analysis session started");
        Self {
            session_id,
            exercise,
            counter: RepCounter::new(exercise),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Switch exercise mid-session.
    ///
    /// Atomically resets counter state and the smoothing window before
    /// the next frame is processed; rep history from the previous
    /// exercise never leaks into the new one.
    pub fn set_exercise(&mut self, exercise: ExerciseType) {
        self.exercise = exercise;
        self.counter.set_exercise(exercise);
    }

    /// Reset rep count, phase, and angle history without changing the
    /// active exercise.
    pub fn reset(&mut self) {
        self.counter.reset();
    }

    /// Read-only snapshot of the rep counter
    pub fn state(&self) -> RepCounterState {
        self.counter.state()
    }

    /// Process one frame: advance the rep counter on the smoothed angle
    /// and evaluate the form rules on the raw keypoints. The two paths
    /// share the frame but never each other's state.
    pub fn analyze(&mut self, frame: &KeypointFrame) -> FrameAnalysis {
        let rep_state = self.counter.update(frame);
        let feedback = rules::evaluate(frame, self.exercise);

        FrameAnalysis {
            rep_state,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rep_counter::Phase;
    use formpulse_core::{Joint, KeypointDetection, Position2D, Timestamp};

    fn knee_frame(angle_deg: f64, timestamp_ms: i64) -> KeypointFrame {
        let mut frame = KeypointFrame::new(Timestamp::from_millis(timestamp_ms));

        let knee = Position2D::new(200.0, 300.0);
        let ankle = Position2D::new(200.0, 400.0);
        let theta = (90.0 - angle_deg).to_radians();
        let hip = Position2D::new(knee.x + 100.0 * theta.cos(), knee.y + 100.0 * theta.sin());

        for (first, vertex, last) in [
            (Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
            (Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
        ] {
            frame.set(KeypointDetection::new(first, hip, 0.9));
            frame.set(KeypointDetection::new(vertex, knee, 0.9));
            frame.set(KeypointDetection::new(last, ankle, 0.9));
        }

        frame
    }

    fn count_reps(analyzer: &mut MotionAnalyzer, t: &mut i64) {
        // Three full squat cycles, holding each position past the smoother lag
        for _ in 0..3 {
            for angle in [170.0, 85.0, 170.0] {
                for _ in 0..6 {
                    analyzer.analyze(&knee_frame(angle, *t));
                    *t += 66;
                }
            }
            *t += 600;
        }
    }

    #[test]
    fn test_exercise_switch_isolation() {
        let mut analyzer = MotionAnalyzer::new(ExerciseType::Squat);
        let mut t = 0;
        count_reps(&mut analyzer, &mut t);
        assert_eq!(analyzer.state().rep_count, 3);

        analyzer.set_exercise(ExerciseType::BicepCurl);
        let state = analyzer.state();
        assert_eq!(state.rep_count, 0);
        assert_eq!(state.current_phase, Phase::Idle);
        assert!(state.current_angle.is_none());
        assert_eq!(analyzer.exercise(), ExerciseType::BicepCurl);
    }

    #[test]
    fn test_reset_keeps_exercise() {
        let mut analyzer = MotionAnalyzer::new(ExerciseType::Squat);
        let mut t = 0;
        count_reps(&mut analyzer, &mut t);

        analyzer.reset();
        assert_eq!(analyzer.state().rep_count, 0);
        assert_eq!(analyzer.exercise(), ExerciseType::Squat);
    }

    #[test]
    fn test_analysis_produces_both_outputs() {
        let mut analyzer = MotionAnalyzer::new(ExerciseType::Squat);

        // Parallel depth: inside the acceptable band, so the rules stay
        // silent while the counter starts descending
        let analysis = analyzer.analyze(&knee_frame(100.0, 0));
        assert!(analysis.feedback.is_empty());
        assert_eq!(analysis.rep_state.current_phase, Phase::Descending);
        assert_eq!(analysis.rep_state.current_angle, Some(100));
    }

    #[test]
    fn test_shallow_depth_feedback_while_counting() {
        let mut analyzer = MotionAnalyzer::new(ExerciseType::Squat);

        // 150° knee angle: between the depth rule's 140° nag threshold
        // and the top range, so the rule fires while no rep counts yet
        let analysis = analyzer.analyze(&knee_frame(150.0, 0));
        assert_eq!(analysis.feedback.len(), 1);
        assert_eq!(analysis.feedback[0].body_part, "hips");
        assert_eq!(analysis.rep_state.rep_count, 0);
    }

    #[test]
    fn test_frame_analysis_serializes() {
        let mut analyzer = MotionAnalyzer::new(ExerciseType::Squat);
        let analysis = analyzer.analyze(&knee_frame(150.0, 0));

        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"rep_count\":0"));
        assert!(json.contains("\"severity\":\"info\""));
    }
}
