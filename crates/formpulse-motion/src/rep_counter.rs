//! Repetition counting via a phase state machine over smoothed joint angles.
//!
//! ## Phase cycle
//!
//! ```text
//! idle -> descending -> bottom -> ascending -> top -> descending -> ...
//! ```
//!
//! Down-up exercises count a rep on entering `top`; up-down exercises
//! count on re-entering `bottom` from `top`, completing the
//! contract-then-extend cycle. Hysteresis margins keep sensor noise at a
//! boundary from flapping between phases, and a minimum inter-rep
//! interval suppresses double counts from angle oscillation right at the
//! counting transition.

use formpulse_core::{detection_angle, KeypointFrame, Timestamp};
use serde::{Deserialize, Serialize};

use crate::config::{rep_config, CounterTuning, JointTriple, RepConfig, RepDirection};
use crate::exercise::ExerciseType;
use crate::smoother::AngleSmoother;

/// Position within a repetition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Descending,
    Bottom,
    Ascending,
    Top,
}

/// Mutable per-session counter state, updated once per processed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepCounterState {
    pub rep_count: u32,
    pub current_phase: Phase,
    /// Smoothed angle rounded to the nearest degree, for display
    pub current_angle: Option<i32>,
    pub last_rep_at: Option<Timestamp>,
    /// Set for a short flash window after each counted rep
    pub is_valid_rep: bool,
}

impl RepCounterState {
    fn initial() -> Self {
        Self {
            rep_count: 0,
            current_phase: Phase::Idle,
            current_angle: None,
            last_rep_at: None,
            is_valid_rep: false,
        }
    }
}

impl Default for RepCounterState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Rep counter for one analysis session.
///
/// Owned exclusively by the session controller and updated in place each
/// tick; exercises without a [`RepConfig`] leave the counter inert while
/// the form rule engine runs independently.
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: Option<RepConfig>,
    tuning: CounterTuning,
    smoother: AngleSmoother,
    state: RepCounterState,
}

impl RepCounter {
    pub fn new(exercise: ExerciseType) -> Self {
        Self::with_tuning(exercise, CounterTuning::default())
    }

    pub fn with_tuning(exercise: ExerciseType, tuning: CounterTuning) -> Self {
        Self {
            config: rep_config(exercise),
            tuning,
            smoother: AngleSmoother::new(tuning.smoothing_window),
            state: RepCounterState::initial(),
        }
    }

    /// Swap the active exercise, atomically resetting counter state and
    /// the smoothing window so nothing leaks between exercises.
    pub fn set_exercise(&mut self, exercise: ExerciseType) {
        self.config = rep_config(exercise);
        self.reset();
        tracing::debug!(exercise = %exercise, counted = self.config.is_some(), "rep counter reconfigured");
    }

    pub fn reset(&mut self) {
        self.state = RepCounterState::initial();
        self.smoother.clear();
    }

    /// Read-only snapshot of the current state
    pub fn state(&self) -> RepCounterState {
        self.state
    }

    pub fn is_counting(&self) -> bool {
        self.config.is_some()
    }

    /// Process one keypoint frame.
    ///
    /// No config, or any required joint below the confidence threshold,
    /// means no signal this frame: the prior state is returned unchanged.
    /// That is the designed behavior for partial visibility, not an error.
    pub fn update(&mut self, frame: &KeypointFrame) -> RepCounterState {
        let Some(config) = self.config else {
            return self.state;
        };

        let Some(raw_angle) = self.measure_angle(&config, frame) else {
            return self.state;
        };

        self.decay_rep_flash(frame.timestamp);

        let smoothed = self.smoother.push(raw_angle);
        self.state.current_angle = Some(smoothed.round() as i32);
        self.advance(&config, smoothed, frame.timestamp);

        self.state
    }

    /// Angle of the configured triple, averaged with the secondary side
    /// when configured and both sides are confidently visible.
    fn measure_angle(&self, config: &RepConfig, frame: &KeypointFrame) -> Option<f64> {
        let primary = self.triple_angle(&config.primary, frame)?;

        if config.use_average {
            if let Some(secondary) = &config.secondary {
                if let Some(angle) = self.triple_angle(secondary, frame) {
                    return Some((primary + angle) / 2.0);
                }
            }
        }

        Some(primary)
    }

    fn triple_angle(&self, triple: &JointTriple, frame: &KeypointFrame) -> Option<f64> {
        let threshold = self.tuning.confidence_threshold;
        let p1 = frame.confident(triple.first, threshold)?;
        let vertex = frame.confident(triple.vertex, threshold)?;
        let p3 = frame.confident(triple.last, threshold)?;
        Some(detection_angle(p1, vertex, p3))
    }

    /// One state-machine step on a smoothed angle.
    fn advance(&mut self, config: &RepConfig, angle: f64, now: Timestamp) {
        let (bottom_min, bottom_max) = config.bottom_range;
        let (top_min, top_max) = config.top_range;

        let at_bottom = angle >= bottom_min && angle <= bottom_max;
        let at_top = angle >= top_min && angle <= top_max;

        let previous = self.state.current_phase;

        match self.state.current_phase {
            Phase::Idle => match config.direction {
                // Squats, deadlifts: the cycle starts by going down
                RepDirection::DownUp => {
                    if angle < top_min - self.tuning.idle_margin {
                        self.state.current_phase = Phase::Descending;
                    }
                }
                // Presses, curls: the cycle starts by flexing up
                RepDirection::UpDown => {
                    if angle > bottom_max + self.tuning.idle_margin {
                        self.state.current_phase = Phase::Ascending;
                    }
                }
            },

            Phase::Descending => {
                if at_bottom {
                    self.state.current_phase = Phase::Bottom;
                }
            }

            Phase::Bottom => {
                if angle > bottom_max + self.tuning.bottom_exit_margin {
                    self.state.current_phase = Phase::Ascending;
                }
            }

            Phase::Ascending => {
                if at_top {
                    self.state.current_phase = Phase::Top;
                    // Up-down movements reach the extended "top" before the
                    // working rep is complete, so only down-up counts here.
                    if config.direction == RepDirection::DownUp {
                        self.count_rep(now);
                    }
                }
            }

            Phase::Top => {
                if angle < top_min - self.tuning.idle_margin {
                    self.state.current_phase = Phase::Descending;
                }
                // Up-down movements complete the cycle on bottom re-entry
                if config.direction == RepDirection::UpDown && at_bottom {
                    self.count_rep(now);
                    self.state.current_phase = Phase::Bottom;
                }
            }
        }

        if self.state.current_phase != previous {
            tracing::trace!(
                from = ?previous,
                to = ?self.state.current_phase,
                angle,
                "phase transition"
            );
        }
    }

    fn count_rep(&mut self, now: Timestamp) {
        if let Some(last) = self.state.last_rep_at {
            if now.millis_since(last) < self.tuning.min_rep_interval_ms {
                return;
            }
        }

        self.state.rep_count += 1;
        self.state.last_rep_at = Some(now);
        self.state.is_valid_rep = true;
        tracing::debug!(rep_count = self.state.rep_count, "rep counted");
    }

    /// Clear the valid-rep flash once its window has elapsed. The core is
    /// synchronous-per-frame, so the flag decays on a later frame rather
    /// than via a timer.
    fn decay_rep_flash(&mut self, now: Timestamp) {
        if self.state.is_valid_rep {
            if let Some(last) = self.state.last_rep_at {
                if now.millis_since(last) >= self.tuning.rep_flash_ms {
                    self.state.is_valid_rep = false;
                }
            }
        }
    }
}
