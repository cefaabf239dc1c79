//! Rolling-average smoothing of joint-angle samples.

use std::collections::VecDeque;

/// Bounded FIFO low-pass filter over angle samples.
///
/// Pose-estimation jitter is on the order of ±3–5°, enough to flutter a
/// phase boundary. A five-sample mean adds at most ~5 frames of lag,
/// imperceptible at typical camera frame rates (15–30 fps).
#[derive(Debug, Clone)]
pub struct AngleSmoother {
    window: VecDeque<f64>,
    capacity: usize,
}

impl AngleSmoother {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Push a raw sample and return the current smoothed value.
    ///
    /// With an empty window the first output equals the first input.
    pub fn push(&mut self, sample: f64) -> f64 {
        self.window.push_back(sample);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
