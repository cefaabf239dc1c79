//! Fundamental types for the Formpulse motion-analysis engine.

use chrono::Utc;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one analysis session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed since an earlier timestamp
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

/// 17-joint skeletal keypoint definition (COCO format)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Joint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Joint {
    pub const COUNT: usize = 17;

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEye),
            2 => Some(Self::RightEye),
            3 => Some(Self::LeftEar),
            4 => Some(Self::RightEar),
            5 => Some(Self::LeftShoulder),
            6 => Some(Self::RightShoulder),
            7 => Some(Self::LeftElbow),
            8 => Some(Self::RightElbow),
            9 => Some(Self::LeftWrist),
            10 => Some(Self::RightWrist),
            11 => Some(Self::LeftHip),
            12 => Some(Self::RightHip),
            13 => Some(Self::LeftKnee),
            14 => Some(Self::RightKnee),
            15 => Some(Self::LeftAnkle),
            16 => Some(Self::RightAnkle),
            _ => None,
        }
    }

    /// Canonical label emitted by the upstream pose model
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nose" => Some(Self::Nose),
            "left_eye" => Some(Self::LeftEye),
            "right_eye" => Some(Self::RightEye),
            "left_ear" => Some(Self::LeftEar),
            "right_ear" => Some(Self::RightEar),
            "left_shoulder" => Some(Self::LeftShoulder),
            "right_shoulder" => Some(Self::RightShoulder),
            "left_elbow" => Some(Self::LeftElbow),
            "right_elbow" => Some(Self::RightElbow),
            "left_wrist" => Some(Self::LeftWrist),
            "right_wrist" => Some(Self::RightWrist),
            "left_hip" => Some(Self::LeftHip),
            "right_hip" => Some(Self::RightHip),
            "left_knee" => Some(Self::LeftKnee),
            "right_knee" => Some(Self::RightKnee),
            "left_ankle" => Some(Self::LeftAnkle),
            "right_ankle" => Some(Self::RightAnkle),
            _ => None,
        }
    }
}

/// 2D position in image-plane coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Single joint detection with confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointDetection {
    pub joint: Joint,
    pub position: Position2D,
    pub confidence: f32,
}

impl KeypointDetection {
    pub fn new(joint: Joint, position: Position2D, confidence: f32) -> Self {
        Self {
            joint,
            position,
            confidence,
        }
    }
}

/// One frame of pose-model output for a single tracked subject.
///
/// Produced fresh each animation tick by the upstream estimator; the
/// analysis core reads it for one processing cycle and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypointFrame {
    pub timestamp: Timestamp,
    pub keypoints: [Option<KeypointDetection>; Joint::COUNT],
}

impl KeypointFrame {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            keypoints: [None; Joint::COUNT],
        }
    }

    pub fn set(&mut self, detection: KeypointDetection) {
        self.keypoints[detection.joint as usize] = Some(detection);
    }

    pub fn get(&self, joint: Joint) -> Option<&KeypointDetection> {
        self.keypoints[joint as usize].as_ref()
    }

    /// Lookup gated on the detection confidence threshold.
    ///
    /// A joint below threshold is treated the same as a joint the model
    /// did not report at all.
    pub fn confident(&self, joint: Joint, threshold: f32) -> Option<&KeypointDetection> {
        self.get(joint).filter(|kp| kp.confidence >= threshold)
    }

    pub fn detected_count(&self) -> usize {
        self.keypoints.iter().flatten().count()
    }
}

/// Severity of a form-correction message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Form-correction feedback produced by the rule engine.
///
/// Identifier and timestamp are attached by the feedback-history
/// collaborator; the core only produces the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub message: String,
    pub severity: Severity,
    pub body_part: String,
}

impl FeedbackItem {
    pub fn new(message: impl Into<String>, severity: Severity, body_part: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            body_part: body_part.into(),
        }
    }
}
