//! Fundamental types for the repetition counting system.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Unique identifier for a counting session
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

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }
}

/// A single body keypoint in normalized image coordinates.
///
/// `x` and `y` are in [0, 1] with `y` growing downward. `z` is the
/// estimator's relative depth when it provides one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Projection onto the image plane
    pub fn planar(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// 33-point body landmark topology produced by the pose estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    pub const COUNT: usize = 33;

    /// Every landmark, ordered by estimator index
    pub const ALL: [BodyLandmark; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for BodyLandmark {
    type Error = Error;

    fn try_from(idx: u8) -> Result<Self> {
        Self::from_index(idx).ok_or(Error::UnknownLandmark(idx))
    }
}

/// Complete landmark set for one frame, indexed by [`BodyLandmark`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct PoseLandmarks {
    points: Vec<Landmark>,
}

impl PoseLandmarks {
    /// Build a landmark set, rejecting anything but exactly
    /// [`BodyLandmark::COUNT`] points.
    pub fn new(points: Vec<Landmark>) -> Result<Self> {
        if points.len() != BodyLandmark::COUNT {
            return Err(Error::LandmarkCount {
                expected: BodyLandmark::COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Parse a JSON array of 33 `{x, y[, z]}` objects
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, landmark: BodyLandmark) -> &Landmark {
        &self.points[landmark.index()]
    }

    /// Replace a single landmark
    pub fn set(&mut self, landmark: BodyLandmark, value: Landmark) {
        self.points[landmark.index()] = value;
    }

    pub fn planar(&self, landmark: BodyLandmark) -> Point2<f64> {
        self.get(landmark).planar()
    }
}

impl Default for PoseLandmarks {
    fn default() -> Self {
        Self {
            points: vec![Landmark::default(); BodyLandmark::COUNT],
        }
    }
}

impl TryFrom<Vec<Landmark>> for PoseLandmarks {
    type Error = Error;

    fn try_from(points: Vec<Landmark>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PoseLandmarks> for Vec<Landmark> {
    fn from(pose: PoseLandmarks) -> Self {
        pose.points
    }
}

/// Phase of the current repetition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// No starting posture seen yet
    #[default]
    Start,
    /// Extended position; start and end of a rep
    Eccentric,
    /// Contracted position; midpoint of a rep
    Concentric,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Eccentric => "eccentric",
            Stage::Concentric => "concentric",
        };
        f.write_str(name)
    }
}

/// Exercise variants with a phase policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    PushUp,
    Squat,
    Dip,
    SitUp,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::PushUp,
        ExerciseKind::Squat,
        ExerciseKind::Dip,
        ExerciseKind::SitUp,
    ];

    /// Map a classifier label onto an exercise.
    ///
    /// Accepts the trained encoder's classes (`pushup`, `squats`, `dips`,
    /// `situp`) and their singular or underscored spellings.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "pushup" | "pushups" | "push_up" => Ok(ExerciseKind::PushUp),
            "squats" | "squat" => Ok(ExerciseKind::Squat),
            "dips" | "dip" => Ok(ExerciseKind::Dip),
            "situp" | "situps" | "sit_up" => Ok(ExerciseKind::SitUp),
            _ => Err(Error::UnknownExercise(label.to_string())),
        }
    }

    /// Canonical classifier label
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::PushUp => "pushup",
            ExerciseKind::Squat => "squats",
            ExerciseKind::Dip => "dips",
            ExerciseKind::SitUp => "situp",
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseKind::PushUp => "push-up",
            ExerciseKind::Squat => "squat",
            ExerciseKind::Dip => "dip",
            ExerciseKind::SitUp => "sit-up",
        };
        f.write_str(name)
    }
}
