//! Per-frame feature extraction for exercise classification.
//!
//! A feature vector is the flattened (x, y) pairs of a fixed landmark list,
//! in list order. The order must match the one the model was trained on.

use repcount_core::{BodyLandmark, PoseLandmarks};

use BodyLandmark::*;

/// Landmarks the exercise model was trained on
pub const DETECTION_LANDMARKS: [BodyLandmark; 23] = [
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
];

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    landmarks: Vec<BodyLandmark>,
}

impl FeatureExtractor {
    pub fn new(landmarks: Vec<BodyLandmark>) -> Self {
        Self { landmarks }
    }

    /// Length of every vector produced by [`extract`](Self::extract)
    pub fn feature_count(&self) -> usize {
        self.landmarks.len() * 2
    }

    pub fn landmarks(&self) -> &[BodyLandmark] {
        &self.landmarks
    }

    pub fn extract(&self, pose: &PoseLandmarks) -> Vec<f64> {
        self.landmarks
            .iter()
            .flat_map(|&landmark| {
                let point = pose.get(landmark);
                [point.x, point.y]
            })
            .collect()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DETECTION_LANDMARKS.to_vec())
    }
}
