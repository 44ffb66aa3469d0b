//! Per-exercise phase policies.
//!
//! Each exercise decides, from a single frame, whether the body is in its
//! extended (eccentric) or contracted (concentric) position. Only left-side
//! landmarks are read.

use repcount_core::{
    is_standing, joint_angle, BodyLandmark, ExerciseKind, PoseLandmarks, STANDING_THRESHOLD,
};
use serde::{Deserialize, Serialize};

use BodyLandmark::{LeftAnkle, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist};

/// Push-up thresholds (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushUpThresholds {
    /// Elbow angle above which the arms are locked out
    pub extended_elbow_min: f64,
    /// Elbow angle below which the chest is down
    pub flexed_elbow_max: f64,
    /// Exclusive lower bound of the straight-body hip band
    pub hip_band_min: f64,
    /// Exclusive upper bound of the straight-body hip band
    pub hip_band_max: f64,
}

impl Default for PushUpThresholds {
    fn default() -> Self {
        Self {
            extended_elbow_min: 160.0,
            flexed_elbow_max: 90.0,
            hip_band_min: 170.0,
            hip_band_max: 185.0,
        }
    }
}

/// Squat thresholds (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    /// Hip and knee angle above which the lifter is standing tall
    pub extended_min: f64,
    /// Hip and knee angle below which the lifter is at depth
    pub flexed_max: f64,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            extended_min: 160.0,
            flexed_max: 100.0,
        }
    }
}

/// Dip thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DipThresholds {
    pub extended_elbow_min: f64,
    pub flexed_elbow_max: f64,
    /// Shoulder-to-hip vertical distance for an upright torso (normalized units)
    pub standing_threshold: f64,
}

impl Default for DipThresholds {
    fn default() -> Self {
        Self {
            extended_elbow_min: 160.0,
            flexed_elbow_max: 100.0,
            standing_threshold: STANDING_THRESHOLD,
        }
    }
}

/// Sit-up thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitUpThresholds {
    /// Hip angle above which the torso is back on the floor
    pub extended_hip_min: f64,
    /// Hip angle below which the torso has curled up
    pub flexed_hip_max: f64,
    /// Torso counts as lying while shoulder and hip are within this vertical distance
    pub lying_threshold: f64,
}

impl Default for SitUpThresholds {
    fn default() -> Self {
        Self {
            extended_hip_min: 120.0,
            flexed_hip_max: 70.0,
            lying_threshold: STANDING_THRESHOLD,
        }
    }
}

/// Thresholds for every exercise, passed in at session construction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyThresholds {
    pub push_up: PushUpThresholds,
    pub squat: SquatThresholds,
    pub dip: DipThresholds,
    pub sit_up: SitUpThresholds,
}

/// Phase predicates for one exercise, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExercisePolicy {
    PushUp(PushUpThresholds),
    Squat(SquatThresholds),
    Dip(DipThresholds),
    SitUp(SitUpThresholds),
}

impl ExercisePolicy {
    pub fn for_kind(kind: ExerciseKind, thresholds: &PolicyThresholds) -> Self {
        match kind {
            ExerciseKind::PushUp => ExercisePolicy::PushUp(thresholds.push_up),
            ExerciseKind::Squat => ExercisePolicy::Squat(thresholds.squat),
            ExerciseKind::Dip => ExercisePolicy::Dip(thresholds.dip),
            ExerciseKind::SitUp => ExercisePolicy::SitUp(thresholds.sit_up),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExercisePolicy::PushUp(_) => ExerciseKind::PushUp,
            ExercisePolicy::Squat(_) => ExerciseKind::Squat,
            ExercisePolicy::Dip(_) => ExerciseKind::Dip,
            ExercisePolicy::SitUp(_) => ExerciseKind::SitUp,
        }
    }

    /// Whether the frame shows the extended starting position
    pub fn validate_eccentric(&self, pose: &PoseLandmarks) -> bool {
        match self {
            ExercisePolicy::PushUp(t) => {
                elbow_angle(pose) > t.extended_elbow_min && push_up_plank(pose, t)
            }
            ExercisePolicy::Squat(t) => {
                hip_angle(pose) > t.extended_min && knee_angle(pose) > t.extended_min
            }
            ExercisePolicy::Dip(t) => {
                elbow_angle(pose) > t.extended_elbow_min && upright(pose, t.standing_threshold)
            }
            ExercisePolicy::SitUp(t) => {
                hip_angle(pose) > t.extended_hip_min && !upright(pose, t.lying_threshold)
            }
        }
    }

    /// Whether the frame shows the contracted position
    pub fn validate_concentric(&self, pose: &PoseLandmarks) -> bool {
        match self {
            ExercisePolicy::PushUp(t) => {
                elbow_angle(pose) < t.flexed_elbow_max && push_up_plank(pose, t)
            }
            ExercisePolicy::Squat(t) => {
                hip_angle(pose) < t.flexed_max && knee_angle(pose) < t.flexed_max
            }
            ExercisePolicy::Dip(t) => {
                elbow_angle(pose) < t.flexed_elbow_max && upright(pose, t.standing_threshold)
            }
            ExercisePolicy::SitUp(t) => hip_angle(pose) < t.flexed_hip_max,
        }
    }
}

fn elbow_angle(pose: &PoseLandmarks) -> f64 {
    joint_angle(pose, LeftShoulder, LeftElbow, LeftWrist)
}

fn hip_angle(pose: &PoseLandmarks) -> f64 {
    joint_angle(pose, LeftShoulder, LeftHip, LeftKnee)
}

fn knee_angle(pose: &PoseLandmarks) -> f64 {
    joint_angle(pose, LeftHip, LeftKnee, LeftAnkle)
}

fn upright(pose: &PoseLandmarks, threshold: f64) -> bool {
    is_standing(&pose.planar(LeftShoulder), &pose.planar(LeftHip), threshold)
}

/// Straight body with hips above the wrists (image y grows downward)
fn push_up_plank(pose: &PoseLandmarks, t: &PushUpThresholds) -> bool {
    let hip = hip_angle(pose);
    hip > t.hip_band_min
        && hip < t.hip_band_max
        && pose.get(LeftHip).y < pose.get(LeftWrist).y
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn policy(kind: ExerciseKind) -> ExercisePolicy {
        ExercisePolicy::for_kind(kind, &PolicyThresholds::default())
    }

    #[test]
    fn test_push_up_phases() {
        let p = policy(ExerciseKind::PushUp);
        assert!(p.validate_eccentric(&push_up_top()));
        assert!(!p.validate_concentric(&push_up_top()));
        assert!(p.validate_concentric(&push_up_bottom()));
        assert!(!p.validate_eccentric(&push_up_bottom()));
        assert!(!p.validate_eccentric(&push_up_midway()));
        assert!(!p.validate_concentric(&push_up_midway()));
    }

    #[test]
    fn test_push_up_requires_hips_above_wrists() {
        let mut pose = push_up_top();
        // Wrists raised above the hips
        pose.set(BodyLandmark::LeftElbow, repcount_core::Landmark::new(0.3, 0.4));
        pose.set(BodyLandmark::LeftWrist, repcount_core::Landmark::new(0.3, 0.3));
        assert!(!policy(ExerciseKind::PushUp).validate_eccentric(&pose));
    }

    #[test]
    fn test_push_up_requires_straight_body() {
        let mut pose = push_up_top();
        // Piked hips: shoulder-hip-knee well below the band
        pose.set(BodyLandmark::LeftKnee, repcount_core::Landmark::new(0.45, 0.75));
        assert!(!policy(ExerciseKind::PushUp).validate_eccentric(&pose));
    }

    #[test]
    fn test_squat_phases() {
        let p = policy(ExerciseKind::Squat);
        assert!(p.validate_eccentric(&squat_top()));
        assert!(!p.validate_concentric(&squat_top()));
        assert!(p.validate_concentric(&squat_bottom()));
        assert!(!p.validate_eccentric(&squat_bottom()));
    }

    #[test]
    fn test_dip_phases() {
        let p = policy(ExerciseKind::Dip);
        assert!(p.validate_eccentric(&dip_top()));
        assert!(p.validate_concentric(&dip_bottom()));
        assert!(!p.validate_concentric(&dip_top()));
    }

    #[test]
    fn test_dip_requires_upright_torso() {
        let mut pose = dip_top();
        pose.set(BodyLandmark::LeftHip, repcount_core::Landmark::new(0.8, 0.4));
        assert!(!policy(ExerciseKind::Dip).validate_eccentric(&pose));

        // Elbow still flexed, but the torso has tipped over
        let mut pose = dip_bottom();
        pose.set(BodyLandmark::LeftHip, repcount_core::Landmark::new(0.8, 0.4));
        assert!(!policy(ExerciseKind::Dip).validate_concentric(&pose));
    }

    #[test]
    fn test_sit_up_phases() {
        let p = policy(ExerciseKind::SitUp);
        assert!(p.validate_eccentric(&sit_up_down()));
        assert!(!p.validate_concentric(&sit_up_down()));
        assert!(p.validate_concentric(&sit_up_up()));
        assert!(!p.validate_eccentric(&sit_up_up()));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let mut thresholds = PolicyThresholds::default();
        thresholds.squat.flexed_max = 50.0;
        let strict = ExercisePolicy::for_kind(ExerciseKind::Squat, &thresholds);
        assert!(!strict.validate_concentric(&squat_bottom()));
    }

    #[test]
    fn test_policy_kind_roundtrip() {
        for kind in ExerciseKind::ALL {
            assert_eq!(policy(kind).kind(), kind);
        }
    }
}
