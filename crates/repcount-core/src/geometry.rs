//! Planar joint geometry.

use nalgebra::{Point2, Vector2};

use crate::types::{BodyLandmark, PoseLandmarks};

/// Vertical shoulder-to-hip distance above which a torso counts as upright
/// (normalized image units).
pub const STANDING_THRESHOLD: f64 = 0.3;

const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// Angle at vertex `b` formed by `a` and `c`, in degrees within [0, 180].
///
/// Takes the difference of the two segment headings and reflects anything
/// past a half turn. A zero-length segment yields 0.
pub fn angle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let ba: Vector2<f64> = a - b;
    let bc: Vector2<f64> = c - b;

    if ba.norm() < MIN_SEGMENT_LENGTH || bc.norm() < MIN_SEGMENT_LENGTH {
        return 0.0;
    }

    let radians = bc.y.atan2(bc.x) - ba.y.atan2(ba.x);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Joint angle between three landmarks of a pose, vertex in the middle
pub fn joint_angle(
    pose: &PoseLandmarks,
    a: BodyLandmark,
    vertex: BodyLandmark,
    c: BodyLandmark,
) -> f64 {
    angle(&pose.planar(a), &pose.planar(vertex), &pose.planar(c))
}

/// True when the hip sits more than `threshold` below (or above) the shoulder
pub fn is_standing(shoulder: &Point2<f64>, hip: &Point2<f64>, threshold: f64) -> bool {
    (hip.y - shoulder.y).abs() > threshold
}
