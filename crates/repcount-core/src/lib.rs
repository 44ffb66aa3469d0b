//! # Repcount-Core
//!
//! Core types and utilities for counting exercise repetitions from
//! per-frame body landmarks.
//!
//! Landmarks arrive from an external pose estimator as normalized image
//! coordinates (y grows downward). Every angle in this workspace is a planar
//! joint angle in degrees, computed from the projection of those landmarks
//! onto the image plane.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
