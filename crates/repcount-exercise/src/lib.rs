//! # Repcount-Exercise
//!
//! Exercise phase policies and the stage machine that turns per-frame
//! phase decisions into completed repetitions.
//!
//! ## Exercises
//!
//! - **Push-up**: elbow angle with a straight-body hip band and hips above wrists
//! - **Squat**: hip and knee angles
//! - **Dip**: elbow angle with an upright torso
//! - **Sit-up**: hip angle with a lying torso at the bottom
//!
//! All angles are read from the left side of the body.

pub mod counter;
pub mod policy;
pub mod stage;

pub use counter::*;
pub use policy::*;
pub use stage::*;
