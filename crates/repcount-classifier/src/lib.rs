//! # Repcount-Classifier
//!
//! Identifies which exercise is being performed from a window of frames.
//!
//! ## Pipeline
//!
//! 1. **Features**: (x, y) of a fixed landmark list per frame
//! 2. **Window**: frames accumulate until the configured size is reached
//! 3. **Centering**: each frame's features have their mean subtracted
//! 4. **Inference**: an external model yields per-frame class probabilities
//! 5. **Vote**: per-frame arg-max labels are reduced by majority, earliest
//!    label winning a tie
//!
//! The model and label decoder are supplied by the caller. They can be
//! called in-process through [`ExerciseClassifier`] or on a worker task
//! through [`ClassifierService`].

pub mod classifier;
pub mod features;
pub mod model;
pub mod resolver;
pub mod service;
pub mod vote;
pub mod window;

pub use classifier::*;
pub use features::*;
pub use model::*;
pub use resolver::*;
pub use service::*;
pub use vote::*;
pub use window::*;
