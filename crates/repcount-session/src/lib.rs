//! # Repcount-Session
//!
//! Per-frame entry point for repetition counting.
//!
//! A [`SessionController`] owns the classifier, the identified exercise's
//! stage machine and the rep counter. Callers feed it one landmark set per
//! video frame, in capture order, and read back the current stage and rep
//! count.
//!
//! ```no_run
//! use repcount_core::ExerciseKind;
//! use repcount_session::{SessionConfig, SessionController};
//!
//! let mut session = SessionController::with_exercise(SessionConfig::default(), ExerciseKind::Squat)?;
//! let outcome = session.process_frame(None);
//! assert!(!outcome.has_landmarks());
//! # Ok::<(), repcount_core::Error>(())
//! ```

pub mod config;
pub mod session;

pub use self::config::*;
pub use session::*;
