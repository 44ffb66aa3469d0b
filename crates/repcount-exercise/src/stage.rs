//! Eccentric/concentric stage machine.
//!
//! One machine is bound to one exercise policy for its whole life. Frames are
//! evaluated in arrival order; at most one transition fires per frame:
//!
//! | From | Predicate | To | Rep |
//! |---|---|---|---|
//! | Start | eccentric | Eccentric | no |
//! | Concentric | eccentric | Eccentric | yes |
//! | Eccentric | concentric | Concentric | no |
//!
//! A rep completes on the return to the extended position, so a cycle
//! extend, contract, extend counts once.

use repcount_core::{ExerciseKind, PoseLandmarks, Stage};

use crate::policy::ExercisePolicy;

/// Outcome of feeding one frame to a [`StageMachine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No predicate matched; stage unchanged
    Hold,
    /// Starting posture established
    Started,
    /// Reached the contracted position
    Contracted,
    /// Returned to the extended position from the contracted one
    RepCompleted,
}

impl Transition {
    pub fn completes_rep(&self) -> bool {
        matches!(self, Transition::RepCompleted)
    }
}

#[derive(Debug, Clone)]
pub struct StageMachine {
    policy: ExercisePolicy,
    stage: Stage,
}

impl StageMachine {
    pub fn new(policy: ExercisePolicy) -> Self {
        Self {
            policy,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn kind(&self) -> ExerciseKind {
        self.policy.kind()
    }

    pub fn policy(&self) -> &ExercisePolicy {
        &self.policy
    }

    /// Evaluate one frame
    pub fn advance(&mut self, pose: &PoseLandmarks) -> Transition {
        let (next, transition) = match self.stage {
            Stage::Start if self.policy.validate_eccentric(pose) => {
                (Stage::Eccentric, Transition::Started)
            }
            Stage::Concentric if self.policy.validate_eccentric(pose) => {
                (Stage::Eccentric, Transition::RepCompleted)
            }
            Stage::Eccentric if self.policy.validate_concentric(pose) => {
                (Stage::Concentric, Transition::Contracted)
            }
            current => (current, Transition::Hold),
        };

        self.stage = next;
        transition
    }
}
