//! Frame-synchronous session controller.
//!
//! Until an exercise is identified, frames feed the classifier. Once a
//! window resolves to a known exercise, the matching policy is locked in for
//! the rest of the session and every later frame drives its stage machine.
//!
//! Frames must arrive in capture order from a single caller.

use std::sync::Arc;

use repcount_classifier::{
    ExerciseClassifier, FeatureExtractor, InferenceModel, LabelDecoder, WindowResolver,
    WindowVerdict,
};
use repcount_core::{ExerciseKind, PoseLandmarks, Result, SessionId, Stage, Timestamp};
use repcount_exercise::{ExercisePolicy, RepCounter, RepTally, StageMachine, Transition};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Session state visible to the caller after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStatus {
    pub exercise: Option<ExerciseKind>,
    pub stage: Stage,
    pub valid_reps: u32,
}

/// Result of [`SessionController::process_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The estimator found no body; nothing changed
    NoLandmarks(FrameStatus),
    Processed(FrameStatus),
}

impl FrameOutcome {
    pub fn status(&self) -> &FrameStatus {
        match self {
            FrameOutcome::NoLandmarks(status) | FrameOutcome::Processed(status) => status,
        }
    }

    pub fn has_landmarks(&self) -> bool {
        matches!(self, FrameOutcome::Processed(_))
    }
}

/// Totals for a finished set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetReport {
    pub session_id: SessionId,
    pub exercise: Option<ExerciseKind>,
    pub tally: RepTally,
    pub finished_at: Timestamp,
}

pub struct SessionController {
    id: SessionId,
    config: SessionConfig,
    /// Present until an exercise is identified
    classifier: Option<ExerciseClassifier>,
    /// Present once an exercise is identified
    machine: Option<StageMachine>,
    counter: RepCounter,
}

impl SessionController {
    /// Start a session that identifies its exercise from the first windows
    pub fn new(
        config: SessionConfig,
        model: Arc<dyn InferenceModel>,
        decoder: Arc<dyn LabelDecoder>,
    ) -> Result<Self> {
        config.validate()?;

        let classifier = ExerciseClassifier::new(
            FeatureExtractor::new(config.feature_landmarks.clone()),
            config.window_size,
            WindowResolver::new(model, decoder),
        );

        Ok(Self {
            id: SessionId::new(),
            config,
            classifier: Some(classifier),
            machine: None,
            counter: RepCounter::new(),
        })
    }

    /// Start a session for an exercise the caller already knows
    pub fn with_exercise(config: SessionConfig, kind: ExerciseKind) -> Result<Self> {
        config.validate()?;

        let id = SessionId::new();
        let machine = StageMachine::new(ExercisePolicy::for_kind(kind, &config.thresholds));
        tracing::info!("Session {} counting {} reps", id, kind);

        Ok(Self {
            id,
            config,
            classifier: None,
            machine: Some(machine),
            counter: RepCounter::new(),
        })
    }

    /// Feed one frame.
    ///
    /// `None` means the estimator detected no body this frame; the session
    /// state is left untouched and [`FrameOutcome::NoLandmarks`] is returned.
    pub fn process_frame(&mut self, landmarks: Option<&PoseLandmarks>) -> FrameOutcome {
        let Some(pose) = landmarks else {
            tracing::trace!("Session {}: no landmarks this frame", self.id);
            return FrameOutcome::NoLandmarks(self.status());
        };

        match self.machine.as_mut() {
            Some(machine) => {
                let from = machine.stage();
                let transition = machine.advance(pose);

                if transition != Transition::Hold {
                    tracing::debug!(
                        "Session {}: stage {} -> {}",
                        self.id,
                        from,
                        machine.stage()
                    );
                }

                if transition.completes_rep() {
                    self.counter.add_rep();
                    tracing::info!(
                        "Session {}: {} rep {} completed",
                        self.id,
                        machine.kind(),
                        self.counter.valid_reps()
                    );
                }
            }
            None => self.classify(pose),
        }

        FrameOutcome::Processed(self.status())
    }

    fn classify(&mut self, pose: &PoseLandmarks) {
        let Some(classifier) = self.classifier.as_mut() else {
            return;
        };

        match classifier.observe(pose) {
            Ok(None) => {}
            Ok(Some(verdict)) => self.resolve(verdict),
            Err(e) => {
                tracing::warn!("Session {}: classification window dropped: {}", self.id, e);
            }
        }
    }

    fn resolve(&mut self, verdict: WindowVerdict) {
        match ExerciseKind::from_label(&verdict.label) {
            Ok(kind) => {
                tracing::info!(
                    "Session {}: identified {} ({}/{} frames)",
                    self.id,
                    kind,
                    verdict.votes,
                    verdict.window_len
                );
                self.machine = Some(StageMachine::new(ExercisePolicy::for_kind(
                    kind,
                    &self.config.thresholds,
                )));
                self.classifier = None;
            }
            Err(e) => {
                tracing::warn!("Session {}: {}; still classifying", self.id, e);
            }
        }
    }

    pub fn status(&self) -> FrameStatus {
        FrameStatus {
            exercise: self.exercise(),
            stage: self.stage(),
            valid_reps: self.counter.valid_reps(),
        }
    }

    /// Zero the rep counter and report the totals it held.
    ///
    /// The identified exercise and the current stage are kept.
    pub fn reset(&mut self) -> SetReport {
        let tally = self.counter.flush();
        tracing::info!(
            "Session {}: set finished with {} valid reps",
            self.id,
            tally.valid_reps
        );

        SetReport {
            session_id: self.id,
            exercise: self.exercise(),
            tally,
            finished_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn exercise(&self) -> Option<ExerciseKind> {
        self.machine.as_ref().map(StageMachine::kind)
    }

    pub fn stage(&self) -> Stage {
        self.machine.as_ref().map_or(Stage::Start, StageMachine::stage)
    }

    pub fn valid_reps(&self) -> u32 {
        self.counter.valid_reps()
    }

    /// Frames collected toward the next classification window
    pub fn pending_frames(&self) -> usize {
        self.classifier
            .as_ref()
            .map_or(0, ExerciseClassifier::pending_frames)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use repcount_classifier::LabelEncoder;
    use repcount_core::{BodyLandmark, Error, Landmark};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PUSHUP: usize = 1;
    const SQUATS: usize = 3;

    fn pose(points: &[(BodyLandmark, f64, f64)]) -> PoseLandmarks {
        let mut pose = PoseLandmarks::default();
        for &(landmark, x, y) in points {
            pose.set(landmark, Landmark::new(x, y));
        }
        pose
    }

    fn push_up(elbow: (f64, f64), wrist: (f64, f64)) -> PoseLandmarks {
        pose(&[
            (BodyLandmark::LeftShoulder, 0.3, 0.5),
            (BodyLandmark::LeftElbow, elbow.0, elbow.1),
            (BodyLandmark::LeftWrist, wrist.0, wrist.1),
            (BodyLandmark::LeftHip, 0.6, 0.5),
            (BodyLandmark::LeftKnee, 0.8, 0.5),
        ])
    }

    fn push_up_top() -> PoseLandmarks {
        push_up((0.3, 0.65), (0.3, 0.8))
    }

    fn push_up_bottom() -> PoseLandmarks {
        push_up((0.45, 0.6), (0.3, 0.7))
    }

    fn push_up_midway() -> PoseLandmarks {
        push_up((0.35, 0.6), (0.3, 0.7))
    }

    fn squat_top() -> PoseLandmarks {
        pose(&[
            (BodyLandmark::LeftShoulder, 0.5, 0.2),
            (BodyLandmark::LeftHip, 0.5, 0.5),
            (BodyLandmark::LeftKnee, 0.5, 0.7),
            (BodyLandmark::LeftAnkle, 0.5, 0.9),
        ])
    }

    fn squat_bottom() -> PoseLandmarks {
        pose(&[
            (BodyLandmark::LeftShoulder, 0.6, 0.3),
            (BodyLandmark::LeftHip, 0.5, 0.6),
            (BodyLandmark::LeftKnee, 0.7, 0.6),
            (BodyLandmark::LeftAnkle, 0.55, 0.85),
        ])
    }

    /// Model voting `class` on every frame, counting its calls
    fn constant_model(class: usize, calls: Arc<AtomicUsize>) -> Arc<dyn InferenceModel> {
        Arc::new(move |features: &DMatrix<f64>| -> Result<DMatrix<f64>> {
            calls.fetch_add(1, Ordering::SeqCst);
            let mut out = DMatrix::from_element(features.nrows(), 4, 0.0);
            out.column_mut(class).fill(1.0);
            Ok(out)
        })
    }

    fn classifying_session(class: usize) -> (SessionController, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let session = SessionController::new(
            SessionConfig::default(),
            constant_model(class, calls.clone()),
            Arc::new(LabelEncoder::default()),
        )
        .unwrap();
        (session, calls)
    }

    fn push_up_session() -> SessionController {
        SessionController::with_exercise(SessionConfig::default(), ExerciseKind::PushUp).unwrap()
    }

    #[test]
    fn test_missing_landmarks_is_a_noop() {
        let mut session = push_up_session();
        session.process_frame(Some(&push_up_top()));

        let outcome = session.process_frame(None);
        assert!(!outcome.has_landmarks());
        assert_eq!(
            outcome,
            FrameOutcome::NoLandmarks(FrameStatus {
                exercise: Some(ExerciseKind::PushUp),
                stage: Stage::Eccentric,
                valid_reps: 0,
            })
        );
    }

    #[test]
    fn test_push_up_rep_counted_on_return_to_top() {
        let mut session = push_up_session();

        let status = *session.process_frame(Some(&push_up_top())).status();
        assert_eq!((status.stage, status.valid_reps), (Stage::Eccentric, 0));

        let status = *session.process_frame(Some(&push_up_bottom())).status();
        assert_eq!((status.stage, status.valid_reps), (Stage::Concentric, 0));

        let status = *session.process_frame(Some(&push_up_top())).status();
        assert_eq!((status.stage, status.valid_reps), (Stage::Eccentric, 1));
    }

    #[test]
    fn test_unmatched_frame_changes_nothing() {
        let mut session = push_up_session();
        session.process_frame(Some(&push_up_top()));
        let before = session.status();

        let outcome = session.process_frame(Some(&push_up_midway()));
        assert_eq!(outcome, FrameOutcome::Processed(before));
    }

    #[test]
    fn test_three_push_up_cycles_count_two() {
        let mut session = push_up_session();
        let frames = [
            push_up_top(),
            push_up_bottom(),
            push_up_top(),
            push_up_bottom(),
            push_up_top(),
            push_up_bottom(),
        ];
        for frame in &frames {
            session.process_frame(Some(frame));
        }

        assert_eq!(session.stage(), Stage::Concentric);
        assert_eq!(session.valid_reps(), 2);
    }

    #[test]
    fn test_no_prediction_before_full_window() {
        let (mut session, calls) = classifying_session(PUSHUP);

        for _ in 0..9 {
            let status = *session.process_frame(Some(&push_up_top())).status();
            assert_eq!(status.exercise, None);
            assert_eq!(status.stage, Stage::Start);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.pending_frames(), 9);

        // Missing frames do not count toward the window
        session.process_frame(None);
        assert_eq!(session.pending_frames(), 9);

        let status = *session.process_frame(Some(&push_up_top())).status();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(status.exercise, Some(ExerciseKind::PushUp));
        assert_eq!(status.stage, Stage::Start);
        assert_eq!(session.pending_frames(), 0);
    }

    #[test]
    fn test_identified_exercise_drives_counting() {
        let (mut session, calls) = classifying_session(SQUATS);
        for _ in 0..10 {
            session.process_frame(Some(&squat_top()));
        }
        assert_eq!(session.exercise(), Some(ExerciseKind::Squat));

        for frame in [squat_top(), squat_bottom(), squat_top(), squat_bottom(), squat_top()] {
            session.process_frame(Some(&frame));
        }
        assert_eq!(session.valid_reps(), 2);
        // The exercise is fixed once identified
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_label_keeps_classifying() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = SessionController::new(
            SessionConfig::default(),
            constant_model(0, calls.clone()),
            Arc::new(LabelEncoder::new(["burpee", "pushup", "situp", "squats"])),
        )
        .unwrap();

        for _ in 0..20 {
            let outcome = session.process_frame(Some(&push_up_top()));
            assert!(outcome.has_landmarks());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.exercise(), None);
        assert_eq!(session.stage(), Stage::Start);
    }

    #[test]
    fn test_model_failure_is_absorbed() {
        let model: Arc<dyn InferenceModel> =
            Arc::new(|_: &DMatrix<f64>| -> Result<DMatrix<f64>> {
                Err(Error::Inference("model crashed".to_string()))
            });
        let config = SessionConfig {
            window_size: 2,
            ..Default::default()
        };
        let mut session =
            SessionController::new(config, model, Arc::new(LabelEncoder::default())).unwrap();

        for _ in 0..4 {
            session.process_frame(Some(&push_up_top()));
        }
        assert_eq!(session.exercise(), None);
        assert_eq!(session.pending_frames(), 0);
    }

    #[test]
    fn test_reset_flushes_counter_only() {
        let mut session = push_up_session();
        for frame in [push_up_top(), push_up_bottom(), push_up_top(), push_up_bottom()] {
            session.process_frame(Some(&frame));
        }

        let report = session.reset();
        assert_eq!(report.session_id, session.id());
        assert_eq!(report.exercise, Some(ExerciseKind::PushUp));
        assert_eq!(
            report.tally,
            RepTally {
                valid_reps: 1,
                invalid_reps: 0
            }
        );

        assert_eq!(session.valid_reps(), 0);
        assert_eq!(session.stage(), Stage::Concentric);
        assert_eq!(session.reset().tally, RepTally::default());

        // The in-flight rep still completes after the reset
        session.process_frame(Some(&push_up_top()));
        assert_eq!(session.valid_reps(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            SessionController::with_exercise(config, ExerciseKind::Dip),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_custom_thresholds_reach_the_policy() {
        let mut config = SessionConfig::default();
        config.thresholds.push_up.flexed_elbow_max = 60.0;
        let mut session = SessionController::with_exercise(config, ExerciseKind::PushUp).unwrap();

        session.process_frame(Some(&push_up_top()));
        // Bottom elbow is ~67 degrees, not deep enough under the stricter limit
        session.process_frame(Some(&push_up_bottom()));
        assert_eq!(session.stage(), Stage::Eccentric);
    }
}
