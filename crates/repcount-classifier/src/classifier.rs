//! In-process exercise classifier.

use repcount_core::{PoseLandmarks, Result};

use crate::features::FeatureExtractor;
use crate::resolver::{WindowResolver, WindowVerdict};
use crate::window::FeatureWindow;

/// Collects one feature vector per frame and resolves each full window
#[derive(Debug, Clone)]
pub struct ExerciseClassifier {
    extractor: FeatureExtractor,
    window: FeatureWindow,
    resolver: WindowResolver,
}

impl ExerciseClassifier {
    pub fn new(extractor: FeatureExtractor, window_size: usize, resolver: WindowResolver) -> Self {
        Self {
            extractor,
            window: FeatureWindow::new(window_size),
            resolver,
        }
    }

    /// Add one frame.
    ///
    /// Returns `Ok(None)` until the window is full. A full window is always
    /// consumed, whether resolution succeeds or not.
    pub fn observe(&mut self, pose: &PoseLandmarks) -> Result<Option<WindowVerdict>> {
        let ready = self.window.push(self.extractor.extract(pose))?;
        if !ready {
            return Ok(None);
        }

        let matrix = self.window.take()?;
        self.resolver.resolve(&matrix).map(Some)
    }

    /// Frames collected toward the current window
    pub fn pending_frames(&self) -> usize {
        self.window.len()
    }

    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}
