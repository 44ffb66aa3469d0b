//! Window resolution: center, infer, arg-max, vote.

use std::sync::Arc;

use nalgebra::DMatrix;
use repcount_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::{InferenceModel, LabelDecoder};
use crate::vote::{argmax_rows, majority_vote};
use crate::window::center_rows;

/// Label chosen for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowVerdict {
    pub label: String,
    /// Frames whose arg-max decoded to `label`
    pub votes: usize,
    pub window_len: usize,
}

impl WindowVerdict {
    pub fn vote_share(&self) -> f64 {
        if self.window_len == 0 {
            0.0
        } else {
            self.votes as f64 / self.window_len as f64
        }
    }
}

/// Runs the external model over a full window and votes on the result
#[derive(Clone)]
pub struct WindowResolver {
    model: Arc<dyn InferenceModel>,
    decoder: Arc<dyn LabelDecoder>,
}

impl WindowResolver {
    pub fn new(model: Arc<dyn InferenceModel>, decoder: Arc<dyn LabelDecoder>) -> Self {
        Self { model, decoder }
    }

    pub fn resolve(&self, window: &DMatrix<f64>) -> Result<WindowVerdict> {
        if window.nrows() == 0 {
            return Err(Error::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        let centered = center_rows(window);
        let probabilities = self.model.predict(&centered)?;

        if probabilities.nrows() != window.nrows() || probabilities.ncols() == 0 {
            return Err(Error::ShapeMismatch {
                expected: format!("{} rows of class probabilities", window.nrows()),
                actual: format!("{}x{}", probabilities.nrows(), probabilities.ncols()),
            });
        }

        let labels = argmax_rows(&probabilities)
            .into_iter()
            .map(|index| self.decoder.decode(index).ok_or(Error::UnknownLabelIndex(index)))
            .collect::<Result<Vec<_>>>()?;

        let (label, votes) = majority_vote(&labels).ok_or(Error::InsufficientData {
            required: 1,
            available: 0,
        })?;

        Ok(WindowVerdict {
            label,
            votes,
            window_len: window.nrows(),
        })
    }
}

impl std::fmt::Debug for WindowResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowResolver").finish_non_exhaustive()
    }
}
