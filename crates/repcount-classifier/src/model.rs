//! Seams to the external classification model.
//!
//! The trained model and its label encoder live outside this workspace.
//! They are reached only through [`InferenceModel`] and [`LabelDecoder`].

use nalgebra::DMatrix;
use repcount_core::Result;
use serde::{Deserialize, Serialize};

/// Per-frame class probabilities from a feature matrix.
///
/// Input is `frames x features`, already mean-centered per row. Output must
/// be `frames x classes`.
pub trait InferenceModel: Send + Sync {
    fn predict(&self, features: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

impl<F> InferenceModel for F
where
    F: Fn(&DMatrix<f64>) -> Result<DMatrix<f64>> + Send + Sync,
{
    fn predict(&self, features: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        self(features)
    }
}

/// Class index to label
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, index: usize) -> Option<String>;
}

/// Ordered class list of a fitted label encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}

impl Default for LabelEncoder {
    /// Classes of the shipped exercise model, in fitted (sorted) order
    fn default() -> Self {
        Self::new(["dips", "pushup", "situp", "squats"])
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, index: usize) -> Option<String> {
        self.classes.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_encoder_roundtrip() {
        let encoder = LabelEncoder::default();
        for (i, class) in encoder.classes().iter().enumerate() {
            assert_eq!(encoder.encode(class), Some(i));
            assert_eq!(encoder.decode(i).as_deref(), Some(class.as_str()));
        }
        assert_eq!(encoder.decode(4), None);
        assert_eq!(encoder.encode("burpee"), None);
    }

    #[test]
    fn test_closure_as_model() {
        let model = |features: &DMatrix<f64>| -> Result<DMatrix<f64>> {
            Ok(DMatrix::from_element(features.nrows(), 2, 0.5))
        };
        let out = model.predict(&DMatrix::zeros(3, 4)).unwrap();
        assert_eq!(out.shape(), (3, 2));
    }
}
