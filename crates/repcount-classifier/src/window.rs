//! Fixed-size feature window.
//!
//! Frames accumulate until the window is full, then the whole window is
//! taken at once as a `frames x features` matrix and the window starts over.

use nalgebra::DMatrix;
use repcount_core::{Error, Result};

#[derive(Debug, Clone)]
pub struct FeatureWindow {
    rows: Vec<Vec<f64>>,
    capacity: usize,
}

impl FeatureWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one frame; returns true once the window is full.
    ///
    /// Every frame in a window must have the same feature count.
    pub fn push(&mut self, features: Vec<f64>) -> Result<bool> {
        if let Some(first) = self.rows.first() {
            if first.len() != features.len() {
                return Err(Error::ShapeMismatch {
                    expected: format!("{} features", first.len()),
                    actual: format!("{} features", features.len()),
                });
            }
        }

        self.rows.push(features);
        Ok(self.is_ready())
    }

    pub fn is_ready(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drain a full window into a matrix, one row per frame
    pub fn take(&mut self) -> Result<DMatrix<f64>> {
        if !self.is_ready() {
            return Err(Error::InsufficientData {
                required: self.capacity,
                available: self.rows.len(),
            });
        }

        let rows = std::mem::take(&mut self.rows);
        let n_features = rows.first().map_or(0, Vec::len);
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();

        Ok(DMatrix::from_row_slice(rows.len(), n_features, &flat))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Subtract each row's mean from every entry in that row
pub fn center_rows(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let mut centered = matrix.clone();
    if matrix.ncols() == 0 {
        return centered;
    }

    let n = matrix.ncols() as f64;
    for mut row in centered.row_iter_mut() {
        let mean = row.sum() / n;
        row.add_scalar_mut(-mean);
    }

    centered
}
