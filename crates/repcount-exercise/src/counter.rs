//! In-memory repetition counter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Totals read out of a [`RepCounter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepTally {
    pub valid_reps: u32,
    pub invalid_reps: u32,
}

#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    valid_reps: u32,
    // Bad-rep detection does not exist yet; this stays 0
    invalid_reps: u32,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rep(&mut self) {
        self.valid_reps = self.valid_reps.saturating_add(1);
    }

    pub fn valid_reps(&self) -> u32 {
        self.valid_reps
    }

    pub fn invalid_reps(&self) -> u32 {
        self.invalid_reps
    }

    pub fn tally(&self) -> RepTally {
        RepTally {
            valid_reps: self.valid_reps,
            invalid_reps: self.invalid_reps,
        }
    }

    /// Return the current totals and zero both counters
    pub fn flush(&mut self) -> RepTally {
        std::mem::take(self).tally()
    }
}

impl fmt::Display for RepCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter of reps: {}", self.valid_reps)
    }
}
