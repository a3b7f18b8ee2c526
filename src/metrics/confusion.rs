//! Confusion matrix over observed classes

use crate::error::{ensure_paired, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// Square count matrix: row = true class, column = predicted class.
///
/// The dimension equals the number of distinct classes observed in the
/// true and predicted labels together, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    classes: Vec<u8>,
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Build the matrix from paired label sequences
    pub fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Result<Self> {
        ensure_paired(y_true.len(), y_pred.len())?;

        let classes: Vec<u8> = y_true
            .iter()
            .chain(y_pred)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0u64; classes.len()]; classes.len()];
        for (t, p) in y_true.iter().zip(y_pred) {
            // both labels are in `classes` by construction
            if let (Ok(i), Ok(j)) = (classes.binary_search(t), classes.binary_search(p)) {
                counts[i][j] += 1;
            }
        }

        Ok(Self { classes, counts })
    }

    /// Observed classes in row/column order
    pub fn classes(&self) -> &[u8] {
        &self.classes
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn dim(&self) -> usize {
        self.classes.len()
    }

    /// Count for (actual, predicted); zero if either class was never observed
    pub fn get(&self, actual: u8, predicted: u8) -> u64 {
        match (
            self.classes.binary_search(&actual),
            self.classes.binary_search(&predicted),
        ) {
            (Ok(i), Ok(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> u64 {
        (0..self.dim()).map(|i| self.counts[i][i]).sum()
    }

    pub fn true_positives(&self) -> u64 {
        self.get(1, 1)
    }

    pub fn false_positives(&self) -> u64 {
        self.get(0, 1)
    }

    pub fn true_negatives(&self) -> u64 {
        self.get(0, 0)
    }

    pub fn false_negatives(&self) -> u64 {
        self.get(1, 0)
    }

    /// Counts as floating point rows, e.g. for plotting
    pub fn to_f64_rows(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| c as f64).collect())
            .collect()
    }

    /// Each row divided by its sum (per-true-class recall). Rows summing to
    /// zero stay zero.
    pub fn row_normalized(&self) -> Vec<Vec<f64>> {
        normalize_rows(&self.to_f64_rows())
    }
}

/// Divide every row by its sum, leaving all-zero rows at zero.
pub fn normalize_rows(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|row| {
            let sum: f64 = row.iter().sum();
            if sum == 0.0 {
                vec![0.0; row.len()]
            } else {
                row.iter().map(|v| v / sum).collect()
            }
        })
        .collect()
}

impl Serialize for ConfusionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}
