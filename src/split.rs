//! Deterministic stratified train/test split

use crate::error::{ensure_paired, FraudUtilsError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;

/// Share of rows assigned to the test set by default
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Seed used when none is given, so the same input always yields the same split
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Result of a train/test split
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<F, L> {
    pub x_train: Vec<F>,
    pub x_test: Vec<F>,
    pub y_train: Vec<L>,
    pub y_test: Vec<L>,
}

/// Stratified split with the default seed.
///
/// See [`split_train_test_seeded`].
pub fn split_train_test<F: Clone, L: Ord + Clone>(
    features: &[F],
    labels: &[L],
    test_fraction: f64,
) -> Result<TrainTestSplit<F, L>> {
    split_train_test_seeded(features, labels, test_fraction, DEFAULT_SPLIT_SEED)
}

/// Partition rows into train and test sets preserving class proportions.
///
/// The test set holds `ceil(test_fraction * n)` rows. Per-class test counts
/// are allocated proportionally to class size using largest remainders, and
/// every class keeps at least one row in the training set.
///
/// # Errors
///
/// - `InvalidTestFraction` unless `0 < test_fraction < 1`
/// - `InsufficientStratification` if a class has fewer than 2 rows, or if
///   either side would be smaller than the number of classes
pub fn split_train_test_seeded<F: Clone, L: Ord + Clone>(
    features: &[F],
    labels: &[L],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit<F, L>> {
    ensure_paired(features.len(), labels.len())?;
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(FraudUtilsError::InvalidTestFraction(test_fraction));
    }

    let n = labels.len();
    let mut classes: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        classes.entry(label).or_default().push(i);
    }

    if let Some(smallest) = classes.values().map(Vec::len).min() {
        if smallest < 2 {
            return Err(FraudUtilsError::InsufficientStratification(format!(
                "the least populated class has {} member(s), at least 2 are required",
                smallest
            )));
        }
    }

    let n_test = (test_fraction * n as f64).ceil() as usize;
    let n_train = n - n_test;
    if n_test < classes.len() || n_train < classes.len() {
        return Err(FraudUtilsError::InsufficientStratification(format!(
            "train size {} and test size {} must each be at least the number of classes {}",
            n_train,
            n_test,
            classes.len()
        )));
    }

    let counts: Vec<usize> = classes.values().map(Vec::len).collect();
    let test_counts = allocate_test_counts(&counts, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(n_train);
    let mut test_idx = Vec::with_capacity(n_test);
    for (members, &k) in classes.values().zip(&test_counts) {
        let mut members = members.clone();
        members.shuffle(&mut rng);
        test_idx.extend_from_slice(&members[..k]);
        train_idx.extend_from_slice(&members[k..]);
    }
    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    debug!(
        n_train,
        n_test,
        classes = classes.len(),
        seed,
        "Stratified split computed"
    );

    let pick_features =
        |idx: &[usize]| -> Vec<F> { idx.iter().map(|&i| features[i].clone()).collect() };
    let pick_labels =
        |idx: &[usize]| -> Vec<L> { idx.iter().map(|&i| labels[i].clone()).collect() };

    Ok(TrainTestSplit {
        x_train: pick_features(&train_idx),
        x_test: pick_features(&test_idx),
        y_train: pick_labels(&train_idx),
        y_test: pick_labels(&test_idx),
    })
}

/// Distribute `n_test` rows over classes proportionally to their sizes.
///
/// Requires `n_test <= sum(counts) - counts.len()`.
fn allocate_test_counts(counts: &[usize], n_test: usize) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| n_test as f64 * c as f64 / n as f64)
        .collect();
    let mut alloc: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(counts[b].cmp(&counts[a])).then(a.cmp(&b))
    });

    let mut remaining = n_test - alloc.iter().sum::<usize>();
    while remaining > 0 {
        for &i in &order {
            if remaining == 0 {
                break;
            }
            if alloc[i] + 1 < counts[i] {
                alloc[i] += 1;
                remaining -= 1;
            }
        }
    }
    alloc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn imbalanced(n: usize, positives: usize) -> (Vec<usize>, Vec<u8>) {
        let features: Vec<usize> = (0..n).collect();
        let labels = (0..n).map(|i| u8::from(i < positives)).collect();
        (features, labels)
    }

    #[test]
    fn test_split_sizes_and_disjointness() {
        let (features, labels) = imbalanced(100, 20);
        let split = split_train_test(&features, &labels, 0.2).unwrap();

        assert_eq!(split.x_train.len(), 80);
        assert_eq!(split.x_test.len(), 20);
        assert_eq!(split.y_train.len(), 80);
        assert_eq!(split.y_test.len(), 20);

        let train: HashSet<_> = split.x_train.iter().copied().collect();
        let test: HashSet<_> = split.x_test.iter().copied().collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 100);
    }

    #[test]
    fn test_split_preserves_class_proportions() {
        let (features, labels) = imbalanced(100, 20);
        let split = split_train_test(&features, &labels, 0.2).unwrap();

        let test_pos = split.y_test.iter().filter(|&&y| y == 1).count();
        let train_pos = split.y_train.iter().filter(|&&y| y == 1).count();
        assert_eq!(test_pos, 4);
        assert_eq!(train_pos, 16);
    }

    #[test]
    fn test_split_rows_keep_their_labels() {
        let (features, labels) = imbalanced(50, 10);
        let split = split_train_test(&features, &labels, 0.3).unwrap();

        for (x, y) in split.x_train.iter().zip(&split.y_train) {
            assert_eq!(labels[*x], *y);
        }
        for (x, y) in split.x_test.iter().zip(&split.y_test) {
            assert_eq!(labels[*x], *y);
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        let (features, labels) = imbalanced(60, 15);
        let a = split_train_test(&features, &labels, 0.25).unwrap();
        let b = split_train_test(&features, &labels, 0.25).unwrap();
        assert_eq!(a, b);

        let c = split_train_test_seeded(&features, &labels, 0.25, 7).unwrap();
        assert_ne!(a.x_test, c.x_test);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let (features, labels) = imbalanced(11, 4);
        let split = split_train_test(&features, &labels, 0.25).unwrap();
        assert_eq!(split.x_test.len(), 3);
        assert_eq!(split.x_train.len(), 8);
    }

    #[test]
    fn test_split_insufficient_class_members() {
        let features = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let labels = vec![0, 0, 0, 0, 1];
        let err = split_train_test(&features, &labels, 0.2).unwrap_err();
        assert!(matches!(err, FraudUtilsError::InsufficientStratification(_)));
    }

    #[test]
    fn test_split_test_set_smaller_than_class_count() {
        let features = vec![0; 6];
        let labels = vec![0, 0, 1, 1, 2, 2];
        let err = split_train_test(&features, &labels, 0.1).unwrap_err();
        assert!(matches!(err, FraudUtilsError::InsufficientStratification(_)));
    }

    #[test]
    fn test_split_invalid_fraction() {
        let (features, labels) = imbalanced(10, 5);
        for fraction in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(matches!(
                split_train_test(&features, &labels, fraction),
                Err(FraudUtilsError::InvalidTestFraction(_))
            ));
        }
    }

    #[test]
    fn test_split_length_mismatch() {
        let err = split_train_test(&[1, 2, 3], &[0, 1], 0.5).unwrap_err();
        assert!(matches!(err, FraudUtilsError::LengthMismatch { .. }));
    }

    #[test]
    fn test_allocate_test_counts() {
        assert_eq!(allocate_test_counts(&[80, 20], 20), vec![16, 4]);
        assert_eq!(allocate_test_counts(&[7, 4], 3), vec![2, 1]);
        // every class keeps one training row
        assert_eq!(allocate_test_counts(&[2, 2], 2), vec![1, 1]);
    }
}
