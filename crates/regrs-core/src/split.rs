use crate::error::{RegressionError, Result};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_TEST_RATIO: f64 = 0.3;
pub const DEFAULT_SEED: u64 = 42;

/// Smallest partition either side of the split may have.
pub const MIN_PARTITION_ROWS: usize = 2;

/// Training and test halves of the two selected columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPartition {
    pub x_train: Vec<f64>,
    pub y_train: Vec<f64>,
    pub x_test: Vec<f64>,
    pub y_test: Vec<f64>,
    /// Original row indices of the test rows, in partition order.
    pub test_rows: Vec<usize>,
}

impl SplitPartition {
    pub fn n_train(&self) -> usize {
        self.x_train.len()
    }

    pub fn n_test(&self) -> usize {
        self.x_test.len()
    }
}

/// `(n_train, n_test)` for `n` rows; the test side is rounded up.
pub fn split_sizes(n: usize, test_ratio: f64) -> (usize, usize) {
    let n_test = ((n as f64) * test_ratio).ceil() as usize;
    let n_test = n_test.min(n);
    (n - n_test, n_test)
}

/// Shuffles row indices with a seeded generator; the first `n_test` shuffled
/// rows become the test partition and the rest the training partition.
pub fn train_test_split(
    x: &[f64],
    y: &[f64],
    test_ratio: f64,
    seed: u64,
) -> Result<SplitPartition> {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    let (n_train, n_test) = split_sizes(n, test_ratio);
    if n_train < MIN_PARTITION_ROWS || n_test < MIN_PARTITION_ROWS {
        return Err(RegressionError::NotEnoughRows {
            rows: n,
            train: n_train,
            test: n_test,
            needed: MIN_PARTITION_ROWS,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(SplitPartition {
        x_train: train_idx.iter().map(|&i| x[i]).collect(),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        x_test: test_idx.iter().map(|&i| x[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
        test_rows: test_idx.to_vec(),
    })
}
