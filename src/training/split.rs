//! Seeded train/holdout partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::error::{SurvivalError, SurvivalResult};

/// Row indices of each partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed`; the first `ceil(n * test_fraction)` indices
/// form the holdout.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> SurvivalResult<Split> {
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SurvivalError::Training(format!(
            "cannot hold out {n_test} of {n} rows"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}

/// Gather `rows` at `indices`.
pub fn take<T: Copy>(rows: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| rows[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn partitions_are_disjoint_and_cover_all_rows() {
        let split = train_test_split(891, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 179);
        assert_eq!(split.train.len(), 712);
        let all: HashSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all.len(), 891);
    }

    #[test]
    fn same_seed_same_split_other_seed_differs() {
        let a = train_test_split(100, 0.2, 42).unwrap();
        let b = train_test_split(100, 0.2, 42).unwrap();
        let c = train_test_split(100, 0.2, 7).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
    }

    #[test]
    fn take_preserves_index_order() {
        assert_eq!(take(&[10, 20, 30, 40], &[3, 0]), vec![40, 10]);
    }
}
