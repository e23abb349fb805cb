use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::prelude::*;

/// Row indices of the train and test subsets.
#[derive(Debug, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles the row indices with the seeded generator and cuts off
/// `ceil(test_size * n_rows)` of them for testing.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        bail!("test size must be within (0, 1), got {}", test_size);
    }
    let n_test = (test_size * n_rows as f64).ceil() as usize;
    if n_test >= n_rows {
        bail!(
            "{} row(s) are not enough to split with test size {}, the train subset would be empty",
            n_rows,
            test_size,
        );
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}
