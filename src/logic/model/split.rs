//! Train/Test Split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded shuffle, then the first `1 - test_fraction` go to training.
///
/// The test size is rounded up so a non-zero fraction holds out at least
/// one row whenever there are two or more.
pub fn train_test_split<T: Clone>(rows: &[T], test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut shuffled = rows.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let fraction = if test_fraction.is_finite() { test_fraction.clamp(0.0, 1.0) } else { 0.0 };
    let mut n_test = (rows.len() as f64 * fraction - 1e-9).ceil().max(0.0) as usize;
    if n_test >= rows.len() && rows.len() > 1 {
        n_test = rows.len() - 1;
    }

    let test = shuffled.split_off(rows.len() - n_test);
    (shuffled, test)
}
