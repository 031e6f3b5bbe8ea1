//! Weight vector operations.
//!
//! Weight vectors are plain `Vec<f64>` aligned position by position with the feature
//! registry. This module holds the few operations training needs on them:
//!
//! - **Initialization**: [`random`] draws every weight from `Uniform[-1, 1)`
//! - **Layout migration**: [`zero_pad`] extends an old vector when features were appended
//! - **Update**: [`add_scaled`] applies one gradient step

use rand::Rng;
use rand_distr::Uniform;

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use skirmish_training::weights;
///
/// let weights = weights::from_fn(|i| i as f64 * 0.5, 3);
/// assert_eq!(weights, vec![0.0, 0.5, 1.0]);
/// ```
pub fn from_fn<F>(f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    (0..len).map(f).collect()
}

/// Draws a random weight vector with every weight in `[-1, 1)`.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let uniform = Uniform::new(-1.0, 1.0).unwrap();
    from_fn(|_| rng.sample(uniform), len)
}

/// Extends `weights` with zeros up to `len`.
///
/// Features are only ever appended to the registry, so a vector saved before an append
/// stays valid for the existing indices and the new features start with no influence.
pub fn zero_pad(weights: &mut Vec<f64>, len: usize) {
    if weights.len() < len {
        weights.resize(len, 0.0);
    }
}

/// `weights[i] += step * direction[i]` for every `i`.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn add_scaled(weights: &mut [f64], step: f64, direction: &[f64]) {
    assert_eq!(
        weights.len(),
        direction.len(),
        "weight vector and update direction lengths differ"
    );
    for (w, d) in weights.iter_mut().zip(direction) {
        *w += step * d;
    }
}
