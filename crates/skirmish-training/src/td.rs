//! One-step temporal-difference weight update.
//!
//! ```text
//! error      = reward + γ·Q(s', a*) − Q(s, a)
//! weights[i] += α · error · f(s, a)[i]
//! ```
//!
//! `f(s, a)` is the feature vector the unit acted on, measured against the target it actually
//! attacked. `Q(s', a*)` is the value of the best target under the current weights, or zero
//! when no enemy is left.

use skirmish_evaluator::q_estimator;

use crate::weights;

/// Applies TD corrections to a weight vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdUpdater {
    gamma: f64,
    learning_rate: f64,
}

impl TdUpdater {
    #[must_use]
    pub fn new(gamma: f64, learning_rate: f64) -> Self {
        Self {
            gamma,
            learning_rate,
        }
    }

    /// Updates `weights` in place and returns the TD error.
    ///
    /// # Panics
    ///
    /// Panics if `prior_features` does not have the same length as `weights`.
    pub fn update(
        &self,
        weights: &mut [f64],
        reward: f64,
        best_estimate: f64,
        prior_features: &[f64],
    ) -> f64 {
        let prior_estimate = q_estimator::value(weights, prior_features);
        let error = reward + self.gamma * best_estimate - prior_estimate;
        weights::add_scaled(weights, self.learning_rate * error, prior_features);
        tracing::trace!(reward, best_estimate, prior_estimate, error, "td update");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_update_moves_along_prior_features() {
        let updater = TdUpdater::new(0.9, 0.1);
        let mut weights = vec![1.0, 0.0, 2.0];
        let features = [1.0, 5.0, 0.5];
        // prior = 1 + 0 + 1 = 2; error = 3 + 0.9 * 10 - 2 = 10
        let error = updater.update(&mut weights, 3.0, 10.0, &features);
        assert_close(error, 10.0);
        assert_close(weights[0], 2.0);
        assert_close(weights[1], 5.0);
        assert_close(weights[2], 2.5);
    }

    #[test]
    fn test_zero_features_leave_weights_alone() {
        let updater = TdUpdater::new(0.9, 1e-4);
        let mut weights = vec![0.3, -0.7];
        let error = updater.update(&mut weights, -100.0, 4.0, &[0.0, 0.0]);
        assert_close(error, -100.0 + 3.6);
        assert_eq!(weights, [0.3, -0.7]);
    }

    #[test]
    fn test_exact_estimate_gives_no_correction() {
        let updater = TdUpdater::new(0.5, 1.0);
        let mut weights = vec![2.0];
        // prior = 2; target = 1 + 0.5 * 2 = 2
        let error = updater.update(&mut weights, 1.0, 2.0, &[1.0]);
        assert_close(error, 0.0);
        assert_eq!(weights, [2.0]);
    }
}
