//! Action-value estimation: scoring an (attacker, candidate) pair.
//!
//! The estimate is linear in the features:
//!
//! ```text
//! Q(s, a) = w₀·f₀ + w₁·f₁ + ... + wₙ·fₙ
//! ```
//!
//! Feature 0 is the constant bias, so no separate intercept is kept. The weights are owned
//! by the training controller; an estimator only borrows them for the duration of a turn.
//!
//! # Usage
//!
//! ```
//! use skirmish_evaluator::q_estimator;
//!
//! let weights = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
//! let features = [1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 10.0];
//! assert_eq!(q_estimator::value(&weights, &features), 13.0);
//! ```

use std::{fmt, iter};

use skirmish_engine::UnitId;

use crate::{
    matchup::FeatureContext,
    unit_feature::{FeatureRegistry, FeatureVector},
};

/// Dot product of a weight vector and a feature vector.
///
/// # Panics
///
/// Panics if the lengths differ. Both lengths are fixed when the feature registry is built,
/// so a mismatch is a construction defect.
#[must_use]
pub fn value(weights: &[f64], features: &[f64]) -> f64 {
    assert_eq!(
        weights.len(),
        features.len(),
        "weight vector and feature vector lengths differ"
    );
    iter::zip(weights, features).map(|(w, f)| w * f).sum()
}

/// Features of a candidate action together with their estimated value.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvaluation {
    pub features: FeatureVector,
    pub value: f64,
}

/// Scores candidate attack actions.
pub trait ActionEvaluator: fmt::Debug {
    /// Evaluates `attacker` attacking `candidate` in the given turn context.
    fn evaluate_action(
        &self,
        ctx: &FeatureContext<'_>,
        attacker: UnitId,
        candidate: UnitId,
    ) -> ActionEvaluation;
}

/// Linear Q-estimator over a feature registry.
#[derive(Debug, Clone, Copy)]
pub struct LinearQEstimator<'a> {
    registry: &'a FeatureRegistry,
    weights: &'a [f64],
}

impl<'a> LinearQEstimator<'a> {
    /// # Panics
    ///
    /// Panics if `weights.len() != registry.len()`.
    #[must_use]
    pub fn new(registry: &'a FeatureRegistry, weights: &'a [f64]) -> Self {
        assert_eq!(
            registry.len(),
            weights.len(),
            "weight vector does not match the feature registry"
        );
        Self { registry, weights }
    }

    #[must_use]
    pub fn weights(&self) -> &'a [f64] {
        self.weights
    }

    /// Value of an already extracted feature vector.
    #[must_use]
    pub fn value_of(&self, features: &[f64]) -> f64 {
        value(self.weights, features)
    }
}

impl ActionEvaluator for LinearQEstimator<'_> {
    fn evaluate_action(
        &self,
        ctx: &FeatureContext<'_>,
        attacker: UnitId,
        candidate: UnitId,
    ) -> ActionEvaluation {
        let features = self.registry.extract(ctx, attacker, candidate);
        let value = self.value_of(&features);
        ActionEvaluation { features, value }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use skirmish_engine::{History, Position, Side, Snapshot, UnitView};

    use super::*;

    #[test]
    fn test_value_of_reference_matchup() {
        // attacker hp 10 vs candidate hp 5
        let weights = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
        let features = [1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 10.0];
        assert_eq!(value(&weights, &features), 13.0);
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn test_value_rejects_mismatched_lengths() {
        let _ = value(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "does not match the feature registry")]
    fn test_estimator_rejects_short_weights() {
        let registry = FeatureRegistry::canonical();
        let _ = LinearQEstimator::new(&registry, &[0.0; 3]);
    }

    #[test]
    fn test_evaluate_action_extracts_and_scores() {
        let snapshot = Snapshot::from_units(
            0,
            [
                UnitView {
                    id: UnitId(0),
                    side: Side::Friendly,
                    template: "footman".to_owned(),
                    position: Position::new(0, 0),
                    hp: 10,
                },
                UnitView {
                    id: UnitId(1),
                    side: Side::Enemy,
                    template: "footman".to_owned(),
                    position: Position::new(5, 5),
                    hp: 5,
                },
            ],
        );
        let history = History::new();
        let enemies = [UnitId(1)];
        let ctx = FeatureContext::new(&snapshot, &history, &enemies);
        let registry = FeatureRegistry::canonical();
        let weights = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
        let estimator = LinearQEstimator::new(&registry, &weights);

        let evaluation = estimator.evaluate_action(&ctx, UnitId(0), UnitId(1));
        assert_eq!(evaluation.features, [1.0, 1.0, 0.0, 0.0, 0.0, 2.0, 10.0]);
        assert_eq!(evaluation.value, 13.0);
    }

    fn pairs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..16).prop_flat_map(|len| {
            (
                prop::collection::vec(-100.0f64..100.0, len),
                prop::collection::vec(-100.0f64..100.0, len),
            )
        })
    }

    fn magnitude(w: &[f64], f: &[f64]) -> f64 {
        iter::zip(w, f).map(|(w, f)| (w * f).abs()).sum()
    }

    proptest! {
        #[test]
        fn prop_value_is_order_independent((w, f) in pairs()) {
            let forward = value(&w, &f);
            let reversed_w: Vec<_> = w.iter().rev().copied().collect();
            let reversed_f: Vec<_> = f.iter().rev().copied().collect();
            let backward = value(&reversed_w, &reversed_f);
            let tolerance = 1e-9 * (1.0 + magnitude(&w, &f));
            prop_assert!((forward - backward).abs() <= tolerance);
        }

        #[test]
        fn prop_value_is_linear_in_weights((w, f) in pairs(), k in -10.0f64..10.0) {
            let scaled: Vec<_> = w.iter().map(|x| x * k).collect();
            let expected = k * value(&w, &f);
            let tolerance = 1e-9 * (1.0 + k.abs() * magnitude(&w, &f));
            prop_assert!((value(&scaled, &f) - expected).abs() <= tolerance);
        }

        #[test]
        fn prop_value_is_linear_in_features((w, f) in pairs(), k in -10.0f64..10.0) {
            let scaled: Vec<_> = f.iter().map(|x| x * k).collect();
            let expected = k * value(&w, &f);
            let tolerance = 1e-9 * (1.0 + k.abs() * magnitude(&w, &f));
            prop_assert!((value(&w, &scaled) - expected).abs() <= tolerance);
        }

        #[test]
        fn prop_value_is_deterministic((w, f) in pairs()) {
            prop_assert_eq!(value(&w, &f).to_bits(), value(&w, &f).to_bits());
        }
    }
}
