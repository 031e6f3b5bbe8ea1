//! Target selection: choosing which enemy each friendly unit attacks.
//!
//! [`select_best_target`] scores every live enemy with an [`ActionEvaluator`] and returns the
//! highest-valued one. [`EpsilonGreedy`] wraps it with exploration: with probability
//! `epsilon` it picks a uniformly random live enemy instead. Exploration is switched off while
//! weights are being scored.
//!
//! # Design: Independent Units
//!
//! Every friendly unit chooses on its own. There is no joint-action search, so several
//! units may pile onto the same enemy if each one rates it highest.
//!
//! # Usage
//!
//! ```rust,no_run
//! use skirmish_evaluator::{
//!     q_estimator::LinearQEstimator, target_selector::EpsilonGreedy,
//!     unit_feature::FeatureRegistry,
//! };
//! # let ctx = todo!();
//! # let attacker = todo!();
//! # let rng: &mut rand_pcg::Pcg32 = todo!();
//! let registry = FeatureRegistry::canonical();
//! let weights = vec![0.0; registry.len()];
//! let estimator = LinearQEstimator::new(&registry, &weights);
//! let policy = EpsilonGreedy::new(0.02);
//!
//! if let Some(selection) = policy.select(&estimator, &ctx, attacker, false, rng) {
//!     println!("attack {}", selection.target);
//! }
//! ```

use rand::{Rng, seq::IndexedRandom as _};
use skirmish_engine::UnitId;

use crate::{
    matchup::FeatureContext,
    q_estimator::{ActionEvaluation, ActionEvaluator},
};

/// Default exploration probability.
pub const DEFAULT_EPSILON: f64 = 0.02;

/// A chosen target with the evaluation that went into choosing it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSelection {
    pub target: UnitId,
    pub evaluation: ActionEvaluation,
    /// Whether the target was drawn at random rather than by value.
    pub explored: bool,
}

/// Picks the live enemy with the highest estimated value for `attacker`.
///
/// Ties go to the enemy that comes first in roster order. Returns `None` when there are no
/// live enemies; the caller must treat that as the end of the episode.
#[must_use]
pub fn select_best_target(
    evaluator: &dyn ActionEvaluator,
    ctx: &FeatureContext<'_>,
    attacker: UnitId,
) -> Option<TargetSelection> {
    let mut best: Option<TargetSelection> = None;
    for &candidate in ctx.live_enemies() {
        let evaluation = evaluator.evaluate_action(ctx, attacker, candidate);
        if best
            .as_ref()
            .is_none_or(|b| evaluation.value > b.evaluation.value)
        {
            best = Some(TargetSelection {
                target: candidate,
                evaluation,
                explored: false,
            });
        }
    }
    best
}

/// Epsilon-greedy target policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl EpsilonGreedy {
    /// # Panics
    ///
    /// Panics if `epsilon` is outside `[0, 1]`.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&epsilon),
            "epsilon must be a probability, got {epsilon}"
        );
        Self { epsilon }
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Chooses a target for `attacker`.
    ///
    /// One uniform draw is taken from `rng` on every call so the random stream advances the
    /// same way whether or not exploration is enabled. When `greedy_only` is set, or the
    /// draw is at least `epsilon`, the best-valued target is returned; otherwise a uniformly
    /// random live enemy.
    pub fn select<R>(
        &self,
        evaluator: &dyn ActionEvaluator,
        ctx: &FeatureContext<'_>,
        attacker: UnitId,
        greedy_only: bool,
        rng: &mut R,
    ) -> Option<TargetSelection>
    where
        R: Rng + ?Sized,
    {
        let draw: f64 = rng.random();
        if greedy_only || draw >= self.epsilon {
            return select_best_target(evaluator, ctx, attacker);
        }
        let &target = ctx.live_enemies().choose(rng)?;
        Some(TargetSelection {
            target,
            evaluation: evaluator.evaluate_action(ctx, attacker, target),
            explored: true,
        })
    }
}
