//! Evaluation system for choosing attack targets in a tactical skirmish.
//!
//! This crate implements a three-level decision architecture:
//!
//! 1. **Feature Extraction** ([`unit_feature`]) - Measures one (attacker, candidate) pair as a
//!    fixed-length numeric vector (7 features covering proximity, history, threat, and health).
//!
//! 2. **Action Evaluation** ([`q_estimator`]) - Scores a pair as the dot product of the
//!    feature vector and a weight vector.
//!
//! 3. **Target Selection** ([`target_selector`]) - Picks the target for each friendly unit,
//!    either greedily by value or at random with a small exploration probability.
//!
//! # Architecture
//!
//! ```text
//! Target Selection (one order per friendly unit)
//!     ↓ uses
//! Action Evaluation (score one pair)
//!     ↓ uses
//! Feature Extraction (measure one pair)
//! ```
//!
//! # Supporting Modules
//!
//! - [`matchup`] - Read-only view of the current turn that features extract from
//! - [`roster`] - Live unit ids for each side, in listing order
//! - [`reward`] - Per-unit reward for an elapsed turn, including death credit
//!
//! # Linear Evaluation Model
//!
//! Action values are weighted sums of raw features. The model is cheap to evaluate and easy to
//! inspect, but it cannot capture interactions between features.
//!
//! # Example
//!
//! ```rust,no_run
//! use skirmish_evaluator::{
//!     q_estimator::LinearQEstimator, target_selector, unit_feature::FeatureRegistry,
//! };
//! # let ctx = todo!();
//! # let attacker = todo!();
//! let registry = FeatureRegistry::canonical();
//! let weights = vec![0.0; registry.len()];
//! let estimator = LinearQEstimator::new(&registry, &weights);
//!
//! if let Some(best) = target_selector::select_best_target(&estimator, &ctx, attacker) {
//!     println!("attack {} (Q = {})", best.target, best.evaluation.value);
//! }
//! ```

pub mod matchup;
pub mod q_estimator;
pub mod reward;
pub mod roster;
pub mod target_selector;
pub mod unit_feature;
