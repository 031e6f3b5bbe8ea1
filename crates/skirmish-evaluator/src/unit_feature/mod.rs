//! Target-selection features for an (attacker, candidate) pair.
//!
//! Each feature maps a [`Matchup`] to one real number. The registry fixes the feature order,
//! and weight vectors align with it positionally, so index `i` always means the same feature.
//!
//! # Canonical Features
//!
//! | # | Feature | Source type |
//! |---|---|---|
//! | 0 | bias | [`source::Bias`] |
//! | 1 | is-closest-enemy | [`source::IsClosestEnemy`] |
//! | 2 | previously-targeted | [`source::PreviouslyTargeted`] |
//! | 3 | enemy-attacking-me | [`source::EnemyAttackingMe`] |
//! | 4 | threat-count | [`source::ThreatCount`] |
//! | 5 | hp-ratio | [`source::HpRatio`] |
//! | 6 | attacker-hp | [`source::AttackerHp`] |
//!
//! # Extending
//!
//! New features are appended to [`all_unit_features()`]. Existing indices never move, so a
//! weight file written before the append still lines up; the weight store zero-pads the new
//! trailing entries on load.

use std::fmt;

use skirmish_engine::UnitId;

use crate::matchup::{FeatureContext, Matchup};

pub use self::source::all_unit_features;

pub mod source;

/// A feature vector: one value per registered feature, in registry order.
pub type FeatureVector = Vec<f64>;

pub trait UnitFeature: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn clone_boxed(&self) -> BoxedUnitFeature;

    /// Computes the feature value.
    ///
    /// Never fails on absent units: each feature documents the value it returns when the
    /// attacker or the candidate is missing from the snapshot.
    #[must_use]
    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64;
}

pub type BoxedUnitFeature = Box<dyn UnitFeature>;

impl Clone for BoxedUnitFeature {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl UnitFeature for BoxedUnitFeature {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedUnitFeature {
        self.as_ref().clone_boxed()
    }

    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        self.as_ref().extract(ctx, matchup)
    }
}

/// Ordered list of features whose length is fixed for the lifetime of a weight vector.
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    features: Vec<BoxedUnitFeature>,
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FeatureRegistry {
    #[must_use]
    pub fn new(features: Vec<BoxedUnitFeature>) -> Self {
        Self { features }
    }

    /// The canonical seven-feature registry.
    #[must_use]
    pub fn canonical() -> Self {
        Self::new(all_unit_features())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[must_use]
    pub fn features(&self) -> &[BoxedUnitFeature] {
        &self.features
    }

    #[must_use]
    pub fn extract(
        &self,
        ctx: &FeatureContext<'_>,
        attacker: UnitId,
        candidate: UnitId,
    ) -> FeatureVector {
        let matchup = ctx.matchup(attacker, candidate);
        self.features
            .iter()
            .map(|f| f.extract(ctx, &matchup))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use skirmish_engine::{
        AttackCommand, CommandFeedback, CommandResult, History, Position, Side, Snapshot,
        TurnRecord, UnitView,
    };

    use super::*;

    #[test]
    fn test_canonical_order() {
        let registry = FeatureRegistry::canonical();
        let ids: Vec<_> = registry.features().iter().map(|f| f.id().to_owned()).collect();
        assert_eq!(
            ids,
            [
                "bias",
                "is_closest_enemy",
                "previously_targeted",
                "enemy_attacking_me",
                "threat_count",
                "hp_ratio",
                "attacker_hp",
            ]
        );
    }

    fn footman(id: u32, side: Side, x: i32) -> UnitView {
        UnitView {
            id: UnitId(id),
            side,
            template: "footman".to_owned(),
            position: Position::new(x, 0),
            hp: 10,
        }
    }

    // turn 0: friendly #1 attacked enemy #2 and #2 attacked #1 back
    fn mutual_attack_history() -> History {
        let mut record = TurnRecord::default();
        record.friendly_commands.insert(
            UnitId(1),
            CommandResult {
                command: AttackCommand::new(UnitId(1), UnitId(2)),
                feedback: CommandFeedback::Completed,
            },
        );
        record.enemy_commands.insert(
            UnitId(2),
            CommandResult {
                command: AttackCommand::new(UnitId(2), UnitId(1)),
                feedback: CommandFeedback::Completed,
            },
        );
        let mut history = History::new();
        history.push(record);
        history
    }

    #[test]
    fn test_extract_with_both_units_absent() {
        let registry = FeatureRegistry::canonical();
        let snapshot = Snapshot::new(1);
        let history = mutual_attack_history();
        let ctx = FeatureContext::new(&snapshot, &history, &[]);
        let features = registry.extract(&ctx, UnitId(1), UnitId(2));
        assert_eq!(features, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_history_features_ignore_absent_candidate() {
        let registry = FeatureRegistry::canonical();
        let history = mutual_attack_history();
        let enemies = [UnitId(2)];

        let both = Snapshot::from_units(
            1,
            [footman(1, Side::Friendly, 0), footman(2, Side::Enemy, 1)],
        );
        let ctx = FeatureContext::new(&both, &history, &enemies);
        let features = registry.extract(&ctx, UnitId(1), UnitId(2));
        assert_eq!(features[2], 1.0);
        assert_eq!(features[3], 1.0);

        // the enemy died during turn 0
        let attacker_only = Snapshot::from_units(1, [footman(1, Side::Friendly, 0)]);
        let ctx = FeatureContext::new(&attacker_only, &history, &enemies);
        let features = registry.extract(&ctx, UnitId(1), UnitId(2));
        assert_eq!(features[2], 0.0);
        assert_eq!(features[3], 0.0);
        assert_eq!(features[5], 1.0);
    }
}
