//! Canonical feature types.
//!
//! Distances are Chebyshev (`max(|dx|, |dy|)`), matching 8-directional grid movement.

use skirmish_engine::Side;

use crate::matchup::{FeatureContext, Matchup};

use super::{BoxedUnitFeature, UnitFeature};

/// Enemies closer than this are counted by [`ThreatCount`].
pub const THREAT_RADIUS: u32 = 2;

#[must_use]
pub fn all_unit_features() -> Vec<BoxedUnitFeature> {
    vec![
        Box::new(Bias),
        Box::new(IsClosestEnemy),
        Box::new(PreviouslyTargeted),
        Box::new(EnemyAttackingMe),
        Box::new(ThreatCount),
        Box::new(HpRatio),
        Box::new(AttackerHp),
    ]
}

fn indicator(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Constant 1, regardless of the units involved.
#[derive(Debug, Clone)]
pub struct Bias;

impl UnitFeature for Bias {
    fn id(&self) -> &'static str {
        "bias"
    }
    fn name(&self) -> &'static str {
        "Bias"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, _ctx: &FeatureContext<'_>, _matchup: &Matchup<'_>) -> f64 {
        1.0
    }
}

/// 1 if the candidate is the nearest live enemy to the attacker.
///
/// 0 when either unit is absent.
#[derive(Debug, Clone)]
pub struct IsClosestEnemy;

impl UnitFeature for IsClosestEnemy {
    fn id(&self) -> &'static str {
        "is_closest_enemy"
    }
    fn name(&self) -> &'static str {
        "Is Closest Enemy"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        let (Some(attacker), Some(_)) = (matchup.attacker, matchup.candidate) else {
            return 0.0;
        };
        indicator(ctx.closest_enemy(attacker) == Some(matchup.candidate_id))
    }
}

/// 1 if the attacker's command on the previous turn targeted the candidate.
///
/// 0 on the first turn, when the attacker had no command, or when either unit is absent.
#[derive(Debug, Clone)]
pub struct PreviouslyTargeted;

impl UnitFeature for PreviouslyTargeted {
    fn id(&self) -> &'static str {
        "previously_targeted"
    }
    fn name(&self) -> &'static str {
        "Previously Targeted"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        let (Some(_), Some(_)) = (matchup.attacker, matchup.candidate) else {
            return 0.0;
        };
        let command = ctx.previous_command(Side::Friendly, matchup.attacker_id);
        indicator(command.is_some_and(|r| r.command.target == matchup.candidate_id))
    }
}

/// 1 if the candidate's command on the previous turn targeted the attacker.
///
/// 0 on the first turn, when the candidate had no command, or when either unit is absent.
#[derive(Debug, Clone)]
pub struct EnemyAttackingMe;

impl UnitFeature for EnemyAttackingMe {
    fn id(&self) -> &'static str {
        "enemy_attacking_me"
    }
    fn name(&self) -> &'static str {
        "Enemy Attacking Me"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        let (Some(_), Some(_)) = (matchup.attacker, matchup.candidate) else {
            return 0.0;
        };
        let command = ctx.previous_command(Side::Enemy, matchup.candidate_id);
        indicator(command.is_some_and(|r| r.command.target == matchup.attacker_id))
    }
}

/// Number of live enemies within [`THREAT_RADIUS`] of the attacker.
///
/// Independent of the candidate; 0 when the attacker is absent.
#[derive(Debug, Clone)]
pub struct ThreatCount;

impl UnitFeature for ThreatCount {
    fn id(&self) -> &'static str {
        "threat_count"
    }
    fn name(&self) -> &'static str {
        "Threat Count"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        let Some(attacker) = matchup.attacker else {
            return 0.0;
        };
        ctx.visible_enemies()
            .filter(|e| attacker.position.chebyshev_distance(e.position) < THREAT_RADIUS)
            .count() as f64
    }
}

/// Attacker HP divided by candidate HP.
///
/// 0 when the attacker is absent (checked first), 1 when only the candidate is absent.
///
/// # Panics
///
/// Panics if a present candidate reports non-positive HP; the environment must not list
/// dead units as present.
#[derive(Debug, Clone)]
pub struct HpRatio;

impl UnitFeature for HpRatio {
    fn id(&self) -> &'static str {
        "hp_ratio"
    }
    fn name(&self) -> &'static str {
        "HP Ratio"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, _ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        let Some(attacker) = matchup.attacker else {
            return 0.0;
        };
        let Some(candidate) = matchup.candidate else {
            return 1.0;
        };
        assert!(
            candidate.hp > 0,
            "candidate {} is present with non-positive hp {}",
            candidate.id,
            candidate.hp
        );
        f64::from(attacker.hp) / f64::from(candidate.hp)
    }
}

/// The attacker's current HP; 0 when absent.
#[derive(Debug, Clone)]
pub struct AttackerHp;

impl UnitFeature for AttackerHp {
    fn id(&self) -> &'static str {
        "attacker_hp"
    }
    fn name(&self) -> &'static str {
        "Attacker HP"
    }
    fn clone_boxed(&self) -> BoxedUnitFeature {
        Box::new(self.clone())
    }
    fn extract(&self, _ctx: &FeatureContext<'_>, matchup: &Matchup<'_>) -> f64 {
        matchup.attacker.map_or(0.0, |a| f64::from(a.hp))
    }
}
