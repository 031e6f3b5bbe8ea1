//! Per-turn reward for friendly units.
//!
//! The reward for unit `u` over one turn is:
//!
//! ```text
//! r = TURN_COST
//!   + damage dealt by u to enemies
//!   - damage received by u from enemies
//!   + KILL_BONUS      if u holds the death credit for an enemy that died
//!   - DEATH_PENALTY   if u itself died
//! ```
//!
//! Rewards are never discounted here; discounting belongs to the weight update.
//!
//! # Death Credit
//!
//! Several units may have been attacking the enemy that died. The credit goes to exactly one
//! of them: [`DeathCredit::assign`] walks the friendly roster in order and gives each dead
//! enemy to the first unit whose command on that turn completed against it. A unit with no
//! command that turn (turn 0, or a unit that was never ordered) simply has no claim.
//!
//! Because the credit table is fixed before any reward is computed, [`RewardCalculator::reward`]
//! is a pure function of its inputs: asking twice gives the same answer.

use std::collections::BTreeMap;

use skirmish_engine::{TurnRecord, UnitId};

/// Cost of every turn, regardless of what happened.
pub const TURN_COST: f64 = -0.1;
/// Bonus for the unit credited with an enemy's death.
pub const KILL_BONUS: f64 = 100.0;
/// Penalty for a friendly unit's own death.
pub const DEATH_PENALTY: f64 = 100.0;

/// Which friendly unit is credited with each enemy death on one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathCredit {
    claims: BTreeMap<UnitId, UnitId>,
}

impl DeathCredit {
    /// Assigns each enemy death in `record` to at most one friendly unit.
    ///
    /// `friendly_order` is the roster order used to break contention; it should list the
    /// friendly units as they stood before the turn's deaths were applied.
    #[must_use]
    pub fn assign(record: Option<&TurnRecord>, friendly_order: &[UnitId]) -> Self {
        let mut claims = BTreeMap::new();
        let Some(record) = record else {
            return Self { claims };
        };
        for death in record.deaths.iter().filter(|d| d.side.is_enemy()) {
            if claims.contains_key(&death.unit) {
                continue;
            }
            let claimant = friendly_order.iter().copied().find(|unit| {
                record
                    .friendly_commands
                    .get(unit)
                    .is_some_and(|r| r.feedback.is_completed() && r.command.target == death.unit)
            });
            if let Some(claimant) = claimant {
                claims.insert(death.unit, claimant);
            }
        }
        Self { claims }
    }

    /// The friendly unit credited with `enemy`'s death, if any.
    #[must_use]
    pub fn claimant(&self, enemy: UnitId) -> Option<UnitId> {
        self.claims.get(&enemy).copied()
    }

    /// Number of enemy deaths credited to `unit`.
    #[must_use]
    pub fn kills_of(&self, unit: UnitId) -> usize {
        self.claims.values().filter(|c| **c == unit).count()
    }
}

/// Scores friendly units for one elapsed turn.
#[derive(Debug, Clone)]
pub struct RewardCalculator<'a> {
    record: Option<&'a TurnRecord>,
    credit: DeathCredit,
}

impl<'a> RewardCalculator<'a> {
    /// `record` is the elapsed turn (`None` when nothing was recorded).
    #[must_use]
    pub fn new(record: Option<&'a TurnRecord>, friendly_order: &[UnitId]) -> Self {
        Self {
            record,
            credit: DeathCredit::assign(record, friendly_order),
        }
    }

    #[must_use]
    pub fn credit(&self) -> &DeathCredit {
        &self.credit
    }

    /// Reward earned by friendly unit `unit` over the elapsed turn.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn reward(&self, unit: UnitId) -> f64 {
        let mut reward = TURN_COST;
        let Some(record) = self.record else {
            return reward;
        };

        for event in &record.damage {
            let dealt = event.attacker == unit
                && event.attacker_side.is_friendly()
                && event.defender_side.is_enemy();
            let received = event.defender == unit
                && event.defender_side.is_friendly()
                && event.attacker_side.is_enemy();
            if dealt {
                reward += f64::from(event.damage);
            } else if received {
                reward -= f64::from(event.damage);
            }
        }

        reward += KILL_BONUS * self.credit.kills_of(unit) as f64;

        let died = record
            .deaths
            .iter()
            .any(|d| d.unit == unit && d.side.is_friendly());
        if died {
            reward -= DEATH_PENALTY;
        }

        reward
    }
}
