use std::collections::BTreeMap;

use rand::{Rng as _, SeedableRng as _, seq::index};
use rand_pcg::Pcg32;

use crate::{
    AttackCommand, CommandFeedback, CommandResult, DamageEvent, DeathEvent, History, OrderError,
    Orders, Position, ScenarioError, Side, Snapshot, TurnRecord, UnitId, UnitView,
};

use super::{environment::Environment, scenario::ScenarioConfig};

/// A seeded grid battle between a friendly and an enemy squad.
///
/// Friendly units start on the left edge and enemy units on the right edge, on randomly
/// chosen rows. Orders are standing: a unit keeps attacking its last target until the target
/// dies or a new order replaces it. Each turn, units act in ascending id order:
///
/// - target gone: the command fails and the standing order is dropped
/// - target adjacent (Chebyshev distance 1): a damage roll lands, the command completes
/// - otherwise: the unit steps one cell toward the target if that cell is free
///
/// The enemy squad attacks its nearest friendly unit, keeping its target while it lives.
#[derive(Debug, Clone)]
pub struct Skirmish {
    config: ScenarioConfig,
    rng: Pcg32,
    units: BTreeMap<UnitId, UnitView>,
    standing_orders: BTreeMap<UnitId, UnitId>,
    snapshot: Snapshot,
    history: History,
}

impl Skirmish {
    pub fn new(config: ScenarioConfig, seed: u64) -> Result<Self, ScenarioError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let rows = usize::try_from(config.height).unwrap_or(0);

        let mut units = BTreeMap::new();
        let mut next_id = 0;
        for (side, count, x) in [
            (Side::Friendly, config.friendly_count, 1),
            (Side::Enemy, config.enemy_count, config.width - 2),
        ] {
            let mut ys: Vec<usize> = index::sample(&mut rng, rows, count).into_vec();
            ys.sort_unstable();
            for y in ys {
                let id = UnitId(next_id);
                next_id += 1;
                units.insert(
                    id,
                    UnitView {
                        id,
                        side,
                        template: config.template.clone(),
                        position: Position::new(x, i32::try_from(y).unwrap_or(i32::MAX)),
                        hp: config.hp,
                    },
                );
            }
        }

        let snapshot = Snapshot::from_units(0, units.values().cloned());
        Ok(Self {
            config,
            rng,
            units,
            standing_orders: BTreeMap::new(),
            snapshot,
            history: History::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Number of live units on `side`.
    #[must_use]
    pub fn survivors(&self, side: Side) -> usize {
        self.units.values().filter(|u| u.side == side).count()
    }

    fn turn(&self) -> u32 {
        self.snapshot.turn()
    }

    fn validate_orders(&self, orders: &Orders) -> Result<(), OrderError> {
        for (key, command) in orders {
            if *key != command.attacker {
                return Err(OrderError::MismatchedAttacker {
                    key: *key,
                    attacker: command.attacker,
                });
            }
            if !self.units.get(key).is_some_and(|u| u.side.is_friendly()) {
                return Err(OrderError::UnknownAttacker(*key));
            }
            if !self
                .units
                .get(&command.target)
                .is_some_and(|u| u.side.is_enemy())
            {
                return Err(OrderError::UnknownTarget(command.target));
            }
        }
        Ok(())
    }

    fn nearest_opponent(&self, unit: &UnitView) -> Option<UnitId> {
        self.units
            .values()
            .filter(|u| u.side == unit.side.opponent())
            .min_by_key(|u| (unit.position.chebyshev_distance(u.position), u.id))
            .map(|u| u.id)
    }

    fn assign_enemy_targets(&mut self) {
        let enemies: Vec<UnitId> = self
            .units
            .values()
            .filter(|u| u.side.is_enemy())
            .map(|u| u.id)
            .collect();
        for id in enemies {
            let keeps_target = self
                .standing_orders
                .get(&id)
                .is_some_and(|target| self.units.contains_key(target));
            if keeps_target {
                continue;
            }
            match self.nearest_opponent(&self.units[&id]) {
                Some(target) => {
                    self.standing_orders.insert(id, target);
                }
                None => {
                    self.standing_orders.remove(&id);
                }
            }
        }
    }

    fn act(&mut self, id: UnitId, record: &mut TurnRecord) {
        let Some(&target) = self.standing_orders.get(&id) else {
            return;
        };
        let Some(actor) = self.units.get(&id) else {
            return;
        };
        let (side, position) = (actor.side, actor.position);
        let command = AttackCommand::new(id, target);

        let feedback = match self.units.get(&target).map(|t| (t.position, t.side)) {
            None => {
                self.standing_orders.remove(&id);
                CommandFeedback::Failed
            }
            Some((target_position, target_side))
                if position.chebyshev_distance(target_position) <= 1 =>
            {
                let damage = self
                    .rng
                    .random_range(self.config.min_damage..=self.config.max_damage);
                record.damage.push(DamageEvent {
                    attacker: id,
                    attacker_side: side,
                    defender: target,
                    defender_side: target_side,
                    damage,
                });
                let defender = self
                    .units
                    .get_mut(&target)
                    .expect("target presence checked above");
                defender.hp -= damage;
                if defender.hp <= 0 {
                    self.units.remove(&target);
                    record.deaths.push(DeathEvent {
                        unit: target,
                        side: target_side,
                    });
                }
                CommandFeedback::Completed
            }
            Some((target_position, _)) => {
                let next = position.step_toward(target_position);
                let occupied = self.units.values().any(|u| u.position == next);
                if !occupied {
                    if let Some(actor) = self.units.get_mut(&id) {
                        actor.position = next;
                    }
                }
                CommandFeedback::Incomplete
            }
        };

        record
            .commands_mut(side)
            .insert(id, CommandResult { command, feedback });
    }
}

impl Environment for Skirmish {
    fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn history(&self) -> &History {
        &self.history
    }

    fn is_over(&self) -> bool {
        self.survivors(Side::Friendly) == 0
            || self.survivors(Side::Enemy) == 0
            || self.turn() >= self.config.turn_limit
    }

    fn apply(&mut self, orders: &Orders) -> Result<(), OrderError> {
        self.validate_orders(orders)?;
        for (id, command) in orders {
            self.standing_orders.insert(*id, command.target);
        }
        self.assign_enemy_targets();

        let mut record = TurnRecord::default();
        let acting: Vec<UnitId> = self.units.keys().copied().collect();
        for id in acting {
            self.act(id, &mut record);
        }
        self.standing_orders
            .retain(|id, _| self.units.contains_key(id));

        self.history.push(record);
        self.snapshot = Snapshot::from_units(self.turn() + 1, self.units.values().cloned());
        Ok(())
    }
}
