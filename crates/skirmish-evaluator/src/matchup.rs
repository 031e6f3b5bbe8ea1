//! Per-turn context shared by every feature extraction.
//!
//! [`FeatureContext`] bundles what a feature may look at for one turn: the current
//! [`Snapshot`], the episode [`History`] and the live enemy roster. [`Matchup`] resolves an
//! (attacker, candidate) pair against the snapshot once, so individual features do not repeat
//! the lookups. Either unit may be absent; features must map absence to a default value.

use skirmish_engine::{CommandResult, History, Side, Snapshot, TurnRecord, UnitId, UnitView};

#[derive(Debug, Clone, Copy)]
pub struct FeatureContext<'a> {
    snapshot: &'a Snapshot,
    history: &'a History,
    live_enemies: &'a [UnitId],
}

impl<'a> FeatureContext<'a> {
    #[must_use]
    pub fn new(snapshot: &'a Snapshot, history: &'a History, live_enemies: &'a [UnitId]) -> Self {
        Self {
            snapshot,
            history,
            live_enemies,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    #[must_use]
    pub fn history(&self) -> &'a History {
        self.history
    }

    /// Live enemy ids in roster order.
    #[must_use]
    pub fn live_enemies(&self) -> &'a [UnitId] {
        self.live_enemies
    }

    /// Live enemies that are visible in the snapshot, in roster order.
    pub fn visible_enemies(&self) -> impl Iterator<Item = &'a UnitView> + 'a {
        let snapshot = self.snapshot;
        self.live_enemies
            .iter()
            .filter_map(move |id| snapshot.unit(*id))
    }

    /// Record of the turn before the snapshot's turn; `None` on turn 0.
    #[must_use]
    pub fn previous_record(&self) -> Option<&'a TurnRecord> {
        self.history.turn(self.snapshot.previous_turn()?)
    }

    /// Command `unit` executed on the previous turn, if any.
    #[must_use]
    pub fn previous_command(&self, side: Side, unit: UnitId) -> Option<&'a CommandResult> {
        self.previous_record()?.command_of(side, unit)
    }

    /// Nearest visible live enemy to `attacker` by Chebyshev distance.
    ///
    /// Ties go to the enemy that comes first in roster order.
    #[must_use]
    pub fn closest_enemy(&self, attacker: &UnitView) -> Option<UnitId> {
        let mut closest: Option<(u32, UnitId)> = None;
        for enemy in self.visible_enemies() {
            let distance = attacker.position.chebyshev_distance(enemy.position);
            if closest.is_none_or(|(best, _)| distance < best) {
                closest = Some((distance, enemy.id));
            }
        }
        closest.map(|(_, id)| id)
    }

    #[must_use]
    pub fn matchup(&self, attacker: UnitId, candidate: UnitId) -> Matchup<'a> {
        Matchup {
            attacker_id: attacker,
            candidate_id: candidate,
            attacker: self.snapshot.unit(attacker),
            candidate: self.snapshot.unit(candidate),
        }
    }
}

/// An attacker paired with a candidate target, resolved against one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    pub attacker_id: UnitId,
    pub candidate_id: UnitId,
    pub attacker: Option<&'a UnitView>,
    pub candidate: Option<&'a UnitView>,
}

#[cfg(test)]
mod tests {
    use skirmish_engine::Position;

    use super::*;

    fn unit(id: u32, side: Side, x: i32, y: i32) -> UnitView {
        UnitView {
            id: UnitId(id),
            side,
            template: "footman".to_owned(),
            position: Position::new(x, y),
            hp: 10,
        }
    }

    #[test]
    fn test_closest_enemy_prefers_roster_order_on_ties() {
        let snapshot = Snapshot::from_units(
            0,
            [
                unit(0, Side::Friendly, 0, 0),
                unit(1, Side::Enemy, 2, 0),
                unit(2, Side::Enemy, 0, 2),
                unit(3, Side::Enemy, 5, 5),
            ],
        );
        let history = History::new();
        let enemies = [UnitId(2), UnitId(1), UnitId(3)];
        let ctx = FeatureContext::new(&snapshot, &history, &enemies);
        let attacker = snapshot.unit(UnitId(0)).unwrap();
        assert_eq!(ctx.closest_enemy(attacker), Some(UnitId(2)));
    }

    #[test]
    fn test_closest_enemy_skips_invisible_units() {
        let snapshot = Snapshot::from_units(
            0,
            [unit(0, Side::Friendly, 0, 0), unit(3, Side::Enemy, 5, 5)],
        );
        let history = History::new();
        let enemies = [UnitId(1), UnitId(3)];
        let ctx = FeatureContext::new(&snapshot, &history, &enemies);
        let attacker = snapshot.unit(UnitId(0)).unwrap();
        assert_eq!(ctx.closest_enemy(attacker), Some(UnitId(3)));
    }

    #[test]
    fn test_previous_record_absent_on_first_turn() {
        let snapshot = Snapshot::new(0);
        let history = History::new();
        let ctx = FeatureContext::new(&snapshot, &history, &[]);
        assert!(ctx.previous_record().is_none());
        assert!(ctx.previous_command(Side::Friendly, UnitId(0)).is_none());
    }
}
