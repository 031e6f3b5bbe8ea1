use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::unit::{Side, UnitId};

/// An order for `attacker` to attack `target` until it dies or a new order arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackCommand {
    pub attacker: UnitId,
    pub target: UnitId,
}

impl AttackCommand {
    #[must_use]
    pub const fn new(attacker: UnitId, target: UnitId) -> Self {
        Self { attacker, target }
    }
}

/// New orders for this turn, keyed by the ordered unit.
///
/// An empty map means "keep doing what you were doing".
pub type Orders = BTreeMap<UnitId, AttackCommand>;

/// How far a command got during the turn it was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum CommandFeedback {
    /// The attack landed this turn.
    Completed,
    /// The unit is still closing distance.
    Incomplete,
    /// The target no longer exists.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub command: AttackCommand,
    pub feedback: CommandFeedback,
}

/// `attacker` dealt `damage` to `defender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub attacker: UnitId,
    pub attacker_side: Side,
    pub defender: UnitId,
    pub defender_side: Side,
    pub damage: i32,
}

/// `unit`, controlled by `side`, died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub unit: UnitId,
    pub side: Side,
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub damage: Vec<DamageEvent>,
    pub deaths: Vec<DeathEvent>,
    pub friendly_commands: BTreeMap<UnitId, CommandResult>,
    pub enemy_commands: BTreeMap<UnitId, CommandResult>,
}

impl TurnRecord {
    #[must_use]
    pub fn commands(&self, side: Side) -> &BTreeMap<UnitId, CommandResult> {
        match side {
            Side::Friendly => &self.friendly_commands,
            Side::Enemy => &self.enemy_commands,
        }
    }

    pub fn commands_mut(&mut self, side: Side) -> &mut BTreeMap<UnitId, CommandResult> {
        match side {
            Side::Friendly => &mut self.friendly_commands,
            Side::Enemy => &mut self.enemy_commands,
        }
    }

    /// Returns the command `unit` executed during this turn, if any.
    #[must_use]
    pub fn command_of(&self, side: Side, unit: UnitId) -> Option<&CommandResult> {
        self.commands(side).get(&unit)
    }

    /// Whether any damage was dealt or any unit died.
    #[must_use]
    pub fn has_combat_events(&self) -> bool {
        !self.damage.is_empty() || !self.deaths.is_empty()
    }
}

/// Per-turn records of an episode, indexed by turn number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<TurnRecord>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record of `turn`, or `None` if that turn has not been played.
    #[must_use]
    pub fn turn(&self, turn: u32) -> Option<&TurnRecord> {
        self.turns.get(usize::try_from(turn).ok()?)
    }

    /// Number of turns recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends the record of the next turn.
    pub fn push(&mut self, record: TurnRecord) {
        self.turns.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_turn_is_none() {
        let mut history = History::new();
        assert!(history.turn(0).is_none());
        history.push(TurnRecord::default());
        assert!(history.turn(0).is_some());
        assert!(history.turn(1).is_none());
    }

    #[test]
    fn test_combat_events() {
        let mut record = TurnRecord::default();
        assert!(!record.has_combat_events());
        record.deaths.push(DeathEvent {
            unit: UnitId(3),
            side: Side::Enemy,
        });
        assert!(record.has_combat_events());
    }

    #[test]
    fn test_command_lookup_by_side() {
        let mut record = TurnRecord::default();
        let command = AttackCommand::new(UnitId(1), UnitId(2));
        record.commands_mut(Side::Friendly).insert(
            UnitId(1),
            CommandResult {
                command,
                feedback: CommandFeedback::Completed,
            },
        );
        assert_eq!(
            record.command_of(Side::Friendly, UnitId(1)).map(|r| r.command),
            Some(command)
        );
        assert!(record.command_of(Side::Enemy, UnitId(1)).is_none());
    }
}
