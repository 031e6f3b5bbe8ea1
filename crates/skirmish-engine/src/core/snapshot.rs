use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::unit::{Side, UnitId, UnitView};

/// The state of every visible unit at the start of a turn.
///
/// Units that are dead or out of view are simply absent; [`Snapshot::unit`]
/// returning `None` is an ordinary answer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    turn: u32,
    units: BTreeMap<UnitId, UnitView>,
}

impl Snapshot {
    #[must_use]
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            units: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn from_units<I>(turn: u32, units: I) -> Self
    where
        I: IntoIterator<Item = UnitView>,
    {
        Self {
            turn,
            units: units.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Turn index this snapshot was taken at (0 for the first turn).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Index of the turn before this one, or `None` on the first turn.
    #[must_use]
    pub fn previous_turn(&self) -> Option<u32> {
        self.turn.checked_sub(1)
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.get(&id)
    }

    /// Ids of the visible units controlled by `side`, in ascending order.
    pub fn unit_ids(&self, side: Side) -> impl Iterator<Item = UnitId> + '_ {
        self.units
            .values()
            .filter(move |u| u.side == side)
            .map(|u| u.id)
    }
}
