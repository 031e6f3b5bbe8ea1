//! Live unit tracking for one episode.

use skirmish_engine::{DeathEvent, Side, Snapshot, UnitId};

/// Live friendly and enemy unit ids, in listing order.
///
/// Ids are only ever removed: a unit leaves its list on the turn its death is observed and
/// is never re-added within the episode. A fresh roster is built for every episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    friendly: Vec<UnitId>,
    enemy: Vec<UnitId>,
}

impl Roster {
    #[must_use]
    pub fn new(friendly: Vec<UnitId>, enemy: Vec<UnitId>) -> Self {
        Self { friendly, enemy }
    }

    /// Builds a roster from the units listed in `snapshot` for each side.
    ///
    /// Only units whose template matches `template` (case-insensitively) are tracked.
    /// Other units are logged and left out.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, template: &str) -> Self {
        let collect = |side: Side| {
            snapshot
                .unit_ids(side)
                .filter(|id| {
                    let Some(unit) = snapshot.unit(*id) else {
                        return false;
                    };
                    let known = unit.template.eq_ignore_ascii_case(template);
                    if !known {
                        tracing::warn!(
                            unit = %unit.id,
                            template = %unit.template,
                            ?side,
                            "unknown unit type, excluded from roster"
                        );
                    }
                    known
                })
                .collect()
        };
        Self {
            friendly: collect(Side::Friendly),
            enemy: collect(Side::Enemy),
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &[UnitId] {
        match side {
            Side::Friendly => &self.friendly,
            Side::Enemy => &self.enemy,
        }
    }

    #[must_use]
    pub fn friendly(&self) -> &[UnitId] {
        &self.friendly
    }

    #[must_use]
    pub fn enemy(&self) -> &[UnitId] {
        &self.enemy
    }

    #[must_use]
    pub fn contains(&self, side: Side, id: UnitId) -> bool {
        self.side(side).contains(&id)
    }

    /// Removes the units named by `deaths` and returns the events that removed someone.
    ///
    /// Deaths of units that are not on the roster (untracked templates, or already removed)
    /// are ignored.
    pub fn remove_dead<'e>(&mut self, deaths: &'e [DeathEvent]) -> Vec<&'e DeathEvent> {
        deaths
            .iter()
            .filter(|death| {
                let list = match death.side {
                    Side::Friendly => &mut self.friendly,
                    Side::Enemy => &mut self.enemy,
                };
                let Some(index) = list.iter().position(|id| *id == death.unit) else {
                    return false;
                };
                list.remove(index);
                true
            })
            .collect()
    }
}
