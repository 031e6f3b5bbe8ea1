use crate::{History, OrderError, Orders, Snapshot};

/// A turn-synchronous simulation that accepts attack orders.
pub trait Environment {
    /// State at the start of the current turn.
    fn snapshot(&self) -> &Snapshot;

    /// Records of all turns resolved so far in this episode.
    fn history(&self) -> &History;

    /// Whether the episode has reached a terminating condition.
    fn is_over(&self) -> bool;

    /// Submits this turn's orders and resolves the turn.
    fn apply(&mut self, orders: &Orders) -> Result<(), OrderError>;
}
