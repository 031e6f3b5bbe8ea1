//! Environment boundary for the skirmish learning controller.
//!
//! The controller never drives units directly. Every turn it receives a [`Snapshot`] of the
//! visible units and a [`History`] of what happened on earlier turns, and answers with
//! [`Orders`]: at most one [`AttackCommand`] per friendly unit.
//!
//! - [`core`] holds the boundary data model (units, events, commands).
//! - [`engine`] holds the [`Environment`] trait and [`Skirmish`], a small deterministic
//!   reference simulator that implements it.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// An order the environment cannot execute.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OrderError {
    #[display("unit {_0} is not a live friendly unit")]
    UnknownAttacker(#[error(not(source))] UnitId),
    #[display("unit {_0} is not a live enemy unit")]
    UnknownTarget(#[error(not(source))] UnitId),
    #[display("order for {key} names attacker {attacker}")]
    MismatchedAttacker { key: UnitId, attacker: UnitId },
}

/// A scenario that cannot be laid out on its grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScenarioError {
    #[display("{count} {side:?} units do not fit in {rows} rows")]
    TooManyUnits { side: Side, count: usize, rows: usize },
    #[display("grid must be at least 3 cells wide, got {_0}")]
    GridTooNarrow(#[error(not(source))] i32),
    #[display("damage range {min}..={max} is empty or non-positive")]
    InvalidDamage { min: i32, max: i32 },
    #[display("unit hp must be positive, got {_0}")]
    InvalidHp(#[error(not(source))] i32),
}
