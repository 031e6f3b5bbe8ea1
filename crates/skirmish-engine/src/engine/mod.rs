//! Environment trait and the reference skirmish simulator.
//!
//! - [`Environment`] - what the controller needs from a simulation: a snapshot, a history,
//!   an end-of-episode test and a way to submit orders
//! - [`Skirmish`] - a seeded grid battle between two squads that implements [`Environment`]
//! - [`ScenarioConfig`] - squad sizes, grid dimensions and combat constants for [`Skirmish`]
//!
//! # Turn Flow
//!
//! 1. The controller reads [`Environment::snapshot`] and [`Environment::history`]
//! 2. It answers with [`Orders`](crate::Orders) via [`Environment::apply`]
//! 3. The environment resolves the turn and appends a [`TurnRecord`](crate::TurnRecord)
//! 4. Repeat until [`Environment::is_over`]

pub use self::{environment::*, scenario::*, skirmish::*};

mod environment;
mod scenario;
mod skirmish;
