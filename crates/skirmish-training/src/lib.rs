//! Training system that learns target-selection weights by temporal-difference updates.
//!
//! This crate turns the evaluator's linear Q-estimate into an online learner. Friendly units
//! pick targets with an epsilon-greedy policy; after each combat turn every unit's reward is
//! measured and the weights are nudged toward `reward + γ·max Q(s')`.
//!
//! # How Training Works
//!
//! 1. **Evaluate** - Play a block of episodes greedily with frozen weights and record the
//!    average cumulative reward
//! 2. **Learn** - Play a block of episodes with exploration and TD updates after every combat
//!    turn
//! 3. **Persist** - Save the weights after every episode
//! 4. **Repeat** - Alternate until the episode budget is spent
//!
//! # Architecture
//!
//! ```text
//! Trainer / play_episode (drive episodes against an Environment)
//!     ↓ uses
//! EpisodeController (phase cycle, roster, per-turn flow)
//!     ↓ uses
//! TdUpdater + WeightStore (weight vector updates and persistence)
//!     ↓ reads
//! LinearQEstimator, RewardCalculator, EpsilonGreedy (skirmish-evaluator)
//! ```
//!
//! # Modules
//!
//! - [`config`] - Run parameters and their defaults
//! - [`controller`] - The per-episode state machine
//! - [`curve`] - Evaluation block results and win/loss counts
//! - [`phase`] - Alternation of evaluation and learning blocks
//! - [`td`] - One-step TD update
//! - [`trainer`] - Episode loop over the reference simulator
//! - [`weight_store`] - Plain-text weight file
//! - [`weights`] - Weight vector operations
//!
//! # Example
//!
//! ```rust,no_run
//! use skirmish_engine::ScenarioConfig;
//! use skirmish_training::{
//!     config::TrainingConfig, controller::EpisodeController, trainer::Trainer,
//! };
//!
//! let config = TrainingConfig::default();
//! let mut controller = EpisodeController::new(&config)?;
//! let trainer = Trainer::new(ScenarioConfig::default(), config.seed);
//! let summary = trainer.run(&mut controller)?;
//! println!("{}", summary.curve);
//! # Ok::<(), skirmish_training::trainer::TrainingError>(())
//! ```

pub mod config;
pub mod controller;
pub mod curve;
pub mod phase;
pub mod td;
pub mod trainer;
pub mod weight_store;
pub mod weights;
