//! Alternation of evaluation and learning episodes.
//!
//! Training runs in blocks: a fixed number of evaluation episodes with frozen weights and no
//! exploration, then a fixed number of learning episodes, repeating. The first block is an
//! evaluation block, so the curve starts from the untrained weights.
//!
//! When an evaluation block completes, the average cumulative reward of its episodes is
//! reported as a [`BlockSummary`].

use serde::{Deserialize, Serialize};

use crate::curve::BlockSummary;

/// Whether the current episode is used for learning or for scoring the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Learning,
    Evaluating,
}

/// Phase bookkeeping across episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCycle {
    evaluation_episodes: usize,
    learning_episodes: usize,
    phase: Phase,
    episodes_in_phase: usize,
    learning_episodes_played: usize,
    block_reward: f64,
}

impl PhaseCycle {
    /// # Panics
    ///
    /// Panics if either block length is zero.
    #[must_use]
    pub fn new(evaluation_episodes: usize, learning_episodes: usize) -> Self {
        assert!(
            evaluation_episodes > 0 && learning_episodes > 0,
            "phase blocks must contain at least one episode"
        );
        Self {
            evaluation_episodes,
            learning_episodes,
            phase: Phase::Evaluating,
            episodes_in_phase: 0,
            learning_episodes_played: 0,
            block_reward: 0.0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Episodes completed in the current block.
    #[must_use]
    pub fn episodes_in_phase(&self) -> usize {
        self.episodes_in_phase
    }

    #[must_use]
    pub fn learning_episodes_played(&self) -> usize {
        self.learning_episodes_played
    }

    /// Records a finished episode and advances the phase when its block is full.
    ///
    /// Returns the block summary when this episode completed an evaluation block.
    #[expect(clippy::cast_precision_loss)]
    pub fn complete_episode(&mut self, cumulative_reward: f64) -> Option<BlockSummary> {
        self.block_reward += cumulative_reward;
        self.episodes_in_phase += 1;
        match self.phase {
            Phase::Evaluating if self.episodes_in_phase == self.evaluation_episodes => {
                let summary = BlockSummary {
                    games_played: self.learning_episodes_played,
                    average_reward: self.block_reward / self.evaluation_episodes as f64,
                };
                self.enter(Phase::Learning);
                Some(summary)
            }
            Phase::Learning => {
                self.learning_episodes_played += 1;
                if self.episodes_in_phase == self.learning_episodes {
                    self.enter(Phase::Evaluating);
                }
                None
            }
            Phase::Evaluating => None,
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.episodes_in_phase = 0;
        self.block_reward = 0.0;
    }
}
