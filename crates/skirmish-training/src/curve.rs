//! Training progress records.

use std::fmt;

use serde::{Deserialize, Serialize};
use skirmish_stats::descriptive::DescriptiveStats;

/// Result of one evaluation block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Learning episodes played before this block.
    pub games_played: usize,
    /// Mean cumulative reward over the block's episodes.
    pub average_reward: f64,
}

/// Evaluation block results in the order they were produced.
///
/// The [`Display`](fmt::Display) impl renders the two-column progress table printed after
/// every evaluation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    blocks: Vec<BlockSummary>,
}

impl LearningCurve {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: BlockSummary) {
        self.blocks.push(block);
    }

    #[must_use]
    pub fn blocks(&self) -> &[BlockSummary] {
        &self.blocks
    }

    #[must_use]
    pub fn last(&self) -> Option<&BlockSummary> {
        self.blocks.last()
    }

    /// Statistics of the block averages; `None` before the first block.
    #[must_use]
    pub fn reward_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.blocks.iter().map(|b| b.average_reward))
    }
}

const GAMES_COLUMN: &str = "-------------     ";

impl fmt::Display for LearningCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games Played      Average Cumulative Reward")?;
        writeln!(f, "{GAMES_COLUMN}-------------------------")?;
        for block in &self.blocks {
            writeln!(
                f,
                "{:<width$}{:.2}",
                block.games_played,
                block.average_reward,
                width = GAMES_COLUMN.len()
            )?;
        }
        Ok(())
    }
}

/// Count of won and lost episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossTally {
    pub wins: usize,
    pub losses: usize,
}

impl WinLossTally {
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    #[must_use]
    pub fn episodes(&self) -> usize {
        self.wins + self.losses
    }

    /// Fraction of episodes won; `None` before any episode.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.episodes();
        (total > 0).then(|| self.wins as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let mut curve = LearningCurve::new();
        curve.push(BlockSummary {
            games_played: 0,
            average_reward: -12.5,
        });
        curve.push(BlockSummary {
            games_played: 10,
            average_reward: 87.5,
        });
        let table = curve.to_string();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Games Played      Average Cumulative Reward");
        assert_eq!(lines[1], "-------------     -------------------------");
        assert_eq!(lines[2], "0                 -12.50");
        assert_eq!(lines[3], "10                87.50");
    }

    #[test]
    fn test_reward_stats() {
        let mut curve = LearningCurve::new();
        assert!(curve.reward_stats().is_none());
        curve.push(BlockSummary {
            games_played: 0,
            average_reward: 1.0,
        });
        curve.push(BlockSummary {
            games_played: 10,
            average_reward: 3.0,
        });
        let stats = curve.reward_stats().unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_tally() {
        let mut tally = WinLossTally::default();
        assert_eq!(tally.win_rate(), None);
        tally.record(true);
        tally.record(false);
        tally.record(true);
        tally.record(true);
        assert_eq!(tally.wins, 3);
        assert_eq!(tally.losses, 1);
        assert_eq!(tally.win_rate(), Some(0.75));
    }
}
