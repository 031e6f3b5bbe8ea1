//! Training run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the persisted weight file.
pub const DEFAULT_WEIGHTS_PATH: &str = "agent_weights/weights.txt";

/// Parameters of one training run.
///
/// The defaults reproduce the reference protocol: blocks of 5 evaluation episodes
/// alternating with blocks of 10 learning episodes, starting with evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes after which training stops.
    ///
    /// Training ends once the completed episode count exceeds this value.
    pub total_episodes: usize,
    /// Restore weights from [`Self::weights_path`] instead of drawing random ones.
    pub load_weights: bool,
    pub weights_path: PathBuf,
    /// Exploration probability during learning episodes.
    pub epsilon: f64,
    /// Discount applied to the bootstrap estimate.
    pub gamma: f64,
    pub learning_rate: f64,
    pub evaluation_episodes: usize,
    pub learning_episodes: usize,
    /// Seed of the single random stream used for weight initialisation and exploration.
    pub seed: u64,
    /// Unit template tracked on both sides.
    pub template: String,
    /// Issue orders and update weights every turn instead of only after combat turns.
    pub replan_every_turn: bool,
}

/// A training configuration the controller cannot run with.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("epsilon must be within [0, 1], got {_0}")]
    InvalidEpsilon(#[error(not(source))] f64),
    #[display("gamma must be within [0, 1], got {_0}")]
    InvalidGamma(#[error(not(source))] f64),
    #[display("learning rate must be finite and positive, got {_0}")]
    InvalidLearningRate(#[error(not(source))] f64),
    #[display("{phase} blocks must contain at least one episode")]
    EmptyBlock { phase: &'static str },
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.evaluation_episodes == 0 {
            return Err(ConfigError::EmptyBlock {
                phase: "evaluation",
            });
        }
        if self.learning_episodes == 0 {
            return Err(ConfigError::EmptyBlock { phase: "learning" });
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total_episodes: 10,
            load_weights: false,
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            epsilon: 0.02,
            gamma: 0.9,
            learning_rate: 1e-4,
            evaluation_episodes: 5,
            learning_episodes: 10,
            seed: 12345,
            template: "footman".to_owned(),
            replan_every_turn: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.total_episodes, 10);
        assert_eq!(config.epsilon, 0.02);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.learning_rate, 1e-4);
        assert_eq!(config.evaluation_episodes, 5);
        assert_eq!(config.learning_episodes, 10);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.weights_path, PathBuf::from("agent_weights/weights.txt"));
        assert!(!config.replan_every_turn);
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TrainingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_parameters() {
        let config = TrainingConfig {
            epsilon: 1.5,
            ..TrainingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidEpsilon(1.5)));

        let config = TrainingConfig {
            epsilon: f64::NAN,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEpsilon(_))
        ));

        let config = TrainingConfig {
            gamma: -0.1,
            ..TrainingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidGamma(-0.1)));

        let config = TrainingConfig {
            learning_rate: 0.0,
            ..TrainingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLearningRate(0.0)));
    }

    #[test]
    fn test_rejects_empty_blocks() {
        let config = TrainingConfig {
            learning_episodes: 0,
            ..TrainingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyBlock { phase: "learning" })
        );

        let config = TrainingConfig {
            evaluation_episodes: 0,
            ..TrainingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyBlock {
                phase: "evaluation"
            })
        );
    }
}
