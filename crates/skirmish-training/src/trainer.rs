//! Episode driver.
//!
//! [`play_episode`] runs one episode of an [`EpisodeController`] against any [`Environment`].
//! [`Trainer`] repeats it against freshly laid out [`Skirmish`] scenarios until the controller
//! reports that training is done. Ending the process is left to the caller.

use serde::{Deserialize, Serialize};
use skirmish_engine::{Environment, OrderError, ScenarioConfig, ScenarioError, Skirmish};

use crate::{
    config::ConfigError,
    controller::{EpisodeController, EpisodeReport, TurnResponse},
    curve::{LearningCurve, WinLossTally},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training configuration: {_0}")]
    Config(ConfigError),
    #[display("invalid scenario: {_0}")]
    Scenario(ScenarioError),
    #[display("environment rejected orders: {_0}")]
    Order(OrderError),
}

/// Plays one episode to its end.
pub fn play_episode<E>(
    controller: &mut EpisodeController,
    env: &mut E,
) -> Result<EpisodeReport, OrderError>
where
    E: Environment + ?Sized,
{
    controller.begin_episode(env.snapshot());
    while !env.is_over() {
        match controller.step(env.snapshot(), env.history()) {
            TurnResponse::Orders(orders) => env.apply(&orders)?,
            TurnResponse::EpisodeOver => break,
        }
    }
    Ok(controller.end_episode(env.snapshot(), env.history()))
}

/// Outcome of a whole training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub curve: LearningCurve,
    pub tally: WinLossTally,
    pub weights: Vec<f64>,
}

/// Runs episodes on the reference simulator.
///
/// Episode `i` is laid out with seed `seed + i`, so a run is reproducible given the same
/// scenario, seed and controller configuration.
#[derive(Debug, Clone)]
pub struct Trainer {
    scenario: ScenarioConfig,
    seed: u64,
}

impl Trainer {
    #[must_use]
    pub fn new(scenario: ScenarioConfig, seed: u64) -> Self {
        Self { scenario, seed }
    }

    #[must_use]
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn run(
        &self,
        controller: &mut EpisodeController,
    ) -> Result<TrainingSummary, TrainingError> {
        self.run_with(controller, |_, _| {})
    }

    /// Like [`Self::run`], calling `on_episode` after every finished episode.
    pub fn run_with<F>(
        &self,
        controller: &mut EpisodeController,
        mut on_episode: F,
    ) -> Result<TrainingSummary, TrainingError>
    where
        F: FnMut(&EpisodeReport, &EpisodeController),
    {
        self.scenario.validate()?;
        let mut offset = 0u64;
        while !controller.is_done() {
            let mut env = Skirmish::new(self.scenario.clone(), self.seed.wrapping_add(offset))?;
            let report = play_episode(controller, &mut env)?;
            on_episode(&report, controller);
            offset += 1;
        }
        Ok(TrainingSummary {
            episodes: controller.completed_episodes(),
            curve: controller.curve().clone(),
            tally: controller.tally(),
            weights: controller.weights().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use skirmish_engine::Side;

    use super::*;
    use crate::config::TrainingConfig;

    fn duel() -> ScenarioConfig {
        ScenarioConfig {
            width: 4,
            height: 1,
            friendly_count: 1,
            enemy_count: 1,
            hp: 6,
            min_damage: 3,
            max_damage: 3,
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn test_play_episode_runs_to_elimination() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainingConfig {
            weights_path: dir.path().join("weights.txt"),
            ..TrainingConfig::default()
        };
        let mut controller = EpisodeController::with_weights(&config, vec![0.0; 7]).unwrap();
        let mut env = Skirmish::new(duel(), 1).unwrap();

        let report = play_episode(&mut controller, &mut env).unwrap();
        assert!(env.is_over());
        assert_eq!(report.episode, 0);
        assert_eq!(report.won, env.survivors(Side::Friendly) > 0);
        assert_eq!(controller.completed_episodes(), 1);
        assert!(controller.roster().is_none());
    }

    #[test]
    fn test_run_rejects_invalid_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainingConfig {
            weights_path: dir.path().join("weights.txt"),
            ..TrainingConfig::default()
        };
        let mut controller = EpisodeController::with_weights(&config, vec![0.0; 7]).unwrap();
        let trainer = Trainer::new(
            ScenarioConfig {
                width: 2,
                ..duel()
            },
            0,
        );
        assert!(matches!(
            trainer.run(&mut controller),
            Err(TrainingError::Scenario(ScenarioError::GridTooNarrow(2)))
        ));
        assert_eq!(controller.completed_episodes(), 0);
    }

    #[test]
    fn test_run_rejects_zero_hp_before_playing() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainingConfig {
            weights_path: dir.path().join("weights.txt"),
            ..TrainingConfig::default()
        };
        let mut controller = EpisodeController::with_weights(&config, vec![0.0; 7]).unwrap();
        let trainer = Trainer::new(ScenarioConfig { hp: 0, ..duel() }, 0);
        assert!(matches!(
            trainer.run(&mut controller),
            Err(TrainingError::Scenario(ScenarioError::InvalidHp(0)))
        ));
        assert_eq!(controller.completed_episodes(), 0);
    }
}
