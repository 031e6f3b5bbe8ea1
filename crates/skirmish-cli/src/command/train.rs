use std::path::PathBuf;

use anyhow::Context as _;
use skirmish_engine::ScenarioConfig;
use skirmish_training::{
    config::{DEFAULT_WEIGHTS_PATH, TrainingConfig},
    controller::EpisodeController,
    trainer::Trainer,
};

use crate::{model::training_report::TrainingReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Episode budget; training stops once more than this many episodes have completed
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Start from the persisted weights instead of random ones
    #[arg(long)]
    load_weights: bool,
    /// Weight file path
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    weights: PathBuf,
    /// Seed for weight initialisation, exploration and scenario layout
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Exploration probability during learning episodes
    #[arg(long, default_value_t = 0.02)]
    epsilon: f64,
    /// Friendly units per scenario
    #[arg(long, default_value_t = 5)]
    friendly: usize,
    /// Enemy units per scenario
    #[arg(long, default_value_t = 5)]
    enemy: usize,
    /// Re-target and update after every turn, not only after combat turns
    #[arg(long)]
    replan_every_turn: bool,
    /// Write a JSON training report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

impl TrainArg {
    pub(crate) fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            total_episodes: self.episodes,
            load_weights: self.load_weights,
            weights_path: self.weights.clone(),
            epsilon: self.epsilon,
            seed: self.seed,
            replan_every_turn: self.replan_every_turn,
            ..TrainingConfig::default()
        }
    }

    fn scenario(&self) -> ScenarioConfig {
        ScenarioConfig {
            friendly_count: self.friendly,
            enemy_count: self.enemy,
            ..ScenarioConfig::default()
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.training_config();
    let scenario = arg.scenario();
    let mut controller =
        EpisodeController::new(&config).context("Invalid training configuration")?;

    println!("Running {} episodes.", config.total_episodes);
    let trainer = Trainer::new(scenario.clone(), config.seed);
    let summary = trainer
        .run_with(&mut controller, |report, controller| {
            if report.block.is_some() {
                println!();
                println!("{}", controller.curve());
            }
        })
        .context("Training failed")?;

    println!(
        "All episodes completed. Wins: {} Losses: {}",
        summary.tally.wins, summary.tally.losses
    );
    if let Some(win_rate) = summary.tally.win_rate() {
        println!("Win rate: {:.1}%", win_rate * 100.0);
    }
    if let Some(stats) = summary.curve.reward_stats() {
        println!(
            "Evaluation averages over {} blocks: mean {:.2}, best {:.2}, worst {:.2}",
            stats.count, stats.mean, stats.max, stats.min
        );
    }

    if let Some(path) = &arg.report {
        let report = TrainingReport::new(&config, &scenario, &summary, controller.registry());
        util::save_json(&report, path)?;
        tracing::info!(path = %path.display(), "wrote training report");
    }
    Ok(())
}
