use clap::{Parser, Subcommand};

use self::{inspect_weights::InspectWeightsArg, train::TrainArg};

mod inspect_weights;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train target-selection weights on simulated skirmishes
    Train(#[clap(flatten)] TrainArg),
    /// Print the stored weight of every feature
    InspectWeights(#[clap(flatten)] InspectWeightsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::InspectWeights(arg) => inspect_weights::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_train_defaults() {
        let args = CommandArgs::try_parse_from(["skirmish", "train"]).unwrap();
        let Mode::Train(arg) = args.mode else {
            panic!("expected train");
        };
        let config = arg.training_config();
        assert_eq!(config, skirmish_training::config::TrainingConfig::default());
    }

    #[test]
    fn test_train_overrides() {
        let args = CommandArgs::try_parse_from([
            "skirmish",
            "train",
            "--episodes",
            "50",
            "--load-weights",
            "--epsilon",
            "0.1",
            "--seed",
            "7",
        ])
        .unwrap();
        let Mode::Train(arg) = args.mode else {
            panic!("expected train");
        };
        let config = arg.training_config();
        assert_eq!(config.total_episodes, 50);
        assert!(config.load_weights);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.seed, 7);
    }
}
