use std::fs;

use skirmish_engine::ScenarioConfig;
use skirmish_training::{
    config::TrainingConfig,
    controller::{ControllerState, EpisodeController},
    phase::Phase,
    trainer::Trainer,
    weight_store::WeightStore,
};

fn scenario() -> ScenarioConfig {
    ScenarioConfig {
        width: 8,
        height: 6,
        friendly_count: 3,
        enemy_count: 3,
        hp: 12,
        turn_limit: 200,
        ..ScenarioConfig::default()
    }
}

fn config(dir: &tempfile::TempDir) -> TrainingConfig {
    TrainingConfig {
        total_episodes: 4,
        evaluation_episodes: 1,
        learning_episodes: 2,
        weights_path: dir.path().join("agent_weights").join("weights.txt"),
        ..TrainingConfig::default()
    }
}

#[test]
fn full_run_alternates_phases_and_persists_weights() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let mut controller = EpisodeController::new(&config).unwrap();
    let initial = controller.weights().to_vec();

    let mut phases = vec![];
    let summary = Trainer::new(scenario(), config.seed)
        .run_with(&mut controller, |report, _| phases.push(report.phase))
        .unwrap();

    assert_eq!(summary.episodes, 5);
    assert_eq!(
        phases,
        [
            Phase::Evaluating,
            Phase::Learning,
            Phase::Learning,
            Phase::Evaluating,
            Phase::Learning,
        ]
    );
    assert_eq!(controller.state(), ControllerState::Done);
    assert_eq!(summary.tally.episodes(), 5);

    let games: Vec<_> = summary.curve.blocks().iter().map(|b| b.games_played).collect();
    assert_eq!(games, [0, 2]);

    // learning episodes with combat must have moved the weights
    assert_ne!(summary.weights, initial);

    let text = fs::read_to_string(&config.weights_path).unwrap();
    assert_eq!(text.lines().count(), 7);
    let saved = WeightStore::new(&config.weights_path).load(7).unwrap();
    for (saved, trained) in saved.iter().zip(&summary.weights) {
        assert!((saved - trained).abs() <= 5e-7);
    }
}

#[test]
fn same_seed_reproduces_the_run() {
    let run = || {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let mut controller = EpisodeController::new(&config).unwrap();
        Trainer::new(scenario(), config.seed)
            .run(&mut controller)
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn resumed_run_starts_from_saved_weights() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let mut controller = EpisodeController::new(&config).unwrap();
    let _ = Trainer::new(scenario(), config.seed)
        .run(&mut controller)
        .unwrap();

    let resumed = EpisodeController::new(&TrainingConfig {
        load_weights: true,
        ..config.clone()
    })
    .unwrap();
    let saved = WeightStore::new(&config.weights_path).load(7).unwrap();
    assert_eq!(resumed.weights(), saved);
    assert_eq!(resumed.state(), ControllerState::Evaluating);
}
