use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skirmish_engine::ScenarioConfig;
use skirmish_evaluator::unit_feature::{FeatureRegistry, UnitFeature as _};
use skirmish_stats::descriptive::DescriptiveStats;
use skirmish_training::{
    config::TrainingConfig,
    curve::{BlockSummary, WinLossTally},
    trainer::TrainingSummary,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub config: TrainingConfig,
    pub scenario: ScenarioConfig,
    pub episodes: usize,
    pub tally: WinLossTally,
    pub learning_curve: Vec<BlockSummary>,
    pub evaluation_stats: Option<RewardStats>,
    pub features: Vec<TrainedFeature>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewardStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl From<DescriptiveStats> for RewardStats {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            mean: stats.mean,
            median: stats.median,
            min: stats.min,
            max: stats.max,
            std_dev: stats.std_dev,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedFeature {
    pub id: String,
    pub name: String,
    pub weight: f64,
}

impl TrainingReport {
    pub(crate) fn new(
        config: &TrainingConfig,
        scenario: &ScenarioConfig,
        summary: &TrainingSummary,
        registry: &FeatureRegistry,
    ) -> Self {
        let features = registry
            .features()
            .iter()
            .zip(&summary.weights)
            .map(|(feature, weight)| TrainedFeature {
                id: feature.id().to_owned(),
                name: feature.name().to_owned(),
                weight: *weight,
            })
            .collect();
        Self {
            trained_at: Utc::now(),
            config: config.clone(),
            scenario: scenario.clone(),
            episodes: summary.episodes,
            tally: summary.tally,
            learning_curve: summary.curve.blocks().to_vec(),
            evaluation_stats: summary.curve.reward_stats().map(RewardStats::from),
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use skirmish_training::curve::LearningCurve;

    use super::*;

    #[test]
    fn test_report_lists_every_feature() {
        let registry = FeatureRegistry::canonical();
        let mut curve = LearningCurve::new();
        curve.push(BlockSummary {
            games_played: 0,
            average_reward: -4.0,
        });
        let summary = TrainingSummary {
            episodes: 1,
            curve,
            tally: WinLossTally { wins: 1, losses: 0 },
            weights: vec![0.5; registry.len()],
        };
        let report = TrainingReport::new(
            &TrainingConfig::default(),
            &ScenarioConfig::default(),
            &summary,
            &registry,
        );
        assert_eq!(report.features.len(), 7);
        assert_eq!(report.features[0].id, "bias");
        assert_eq!(report.evaluation_stats.as_ref().unwrap().mean, -4.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tally"]["wins"], 1);
        assert_eq!(json["learning_curve"][0]["games_played"], 0);
    }
}
