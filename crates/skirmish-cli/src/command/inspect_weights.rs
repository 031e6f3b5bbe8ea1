use std::{iter, path::PathBuf};

use anyhow::Context as _;
use skirmish_evaluator::unit_feature::{FeatureRegistry, UnitFeature as _};
use skirmish_training::{config::DEFAULT_WEIGHTS_PATH, weight_store::WeightStore};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectWeightsArg {
    /// Weight file path
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    weights: PathBuf,
}

pub(crate) fn run(arg: &InspectWeightsArg) -> anyhow::Result<()> {
    let registry = FeatureRegistry::canonical();
    let weights = WeightStore::new(&arg.weights)
        .load(registry.len())
        .with_context(|| format!("Failed to load weights from {}", arg.weights.display()))?;

    println!("{:>2}  {:<20} {:<28} {:>12}", "#", "ID", "Name", "Weight");
    for (i, (feature, weight)) in iter::zip(registry.features(), &weights).enumerate() {
        println!(
            "{i:>2}  {:<20} {:<28} {weight:>12.6}",
            feature.id(),
            feature.name()
        );
    }
    Ok(())
}
