//! Per-episode learning controller.
//!
//! [`EpisodeController`] owns everything that outlives a single turn: the weight vector, the
//! random stream, the phase cycle, the weight store and the progress records. Each episode it
//! also holds a [`Roster`] and the decision each friendly unit acted on.
//!
//! # Turn Flow
//!
//! ```text
//! snapshot + history
//!     → score the elapsed turn (reward per friendly unit, remove the dead)
//!     → TD update per unit with a completed command (learning episodes only)
//!     → choose a target per friendly unit
//!     → orders
//! ```
//!
//! Scoring, updating and re-targeting only happen after a turn that saw damage or a death,
//! unless [`TrainingConfig::replan_every_turn`] is set. Quiet turns only charge the turn cost
//! and answer with an empty order map, so units keep their standing orders. The first turn of
//! an episode always issues orders.
//!
//! A weight update measures the unit's features on the snapshot its orders were issued on,
//! against the enemy the unit actually attacked.
//!
//! # Episode Lifecycle
//!
//! 1. [`EpisodeController::begin_episode`] rebuilds the roster from the opening snapshot.
//! 2. [`EpisodeController::step`] is called once per turn until the environment ends the
//!    episode or it answers [`TurnResponse::EpisodeOver`].
//! 3. [`EpisodeController::end_episode`] scores the terminal turn, advances the phase cycle,
//!    saves the weights and reports whether training is done.

use std::collections::BTreeMap;

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use skirmish_engine::{AttackCommand, History, Orders, Side, Snapshot, TurnRecord, UnitId};
use skirmish_evaluator::{
    matchup::FeatureContext,
    q_estimator::LinearQEstimator,
    reward::{RewardCalculator, TURN_COST},
    roster::Roster,
    target_selector::{self, EpsilonGreedy},
    unit_feature::{FeatureRegistry, FeatureVector},
};

use crate::{
    config::{ConfigError, TrainingConfig},
    curve::{BlockSummary, LearningCurve, WinLossTally},
    phase::{Phase, PhaseCycle},
    td::TdUpdater,
    weight_store::WeightStore,
    weights,
};

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// An episode has begun but no turn has been played; there is nothing to score yet.
    Warmup,
    Learning,
    Evaluating,
    /// The episode budget is spent. No further episodes may begin.
    Done,
}

/// The controller's answer to one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResponse {
    /// Orders for this turn; may be empty.
    Orders(Orders),
    /// No enemy is left to target.
    EpisodeOver,
}

/// Whether training should continue after an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    Continue,
    Done,
}

/// Outcome of one finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Zero-based episode index.
    pub episode: usize,
    pub phase: Phase,
    pub turns: u32,
    pub cumulative_reward: f64,
    /// Friendly units were still alive at the end.
    pub won: bool,
    /// Set when this episode completed an evaluation block.
    pub block: Option<BlockSummary>,
    pub end: EpisodeEnd,
}

#[derive(Debug, Clone)]
struct Decision {
    target: UnitId,
    features: FeatureVector,
}

/// The state the cached decisions were made on.
#[derive(Debug, Clone)]
struct DecisionState {
    snapshot: Snapshot,
    enemies: Vec<UnitId>,
}

#[derive(Debug, Clone)]
struct Episode {
    roster: Roster,
    decisions: BTreeMap<UnitId, Decision>,
    decided_on: Option<DecisionState>,
    cumulative_reward: f64,
    turns_played: usize,
    scored_turn: Option<u32>,
}

/// Drives learning and evaluation episodes over a shared weight vector.
#[derive(Debug)]
pub struct EpisodeController {
    registry: FeatureRegistry,
    weights: Vec<f64>,
    rng: Pcg32,
    policy: EpsilonGreedy,
    updater: TdUpdater,
    cycle: PhaseCycle,
    store: WeightStore,
    curve: LearningCurve,
    tally: WinLossTally,
    total_episodes: usize,
    completed_episodes: usize,
    template: String,
    replan_every_turn: bool,
    episode: Option<Episode>,
    done: bool,
}

impl EpisodeController {
    /// Creates a controller with persisted or random weights.
    ///
    /// When `config.load_weights` is set but the weight file cannot be read, the failure is
    /// logged and random weights are used instead.
    pub fn new(config: &TrainingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = FeatureRegistry::canonical();
        let store = WeightStore::new(&config.weights_path);
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let loaded = if config.load_weights {
            match store.load(registry.len()) {
                Ok(weights) => {
                    tracing::info!(path = %store.path().display(), "loaded weights");
                    Some(weights)
                }
                Err(err) => {
                    tracing::warn!(
                        path = %store.path().display(),
                        %err,
                        "failed to load weights, starting from random weights"
                    );
                    None
                }
            }
        } else {
            None
        };
        let weights = loaded.unwrap_or_else(|| weights::random(&mut rng, registry.len()));

        Ok(Self::from_parts(config, registry, weights, rng))
    }

    /// Creates a controller with the given initial weights.
    ///
    /// # Panics
    ///
    /// Panics if `weights` does not match the canonical feature registry.
    pub fn with_weights(config: &TrainingConfig, weights: Vec<f64>) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = Pcg32::seed_from_u64(config.seed);
        Ok(Self::from_parts(
            config,
            FeatureRegistry::canonical(),
            weights,
            rng,
        ))
    }

    fn from_parts(
        config: &TrainingConfig,
        registry: FeatureRegistry,
        weights: Vec<f64>,
        rng: Pcg32,
    ) -> Self {
        assert_eq!(
            registry.len(),
            weights.len(),
            "weight vector does not match the feature registry"
        );
        Self {
            registry,
            weights,
            rng,
            policy: EpsilonGreedy::new(config.epsilon),
            updater: TdUpdater::new(config.gamma, config.learning_rate),
            cycle: PhaseCycle::new(config.evaluation_episodes, config.learning_episodes),
            store: WeightStore::new(&config.weights_path),
            curve: LearningCurve::new(),
            tally: WinLossTally::default(),
            total_episodes: config.total_episodes,
            completed_episodes: 0,
            template: config.template.clone(),
            replan_every_turn: config.replan_every_turn,
            episode: None,
            done: false,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        if self.done {
            return ControllerState::Done;
        }
        if self.episode.as_ref().is_some_and(|e| e.turns_played == 0) {
            return ControllerState::Warmup;
        }
        match self.cycle.phase() {
            Phase::Learning => ControllerState::Learning,
            Phase::Evaluating => ControllerState::Evaluating,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[must_use]
    pub fn completed_episodes(&self) -> usize {
        self.completed_episodes
    }

    #[must_use]
    pub fn curve(&self) -> &LearningCurve {
        &self.curve
    }

    #[must_use]
    pub fn tally(&self) -> WinLossTally {
        self.tally
    }

    #[must_use]
    pub fn store(&self) -> &WeightStore {
        &self.store
    }

    /// Cumulative reward of the running episode.
    #[must_use]
    pub fn episode_reward(&self) -> Option<f64> {
        self.episode.as_ref().map(|e| e.cumulative_reward)
    }

    /// Live roster of the running episode.
    #[must_use]
    pub fn roster(&self) -> Option<&Roster> {
        self.episode.as_ref().map(|e| &e.roster)
    }

    /// Starts an episode from its opening snapshot.
    ///
    /// # Panics
    ///
    /// Panics if training is already done.
    pub fn begin_episode(&mut self, snapshot: &Snapshot) {
        assert!(!self.done, "cannot begin an episode after training is done");
        let roster = Roster::from_snapshot(snapshot, &self.template);
        tracing::debug!(
            episode = self.completed_episodes,
            phase = ?self.cycle.phase(),
            friendly = roster.friendly().len(),
            enemy = roster.enemy().len(),
            "episode started"
        );
        self.episode = Some(Episode {
            roster,
            decisions: BTreeMap::new(),
            decided_on: None,
            cumulative_reward: 0.0,
            turns_played: 0,
            scored_turn: None,
        });
    }

    /// Plays one turn.
    ///
    /// # Panics
    ///
    /// Panics if no episode is running.
    pub fn step(&mut self, snapshot: &Snapshot, history: &History) -> TurnResponse {
        let mut episode = self
            .episode
            .take()
            .expect("step called outside an episode");
        let response = self.play_turn(&mut episode, snapshot, history);
        self.episode = Some(episode);
        response
    }

    /// Finishes the running episode.
    ///
    /// # Panics
    ///
    /// Panics if no episode is running.
    pub fn end_episode(&mut self, snapshot: &Snapshot, history: &History) -> EpisodeReport {
        let mut episode = self
            .episode
            .take()
            .expect("end_episode called outside an episode");
        self.score_turn(&mut episode, snapshot, history);

        let won = !episode.roster.friendly().is_empty();
        self.tally.record(won);

        let phase = self.cycle.phase();
        let block = self.cycle.complete_episode(episode.cumulative_reward);
        if let Some(block) = block {
            tracing::info!(
                games_played = block.games_played,
                average_reward = block.average_reward,
                "evaluation block complete"
            );
            self.curve.push(block);
        }

        let index = self.completed_episodes;
        self.completed_episodes += 1;
        if let Err(err) = self.store.save(&self.weights) {
            tracing::warn!(path = %self.store.path().display(), %err, "failed to save weights");
        }

        let end = if self.completed_episodes > self.total_episodes {
            self.done = true;
            EpisodeEnd::Done
        } else {
            EpisodeEnd::Continue
        };

        tracing::info!(
            episode = index,
            ?phase,
            turns = snapshot.turn(),
            reward = episode.cumulative_reward,
            won,
            "episode finished"
        );

        EpisodeReport {
            episode: index,
            phase,
            turns: snapshot.turn(),
            cumulative_reward: episode.cumulative_reward,
            won,
            block,
            end,
        }
    }

    fn play_turn(
        &mut self,
        episode: &mut Episode,
        snapshot: &Snapshot,
        history: &History,
    ) -> TurnResponse {
        let first = episode.turns_played == 0;
        episode.turns_played += 1;

        if !first {
            let eventful =
                previous_record(snapshot, history).is_some_and(TurnRecord::has_combat_events);
            if !eventful && !self.replan_every_turn {
                charge_quiet_turn(episode, snapshot);
                return if episode.roster.enemy().is_empty() {
                    TurnResponse::EpisodeOver
                } else {
                    TurnResponse::Orders(Orders::new())
                };
            }
            self.score_turn(episode, snapshot, history);
        }

        if episode.roster.enemy().is_empty() {
            return TurnResponse::EpisodeOver;
        }
        TurnResponse::Orders(self.issue_orders(episode, snapshot, history))
    }

    /// Scores the turn before `snapshot` once, removing the units that died on it.
    fn score_turn(&mut self, episode: &mut Episode, snapshot: &Snapshot, history: &History) {
        let Some(turn) = snapshot.previous_turn() else {
            return;
        };
        if episode.scored_turn.is_some_and(|scored| scored >= turn) {
            return;
        }
        episode.scored_turn = Some(turn);

        let record = history.turn(turn);
        let friendly_order = episode.roster.friendly().to_vec();
        let calculator = RewardCalculator::new(record, &friendly_order);
        let dead_friendly: Vec<UnitId> = record
            .map(|r| episode.roster.remove_dead(&r.deaths))
            .unwrap_or_default()
            .into_iter()
            .filter(|d| d.side.is_friendly())
            .map(|d| d.unit)
            .collect();

        let learning = self.cycle.phase().is_learning();
        for unit in friendly_order {
            let reward = calculator.reward(unit);
            episode.cumulative_reward += reward;
            if dead_friendly.contains(&unit) {
                episode.decisions.remove(&unit);
                continue;
            }
            if learning {
                self.update_unit(episode, snapshot, history, record, unit, reward);
            }
        }
    }

    fn update_unit(
        &mut self,
        episode: &Episode,
        snapshot: &Snapshot,
        history: &History,
        record: Option<&TurnRecord>,
        unit: UnitId,
        reward: f64,
    ) {
        let Some(result) = record.and_then(|r| r.command_of(Side::Friendly, unit)) else {
            return;
        };
        if !result.feedback.is_completed() {
            return;
        }
        let Some(decision) = episode.decisions.get(&unit) else {
            return;
        };

        let actual = result.command.target;
        let recomputed = match &episode.decided_on {
            Some(state) if decision.target != actual => {
                let prior_ctx = FeatureContext::new(&state.snapshot, history, &state.enemies);
                Some(self.registry.extract(&prior_ctx, unit, actual))
            }
            _ => None,
        };
        let prior_features = recomputed.as_deref().unwrap_or(&decision.features);

        let ctx = FeatureContext::new(snapshot, history, episode.roster.enemy());
        let best_estimate = {
            let estimator = LinearQEstimator::new(&self.registry, &self.weights);
            target_selector::select_best_target(&estimator, &ctx, unit)
                .map_or(0.0, |best| best.evaluation.value)
        };
        let error = self
            .updater
            .update(&mut self.weights, reward, best_estimate, prior_features);
        tracing::trace!(%unit, %actual, reward, error, "weights updated");
    }

    fn issue_orders(
        &mut self,
        episode: &mut Episode,
        snapshot: &Snapshot,
        history: &History,
    ) -> Orders {
        let ctx = FeatureContext::new(snapshot, history, episode.roster.enemy());
        let estimator = LinearQEstimator::new(&self.registry, &self.weights);
        let greedy_only = self.cycle.phase().is_evaluating();

        let mut orders = Orders::new();
        for &unit in episode.roster.friendly() {
            let selection = if snapshot.unit(unit).is_some() {
                self.policy
                    .select(&estimator, &ctx, unit, greedy_only, &mut self.rng)
            } else {
                None
            };
            let Some(selection) = selection else {
                episode.decisions.remove(&unit);
                continue;
            };
            orders.insert(unit, AttackCommand::new(unit, selection.target));
            episode.decisions.insert(
                unit,
                Decision {
                    target: selection.target,
                    features: selection.evaluation.features,
                },
            );
        }
        episode.decided_on = Some(DecisionState {
            snapshot: snapshot.clone(),
            enemies: episode.roster.enemy().to_vec(),
        });
        orders
    }
}

/// Charges the turn cost of a turn without combat to every live friendly unit.
#[expect(clippy::cast_precision_loss)]
fn charge_quiet_turn(episode: &mut Episode, snapshot: &Snapshot) {
    let Some(turn) = snapshot.previous_turn() else {
        return;
    };
    if episode.scored_turn.is_some_and(|scored| scored >= turn) {
        return;
    }
    episode.scored_turn = Some(turn);
    episode.cumulative_reward += TURN_COST * episode.roster.friendly().len() as f64;
}

fn previous_record<'a>(snapshot: &Snapshot, history: &'a History) -> Option<&'a TurnRecord> {
    history.turn(snapshot.previous_turn()?)
}
