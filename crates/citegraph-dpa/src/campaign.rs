//! Campaign runner for seeded DPA trials.
//!
//! Grows one graph per seed with otherwise identical parameters and
//! aggregates their degree statistics, so the spread of a single trial can
//! be judged against many.

use std::collections::BTreeSet;
use std::ops::Range;

use anyhow::{Context, Result, bail};
use citegraph_core::stats::{DegreeDistribution, DegreeSummary, in_degree_distribution};
use citegraph_core::GrowthConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::trial::DpaTrial;

/// Campaign-level configuration: which seeds to run and the shared growth
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Range of seeds to execute, e.g., `0..20`.
    pub seed_range: Range<u64>,
    /// Nodes per grown graph (`N`).
    pub target_node_count: usize,
    /// Seed graph size and draws per added node (`m`).
    pub seed_connection_count: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..20,
            target_node_count: 1_000,
            seed_connection_count: 5,
        }
    }
}

impl CampaignConfig {
    /// Build the [`GrowthConfig`] for a specific seed.
    #[must_use]
    pub const fn growth_config_for_seed(&self, seed: u64) -> GrowthConfig {
        GrowthConfig {
            target_node_count: self.target_node_count,
            seed_connection_count: self.seed_connection_count,
            seed: Some(seed),
        }
    }

    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed range is empty or `m` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        if self.seed_connection_count == 0 {
            bail!("seed_connection_count must be > 0");
        }
        Ok(())
    }
}

/// Outcome of a single seeded trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// The seed the trial ran with.
    pub seed: u64,
    /// Degree statistics of the grown graph.
    pub summary: DegreeSummary,
    /// Unnormalized in-degree histogram of the grown graph.
    pub in_degree_distribution: DegreeDistribution,
    /// Content hash of the grown graph; equal seeds give equal hashes.
    pub fingerprint: String,
}

/// Aggregate report produced by a campaign run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReport {
    /// Total trials executed.
    pub trials_run: usize,
    /// Per-seed results, in seed order.
    pub trials: Vec<TrialSummary>,
    /// Per-degree sums of every trial's histogram.
    pub aggregate_in_degree_distribution: DegreeDistribution,
    /// Mean number of edges per grown graph.
    pub mean_edge_count: f64,
    /// Highest in-degree seen in any trial.
    pub max_in_degree: usize,
    /// Number of distinct graphs grown.
    pub distinct_graphs: usize,
}

impl CampaignReport {
    /// Summary for `seed`, if it was part of the campaign.
    #[must_use]
    pub fn trial(&self, seed: u64) -> Option<&TrialSummary> {
        self.trials.iter().find(|t| t.seed == seed)
    }
}

/// Run a full campaign across all seeds in the config.
///
/// # Errors
///
/// Returns an error if config validation fails or a trial cannot be built.
#[instrument(skip(config), fields(seeds = ?config.seed_range))]
pub fn run_campaign(config: &CampaignConfig) -> Result<CampaignReport> {
    config.validate()?;

    let mut trials = Vec::new();
    let mut aggregate = DegreeDistribution::new();
    let mut fingerprints = BTreeSet::new();
    let mut total_edges = 0_usize;
    let mut max_in_degree = 0_usize;

    for seed in config.seed_range.clone() {
        let trial = run_trial(seed, config)?;

        for (&degree, &count) in &trial.in_degree_distribution {
            *aggregate.entry(degree).or_insert(0) += count;
        }
        total_edges += trial.summary.edge_count;
        max_in_degree = max_in_degree.max(trial.summary.max_in_degree);
        fingerprints.insert(trial.fingerprint.clone());

        trials.push(trial);
    }

    let trials_run = trials.len();
    let report = CampaignReport {
        trials_run,
        mean_edge_count: mean(total_edges, trials_run),
        aggregate_in_degree_distribution: aggregate,
        max_in_degree,
        distinct_graphs: fingerprints.len(),
        trials,
    };

    info!(
        trials = report.trials_run,
        distinct = report.distinct_graphs,
        max_in_degree = report.max_in_degree,
        "campaign complete"
    );
    Ok(report)
}

/// Grow and summarize one graph for `seed`.
///
/// The trial gets its own RNG seeded from `seed` and shares no state with
/// other trials.
///
/// # Errors
///
/// Returns an error if the growth parameters are invalid.
pub fn run_trial(seed: u64, config: &CampaignConfig) -> Result<TrialSummary> {
    let growth = config.growth_config_for_seed(seed);
    let graph = DpaTrial::from_config(&growth)
        .and_then(DpaTrial::grow_graph)
        .with_context(|| format!("trial for seed {seed} failed"))?;

    let summary = DegreeSummary::from_graph(&graph);
    debug!(
        seed,
        edges = summary.edge_count,
        max_in_degree = summary.max_in_degree,
        "trial finished"
    );

    Ok(TrialSummary {
        seed,
        in_degree_distribution: in_degree_distribution(&graph),
        fingerprint: graph.content_hash(),
        summary,
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}
