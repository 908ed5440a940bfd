//! Grow a synthetic graph shaped like an observed one and compare them.
//!
//! The observed graph fixes both growth parameters: `N` is its node count
//! and `m` its truncated average out-degree. The synthetic graph is grown
//! with those and both in-degree distributions are returned normalized, so
//! they can be plotted on the same axes.

use citegraph_core::stats::{
    DegreeSummary, NormalizedDistribution, compute_average_out_degree,
    normalized_in_degree_distribution,
};
use citegraph_core::{DirectedGraph, GraphError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::trial::DpaTrial;

/// Observed vs grown degree statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// `m` used for growth: the observed truncated average out-degree.
    pub seed_connection_count: usize,
    pub observed: DegreeSummary,
    pub synthetic: DegreeSummary,
    pub observed_distribution: NormalizedDistribution,
    pub synthetic_distribution: NormalizedDistribution,
    /// The grown graph itself.
    pub synthetic_graph: DirectedGraph,
}

impl Comparison {
    /// Largest absolute difference between the two normalized distributions
    /// at any degree (a degree missing on one side counts as 0 there).
    #[must_use]
    pub fn max_distribution_gap(&self) -> f64 {
        let degrees = self
            .observed_distribution
            .keys()
            .chain(self.synthetic_distribution.keys());

        degrees
            .map(|degree| {
                let observed = self.observed_distribution.get(degree).copied().unwrap_or(0.0);
                let synthetic = self.synthetic_distribution.get(degree).copied().unwrap_or(0.0);
                (observed - synthetic).abs()
            })
            .fold(0.0, f64::max)
    }
}

/// Grow a reproducible synthetic counterpart of `observed`.
///
/// # Errors
///
/// Returns [`GraphError::EmptyInput`] for an empty observed graph and
/// [`GraphError::InvalidConfiguration`] when its average out-degree
/// truncates to zero.
pub fn grow_like(observed: &DirectedGraph, seed: u64) -> Result<Comparison, GraphError> {
    grow_like_with_rng(observed, StdRng::seed_from_u64(seed))
}

/// [`grow_like`] drawing from a caller-supplied random source.
///
/// # Errors
///
/// Same as [`grow_like`].
#[instrument(skip_all, fields(observed_nodes = observed.node_count()))]
pub fn grow_like_with_rng<R: Rng>(
    observed: &DirectedGraph,
    rng: R,
) -> Result<Comparison, GraphError> {
    let seed_connection_count = compute_average_out_degree(observed)?;
    info!(
        average_out_degree = seed_connection_count,
        "derived growth parameters from observed graph"
    );

    let synthetic_graph =
        DpaTrial::with_rng(observed.node_count(), seed_connection_count, rng)?.grow_graph()?;

    Ok(Comparison {
        seed_connection_count,
        observed: DegreeSummary::from_graph(observed),
        synthetic: DegreeSummary::from_graph(&synthetic_graph),
        observed_distribution: normalized_in_degree_distribution(observed),
        synthetic_distribution: normalized_in_degree_distribution(&synthetic_graph),
        synthetic_graph,
    })
}
