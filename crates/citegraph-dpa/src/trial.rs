//! The DPA (Direct Preferential Attachment) trial.
//!
//! # Algorithm
//!
//! Growth starts from the complete graph on `m` seed nodes. Every further
//! node draws `m` ids uniformly, with replacement, from an attachment pool
//! and points at the distinct ids it drew. Afterwards the pool is extended
//! with the new id once and with each distinct neighbor once.
//!
//! The pool is a bag of ids in which a node appears roughly once per unit
//! of (in-degree + 1), so a uniform draw from it is a draw proportional to
//! in-degree + 1. No degree table is ever consulted.
//!
//! ```text
//! m = 2, pool = [0, 0, 1, 1]
//! add_node(2): draws 1, 1  -> neighbors {1}, pool = [0, 0, 1, 1, 2, 1]
//! add_node(3): draws 1, 2  -> neighbors {1, 2}, pool = [.., 3, 1, 2]
//! ```
//!
//! ## Invariants
//!
//! - The pool starts with each seed id repeated `m` times, in ascending
//!   order of id.
//! - Duplicate draws collapse, so an added node has between 1 and `m`
//!   out-neighbors.
//! - A node cannot draw itself: its id enters the pool only after its own
//!   draws. Grown graphs are therefore free of self-loops.
//! - Neighbors are appended to the pool in ascending order, which keeps a
//!   seeded run reproducible.
//!
//! ## Lifecycle
//!
//! `Constructed` (seed graph built) → `Growing` (one or more `add_node`
//! calls) → complete once [`DpaTrial::grow_graph`] returns. `grow_graph`
//! consumes the trial, so a finished trial cannot be grown again.

use std::collections::BTreeSet;

use citegraph_core::{DirectedGraph, GraphError, GrowthConfig, NodeId, make_complete_graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace, warn};

/// Where a trial is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialPhase {
    /// Seed graph and pool built, nothing added yet.
    Constructed,
    /// At least one node has been added.
    Growing,
}

/// Incremental preferential-attachment graph generator.
///
/// Each trial owns its graph, its attachment pool, and its random source.
/// Independent trials share nothing and may run on separate threads.
#[derive(Debug, Clone)]
pub struct DpaTrial<R = StdRng> {
    target_node_count: usize,
    seed_connection_count: usize,
    graph: DirectedGraph,
    pool: Vec<NodeId>,
    rng: R,
    phase: TrialPhase,
}

impl DpaTrial<StdRng> {
    /// Create a trial seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfiguration`] if
    /// `seed_connection_count` is zero.
    pub fn new(target_node_count: usize, seed_connection_count: usize) -> Result<Self, GraphError> {
        Self::with_rng(
            target_node_count,
            seed_connection_count,
            StdRng::from_entropy(),
        )
    }

    /// Create a reproducible trial: equal seeds grow equal graphs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfiguration`] if
    /// `seed_connection_count` is zero.
    pub fn with_seed(
        target_node_count: usize,
        seed_connection_count: usize,
        seed: u64,
    ) -> Result<Self, GraphError> {
        Self::with_rng(
            target_node_count,
            seed_connection_count,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Create a trial from a [`GrowthConfig`], seeded when the config has one.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfiguration`] if the config fails
    /// validation.
    pub fn from_config(config: &GrowthConfig) -> Result<Self, GraphError> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::with_seed(
                config.target_node_count,
                config.seed_connection_count,
                seed,
            ),
            None => Self::new(config.target_node_count, config.seed_connection_count),
        }
    }
}

impl<R: Rng> DpaTrial<R> {
    /// Create a trial drawing from `rng`.
    ///
    /// `seed_connection_count > target_node_count` is a caller error that is
    /// not rejected: growth adds nothing and the `m`-node seed graph comes
    /// back from [`grow_graph`](Self::grow_graph).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfiguration`] if
    /// `seed_connection_count` is zero, since the pool would be empty.
    pub fn with_rng(
        target_node_count: usize,
        seed_connection_count: usize,
        rng: R,
    ) -> Result<Self, GraphError> {
        if seed_connection_count == 0 {
            return Err(GraphError::InvalidConfiguration(
                "seed_connection_count must be > 0; the attachment pool would be empty"
                    .to_string(),
            ));
        }
        if seed_connection_count > target_node_count {
            warn!(
                seed_connection_count,
                target_node_count, "seed graph is larger than the target; nothing will be grown"
            );
        }

        let graph = make_complete_graph(seed_connection_count);
        let pool: Vec<NodeId> = (0..seed_connection_count)
            .flat_map(|node| std::iter::repeat_n(node, seed_connection_count))
            .collect();

        info!(
            seed_nodes = seed_connection_count,
            pool_len = pool.len(),
            "built initial complete graph"
        );

        Ok(Self {
            target_node_count,
            seed_connection_count,
            graph,
            pool,
            rng,
            phase: TrialPhase::Constructed,
        })
    }

    /// Add `node`, attaching it to up to `m` pool draws.
    ///
    /// Returns the neighbor set that was stored for `node`. It holds fewer
    /// than `m` ids whenever draws repeat.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if `node` is already in the
    /// graph; the seed graph and earlier additions are never overwritten.
    pub fn add_node(&mut self, node: NodeId) -> Result<BTreeSet<NodeId>, GraphError> {
        if self.graph.contains_node(node) {
            return Err(GraphError::DuplicateNode(node));
        }

        let mut neighbors = BTreeSet::new();
        for _ in 0..self.seed_connection_count {
            let pick = self.rng.gen_range(0..self.pool.len());
            neighbors.insert(self.pool[pick]);
        }

        self.pool.push(node);
        self.pool.extend(neighbors.iter().copied());
        trace!(node, out_degree = neighbors.len(), pool_len = self.pool.len(), "added node");

        self.graph.set_neighbors(node, neighbors.clone());
        self.phase = TrialPhase::Growing;
        Ok(neighbors)
    }

    /// Add nodes `m..N` in increasing order and return the grown graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if one of those ids was already
    /// added by hand through [`add_node`](Self::add_node).
    #[instrument(skip(self), fields(n = self.target_node_count, m = self.seed_connection_count))]
    pub fn grow_graph(mut self) -> Result<DirectedGraph, GraphError> {
        let start = self.seed_connection_count;
        let end = self.target_node_count;

        for node in start..end {
            self.add_node(node)?;
            if node > start && node % 10_000 == 0 {
                debug!(node, pool_len = self.pool.len(), "growth progress");
            }
        }

        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "DPA growth complete"
        );
        Ok(self.graph)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> TrialPhase {
        self.phase
    }

    /// The graph built so far.
    #[must_use]
    pub const fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// The attachment pool, in insertion order.
    #[must_use]
    pub fn pool(&self) -> &[NodeId] {
        &self.pool
    }

    #[must_use]
    pub const fn target_node_count(&self) -> usize {
        self.target_node_count
    }

    #[must_use]
    pub const fn seed_connection_count(&self) -> usize {
        self.seed_connection_count
    }
}
