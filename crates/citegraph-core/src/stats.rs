//! Degree statistics for directed graphs.
//!
//! # Statistics Provided
//!
//! - **in-degree**: how many adjacency sets list a node. The plain
//!   [`compute_in_degrees`] only reports nodes that receive at least one
//!   edge; [`compute_in_degrees_complete`] also reports zero in-degrees.
//! - **out-degree**: size of a node's adjacency set, for every key.
//! - **average out-degree**: mean out-degree truncated toward zero. This is
//!   the seed connection count handed to a DPA trial.
//! - **in-degree distribution**: histogram `degree -> node count`, built
//!   from the omitting in-degree map, so nodes nobody points at are not
//!   counted.
//!
//! All functions read a snapshot and never mutate it. Results are recomputed
//! on every call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::graph::{DirectedGraph, NodeId};

/// Node id → degree.
pub type DegreeMap = BTreeMap<NodeId, usize>;

/// Degree value → number of nodes having it. Not normalized.
pub type DegreeDistribution = BTreeMap<usize, usize>;

/// Degree value → fraction of the counted nodes having it.
pub type NormalizedDistribution = BTreeMap<usize, f64>;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build the complete directed graph on nodes `0..num_nodes`.
///
/// Every node points to every other node; there are no self-loops. Zero
/// nodes yields an empty graph.
#[must_use]
pub fn make_complete_graph(num_nodes: usize) -> DirectedGraph {
    let mut graph = DirectedGraph::new();
    for node in 0..num_nodes {
        let neighbors: BTreeSet<NodeId> = (0..num_nodes).filter(|&other| other != node).collect();
        graph.set_neighbors(node, neighbors);
    }
    graph
}

// ---------------------------------------------------------------------------
// Degrees
// ---------------------------------------------------------------------------

/// In-degree of every node that receives at least one edge.
///
/// Nodes with in-degree zero are omitted rather than reported as 0. Use
/// [`compute_in_degrees_complete`] when every node must be present.
#[must_use]
pub fn compute_in_degrees(graph: &DirectedGraph) -> DegreeMap {
    let mut in_degrees = DegreeMap::new();
    for (_, neighbors) in graph.iter() {
        for &target in neighbors {
            *in_degrees.entry(target).or_insert(0) += 1;
        }
    }
    in_degrees
}

/// In-degree of every node key and every edge target, zeros included.
#[must_use]
pub fn compute_in_degrees_complete(graph: &DirectedGraph) -> DegreeMap {
    let mut in_degrees: DegreeMap = graph.nodes().map(|node| (node, 0)).collect();
    for (target, degree) in compute_in_degrees(graph) {
        in_degrees.insert(target, degree);
    }
    in_degrees
}

/// Out-degree of every node key, including nodes with no out-edges.
#[must_use]
pub fn compute_out_degrees(graph: &DirectedGraph) -> DegreeMap {
    graph
        .iter()
        .map(|(node, neighbors)| (node, neighbors.len()))
        .collect()
}

/// Mean out-degree, truncated toward zero.
///
/// `{0: {1, 2}, 1: {}, 2: {}}` has mean 2/3 and yields 0.
///
/// # Errors
///
/// Returns [`GraphError::EmptyInput`] for a graph with no nodes.
pub fn compute_average_out_degree(graph: &DirectedGraph) -> Result<usize, GraphError> {
    if graph.is_empty() {
        return Err(GraphError::EmptyInput("average out-degree"));
    }
    Ok(graph.edge_count() / graph.node_count())
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// Histogram of the values reported by [`compute_in_degrees`].
///
/// Nodes with in-degree zero contribute nothing, so the counts need not add
/// up to the node count.
#[must_use]
pub fn in_degree_distribution(graph: &DirectedGraph) -> DegreeDistribution {
    let mut distribution = DegreeDistribution::new();
    for degree in compute_in_degrees(graph).into_values() {
        *distribution.entry(degree).or_insert(0) += 1;
    }
    distribution
}

/// [`in_degree_distribution`] with each count divided by the histogram total.
///
/// The total is the number of nodes that received at least one edge. An
/// edgeless graph yields an empty map.
#[must_use]
pub fn normalized_in_degree_distribution(graph: &DirectedGraph) -> NormalizedDistribution {
    normalize(&in_degree_distribution(graph))
}

/// Divide every count in `distribution` by the sum of all counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalize(distribution: &DegreeDistribution) -> NormalizedDistribution {
    let total: usize = distribution.values().sum();
    if total == 0 {
        return NormalizedDistribution::new();
    }
    distribution
        .iter()
        .map(|(&degree, &count)| (degree, count as f64 / total as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// DegreeSummary
// ---------------------------------------------------------------------------

/// Summary statistics for comparing an observed graph with a grown one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeSummary {
    /// Number of node keys.
    pub node_count: usize,
    /// Number of directed edges.
    pub edge_count: usize,
    /// Highest in-degree over all nodes (0 when there are no edges).
    pub max_in_degree: usize,
    /// Highest out-degree over all nodes.
    pub max_out_degree: usize,
    /// Truncated mean out-degree; 0 for an empty graph.
    pub average_out_degree: usize,
    /// Nodes with no incoming edge.
    pub zero_in_degree_count: usize,
    /// Nodes listed in their own adjacency set.
    pub self_loop_count: usize,
}

impl DegreeSummary {
    /// Compute the summary for `graph`.
    #[must_use]
    pub fn from_graph(graph: &DirectedGraph) -> Self {
        let in_degrees = compute_in_degrees_complete(graph);
        let out_degrees = compute_out_degrees(graph);

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_in_degree: in_degrees.values().copied().max().unwrap_or(0),
            max_out_degree: out_degrees.values().copied().max().unwrap_or(0),
            average_out_degree: compute_average_out_degree(graph).unwrap_or(0),
            zero_in_degree_count: in_degrees.values().filter(|&&d| d == 0).count(),
            self_loop_count: graph.self_loop_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
