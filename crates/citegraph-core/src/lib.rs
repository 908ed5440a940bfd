#![forbid(unsafe_code)]
//! citegraph-core library.
//!
//! Directed graphs as `node -> set of out-neighbors`, degree statistics over
//! them, and a loader for the line-oriented adjacency text format.
//!
//! # Conventions
//!
//! - **Errors**: graph operations return [`GraphError`]; config loading uses
//!   `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!   No subscriber is installed here.
//!
//! ```rust,ignore
//! use citegraph_core::{parse::parse_adjacency, stats};
//!
//! let graph = parse_adjacency("0 1 2\n1 2\n2\n")?;
//! let histogram = stats::in_degree_distribution(&graph);
//! let m = stats::compute_average_out_degree(&graph)?;
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod parse;
pub mod stats;

pub use config::GrowthConfig;
pub use error::{GraphError, GraphErrorCode};
pub use graph::{DirectedGraph, IndexedDiGraph, NodeId};
pub use stats::{
    DegreeDistribution, DegreeMap, DegreeSummary, NormalizedDistribution,
    compute_average_out_degree, compute_in_degrees, compute_in_degrees_complete,
    compute_out_degrees, in_degree_distribution, make_complete_graph,
    normalized_in_degree_distribution,
};
