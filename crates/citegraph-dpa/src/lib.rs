#![forbid(unsafe_code)]
//! citegraph-dpa library.
//!
//! Synthetic directed graphs grown by direct preferential attachment, plus
//! the tooling to compare them against an observed graph.
//!
//! ```text
//! observed graph
//!        ↓  stats::compute_average_out_degree()
//! m (truncated mean out-degree), N (node count)
//!        ↓  DpaTrial::with_seed(N, m, seed).grow_graph()
//! synthetic graph
//!        ↓  stats::in_degree_distribution()
//! distributions to compare
//! ```
//!
//! [`compare::grow_like`] runs that pipeline in one call;
//! [`campaign::run_campaign`] repeats the growth step over a range of seeds.
//!
//! # Conventions
//!
//! - **Errors**: trials and comparison return `citegraph_core::GraphError`;
//!   campaigns use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod campaign;
pub mod compare;
pub mod trial;

pub use campaign::{CampaignConfig, CampaignReport, TrialSummary, run_campaign, run_trial};
pub use compare::{Comparison, grow_like, grow_like_with_rng};
pub use trial::{DpaTrial, TrialPhase};
