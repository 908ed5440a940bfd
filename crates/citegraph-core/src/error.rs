use std::fmt;

use crate::graph::NodeId;

/// Machine-readable error codes so callers can branch without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphErrorCode {
    InvalidConfiguration,
    EmptyInput,
    DuplicateNode,
    ParseFailure,
    ReadFailure,
}

impl GraphErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "E1001",
            Self::EmptyInput => "E2001",
            Self::DuplicateNode => "E2002",
            Self::ParseFailure => "E3001",
            Self::ReadFailure => "E5001",
        }
    }

    /// Optional remediation hint for callers that surface errors to people.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidConfiguration => {
                Some("Use a seed connection count of at least 1.")
            }
            Self::EmptyInput => Some("Provide a graph with at least one node."),
            Self::DuplicateNode => Some("Node ids passed to add_node must be fresh."),
            Self::ParseFailure => {
                Some("Each line must be a node id followed by space-separated neighbor ids.")
            }
            Self::ReadFailure => None,
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by graph statistics, growth, and loading.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Construction parameters make the operation meaningless.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A mean-based statistic was requested over zero nodes.
    #[error("{0} is undefined for an empty graph")]
    EmptyInput(&'static str),

    /// `add_node` was asked to insert an id the graph already holds.
    #[error("node {0} already exists in the graph")]
    DuplicateNode(NodeId),

    /// The adjacency text contained a token that is not a node id.
    #[error("line {line}: invalid node id {token:?}")]
    Parse { line: usize, token: String },

    /// The adjacency source could not be read.
    #[error("failed to read adjacency input: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Return the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::InvalidConfiguration(_) => GraphErrorCode::InvalidConfiguration,
            Self::EmptyInput(_) => GraphErrorCode::EmptyInput,
            Self::DuplicateNode(_) => GraphErrorCode::DuplicateNode,
            Self::Parse { .. } => GraphErrorCode::ParseFailure,
            Self::Io(_) => GraphErrorCode::ReadFailure,
        }
    }
}
