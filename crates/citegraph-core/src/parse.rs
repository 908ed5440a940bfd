//! Adjacency-text loader.
//!
//! One node per line: the node id, then its out-neighbor ids, separated by
//! spaces. A line holding only an id declares a node with no out-edges.
//!
//! ```text
//! 0 1 4 5
//! 1 2 6
//! 6
//! ```
//!
//! Blank lines are skipped, `\r\n` endings and runs of whitespace are
//! tolerated, and an id repeated on one line collapses into a single edge.
//! A node that appears on several lines accumulates the neighbors of all of
//! them.

use std::io::BufRead;

use tracing::{debug, info};

use crate::error::GraphError;
use crate::graph::{DirectedGraph, NodeId};

/// Parse adjacency text held in memory.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] with the 1-based line number when a token
/// is not a non-negative integer.
pub fn parse_adjacency(text: &str) -> Result<DirectedGraph, GraphError> {
    let mut graph = DirectedGraph::new();
    let mut lines = 0_usize;
    for (index, line) in text.lines().enumerate() {
        lines += 1;
        parse_line(&mut graph, index + 1, line)?;
    }
    info!(nodes = graph.node_count(), lines, "loaded adjacency graph");
    Ok(graph)
}

/// Parse adjacency text from a buffered reader, line by line.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the reader fails and [`GraphError::Parse`]
/// for malformed lines.
pub fn read_adjacency<R: BufRead>(reader: R) -> Result<DirectedGraph, GraphError> {
    let mut graph = DirectedGraph::new();
    let mut lines = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        lines += 1;
        parse_line(&mut graph, index + 1, &line)?;
    }
    info!(nodes = graph.node_count(), lines, "loaded adjacency graph");
    Ok(graph)
}

fn parse_line(graph: &mut DirectedGraph, line_no: usize, line: &str) -> Result<(), GraphError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        debug!(line = line_no, "skipping blank line");
        return Ok(());
    };

    let node = parse_id(line_no, head)?;
    let neighbors = tokens
        .map(|token| parse_id(line_no, token))
        .collect::<Result<Vec<_>, _>>()?;
    // Targets stay dangling until their own line shows up.
    graph.extend_neighbors(node, neighbors);
    Ok(())
}

fn parse_id(line_no: usize, token: &str) -> Result<NodeId, GraphError> {
    token.parse::<NodeId>().map_err(|_| GraphError::Parse {
        line: line_no,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::io::Cursor;

    #[test]
    fn parses_neighbors_and_empty_nodes() {
        let g = parse_adjacency("0 1 2\n1 2\n2\n").expect("valid input");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.neighbors(0), Some(&BTreeSet::from([1, 2])));
        assert_eq!(g.neighbors(2), Some(&BTreeSet::new()));
    }

    #[test]
    fn tolerates_crlf_and_trailing_spaces() {
        let g = parse_adjacency("0 1 \r\n1 \r\n").expect("valid input");
        assert_eq!(g.neighbors(0), Some(&BTreeSet::from([1])));
        assert_eq!(g.neighbors(1), Some(&BTreeSet::new()));
    }

    #[test]
    fn skips_blank_lines() {
        let g = parse_adjacency("\n0 1\n\n   \n1\n").expect("valid input");
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn repeated_ids_collapse() {
        let g = parse_adjacency("0 1 1 1\n1\n").expect("valid input");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn repeated_lines_accumulate() {
        let g = parse_adjacency("0 1\n0 2\n").expect("valid input");
        assert_eq!(g.neighbors(0), Some(&BTreeSet::from([1, 2])));
    }

    #[test]
    fn dangling_targets_are_not_keys() {
        let g = parse_adjacency("0 5\n").expect("valid input");
        assert!(!g.contains_node(5));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn reports_line_of_bad_token() {
        let err = parse_adjacency("0 1\n1 x\n").expect_err("x is not an id");
        match err {
            GraphError::Parse { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_negative_ids() {
        assert!(matches!(
            parse_adjacency("-1 0\n"),
            Err(GraphError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn reader_matches_str_parser() {
        let text = "0 1 4 5\n1 2 6\n2 3\n3 0\n4 1\n5 2\n6\n";
        let from_str = parse_adjacency(text).expect("valid input");
        let from_reader = read_adjacency(Cursor::new(text)).expect("valid input");
        assert_eq!(from_str, from_reader);
    }
}
