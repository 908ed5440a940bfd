//! Adjacency-set representation of a directed graph.
//!
//! A [`DirectedGraph`] maps every node id to the set of its out-neighbors.
//! A node with no outgoing edges maps to an empty set; it is never absent
//! once created. Both the outer map and the neighbor sets are ordered, so
//! iteration, serialization, and anything derived from iteration order
//! (such as the DPA attachment pool) are deterministic.
//!
//! Edge targets are not required to be keys. Loaders may reference nodes
//! whose own line never appears; every statistic in [`crate::stats`] copes
//! with that.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// Non-negative node identifier.
pub type NodeId = usize;

/// Directed graph stored as `node -> set of out-neighbors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectedGraph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

/// A [`DirectedGraph`] exported to petgraph, with the id → index mapping.
#[derive(Debug, Clone)]
pub struct IndexedDiGraph {
    /// Node weights are the original [`NodeId`]s; edges carry no weight.
    pub graph: DiGraph<NodeId, ()>,
    /// Map from node id to its petgraph index.
    pub node_map: BTreeMap<NodeId, NodeIndex>,
}

impl DirectedGraph {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Build a graph from `(node, neighbors)` entries.
    ///
    /// Every listed node is first inserted with an empty neighbor set, then
    /// edges are populated. Repeated entries for the same node merge their
    /// neighbors. Neighbor ids that never appear as an entry are not turned
    /// into keys.
    pub fn from_adjacency<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, N)>,
        N: IntoIterator<Item = NodeId>,
    {
        let entries: Vec<(NodeId, N)> = entries.into_iter().collect();

        let mut graph = Self::new();
        for (node, _) in &entries {
            graph.insert_node(*node);
        }
        for (node, neighbors) in entries {
            graph.extend_neighbors(node, neighbors);
        }
        graph
    }

    /// Insert `node` with no out-edges. Existing nodes are left untouched.
    ///
    /// Returns `true` if the node was newly inserted.
    pub fn insert_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Insert the edge `from -> to`, creating both endpoints if needed.
    ///
    /// Returns `true` if the edge was not already present.
    pub fn insert_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        self.insert_node(to);
        self.adjacency.entry(from).or_default().insert(to)
    }

    /// Replace the out-neighbor set of `node`, inserting the node if absent.
    ///
    /// Returns the previous neighbor set, if the node existed.
    pub fn set_neighbors(
        &mut self,
        node: NodeId,
        neighbors: BTreeSet<NodeId>,
    ) -> Option<BTreeSet<NodeId>> {
        self.adjacency.insert(node, neighbors)
    }

    /// Add `neighbors` to the out-neighbor set of `node`, inserting the node
    /// if absent. Targets are not inserted as keys.
    pub fn extend_neighbors<N>(&mut self, node: NodeId, neighbors: N)
    where
        N: IntoIterator<Item = NodeId>,
    {
        self.adjacency.entry(node).or_default().extend(neighbors);
    }

    /// Out-neighbors of `node`, or `None` if it is not a key.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.adjacency.get(&node)
    }

    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of node keys.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges (sum of neighbor set sizes).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Node keys in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// `(node, neighbors)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BTreeSet<NodeId>)> + '_ {
        self.adjacency.iter().map(|(node, neighbors)| (*node, neighbors))
    }

    /// All edges as `(from, to)` pairs, sorted.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(from, neighbors)| neighbors.iter().map(move |to| (*from, *to)))
    }

    /// Number of nodes listed in their own neighbor set.
    #[must_use]
    pub fn self_loop_count(&self) -> usize {
        self.adjacency
            .iter()
            .filter(|(node, neighbors)| neighbors.contains(node))
            .count()
    }

    /// BLAKE3 hash of the sorted edge list and node set.
    ///
    /// Two graphs hash equal iff they have the same keys and the same edges,
    /// which makes the hash a cheap fingerprint for comparing growth runs.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (node, neighbors) in &self.adjacency {
            hasher.update(&(*node as u64).to_le_bytes());
            hasher.update(b":");
            for neighbor in neighbors {
                hasher.update(&(*neighbor as u64).to_le_bytes());
            }
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Export to a petgraph [`DiGraph`].
    ///
    /// Keys are added in ascending order, followed by any edge targets that
    /// are not keys themselves.
    #[must_use]
    pub fn to_digraph(&self) -> IndexedDiGraph {
        let mut graph = DiGraph::<NodeId, ()>::with_capacity(self.node_count(), self.edge_count());
        let mut node_map = BTreeMap::new();

        for node in self.nodes() {
            node_map.insert(node, graph.add_node(node));
        }

        for (from, to) in self.edges() {
            let from_idx = node_map[&from];
            let to_idx = *node_map
                .entry(to)
                .or_insert_with(|| graph.add_node(to));
            graph.add_edge(from_idx, to_idx, ());
        }

        IndexedDiGraph { graph, node_map }
    }
}

impl<'a> IntoIterator for &'a DirectedGraph {
    type Item = (&'a NodeId, &'a BTreeSet<NodeId>);
    type IntoIter = std::collections::btree_map::Iter<'a, NodeId, BTreeSet<NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.adjacency.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::Direction;

    fn chain() -> DirectedGraph {
        // 0 → 1 → 2, 3 isolated
        DirectedGraph::from_adjacency([(0, vec![1]), (1, vec![2]), (2, vec![]), (3, vec![])])
    }

    #[test]
    fn from_adjacency_keeps_empty_nodes() {
        let g = chain();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(3).map(BTreeSet::len), Some(0));
    }

    #[test]
    fn from_adjacency_does_not_vivify_targets() {
        let g = DirectedGraph::from_adjacency([(0, vec![7])]);
        assert!(g.contains_node(0));
        assert!(!g.contains_node(7));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn from_adjacency_merges_repeated_entries() {
        let g = DirectedGraph::from_adjacency([(0, vec![1]), (0, vec![2]), (1, vec![])]);
        assert_eq!(g.neighbors(0), Some(&BTreeSet::from([1, 2])));
    }

    #[test]
    fn insert_node_is_idempotent() {
        let mut g = DirectedGraph::new();
        assert!(g.insert_node(5));
        assert!(!g.insert_node(5));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn insert_edge_creates_both_endpoints() {
        let mut g = DirectedGraph::new();
        assert!(g.insert_edge(0, 1));
        assert!(!g.insert_edge(0, 1), "duplicate edges collapse");
        assert!(g.contains_node(0));
        assert!(g.contains_node(1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn set_neighbors_replaces() {
        let mut g = chain();
        let previous = g.set_neighbors(0, BTreeSet::from([2, 3]));
        assert_eq!(previous, Some(BTreeSet::from([1])));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn edges_are_sorted() {
        let g = DirectedGraph::from_adjacency([(1, vec![0]), (0, vec![2, 1])]);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn self_loops_are_counted() {
        let g = DirectedGraph::from_adjacency([(0, vec![0, 1]), (1, vec![1])]);
        assert_eq!(g.self_loop_count(), 2);
        assert_eq!(chain().self_loop_count(), 0);
    }

    #[test]
    fn content_hash_tracks_edges() {
        let a = chain();
        let mut b = chain();
        assert_eq!(a.content_hash(), b.content_hash());
        assert!(a.content_hash().starts_with("blake3:"));

        b.insert_edge(3, 0);
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn content_hash_tracks_isolated_nodes() {
        let a = chain();
        let mut b = chain();
        b.insert_node(9);
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn digraph_export_matches_degrees() {
        let g = DirectedGraph::from_adjacency([(0, vec![1, 2]), (1, vec![2]), (2, vec![])]);
        let indexed = g.to_digraph();

        assert_eq!(indexed.graph.node_count(), 3);
        assert_eq!(indexed.graph.edge_count(), 3);

        let two = indexed.node_map[&2];
        assert_eq!(
            indexed
                .graph
                .neighbors_directed(two, Direction::Incoming)
                .count(),
            2
        );
        assert_eq!(indexed.graph[two], 2);
    }

    #[test]
    fn digraph_export_adds_dangling_targets() {
        let g = DirectedGraph::from_adjacency([(0, vec![4])]);
        let indexed = g.to_digraph();
        assert_eq!(indexed.graph.node_count(), 2);
        assert!(indexed.node_map.contains_key(&4));
    }

    #[test]
    fn serializes_as_plain_map() {
        let g = DirectedGraph::from_adjacency([(0, vec![1]), (1, vec![])]);
        let json = serde_json::to_string(&g).expect("serialize");
        assert_eq!(json, r#"{"0":[1],"1":[]}"#);

        let back: DirectedGraph = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, g);
    }
}
