use proptest::prelude::*;

use citegraph_core::{
    DirectedGraph, compute_average_out_degree, compute_in_degrees,
    compute_in_degrees_complete, compute_out_degrees, in_degree_distribution,
    make_complete_graph,
};

/// Graphs on `0..n` with arbitrary edges (self-loops included).
fn arb_graph() -> impl Strategy<Value = DirectedGraph> {
    (1_usize..24).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::btree_set(0..n, 0..n), n).prop_map(
            |adjacency| DirectedGraph::from_adjacency(adjacency.into_iter().enumerate()),
        )
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn out_degree_sum_equals_in_degree_sum(graph in arb_graph()) {
        let out_sum: usize = compute_out_degrees(&graph).values().sum();
        let in_sum: usize = compute_in_degrees(&graph).values().sum();
        let in_sum_complete: usize = compute_in_degrees_complete(&graph).values().sum();
        prop_assert_eq!(out_sum, in_sum);
        prop_assert_eq!(out_sum, in_sum_complete);
    }

    #[test]
    fn in_degrees_never_report_zero(graph in arb_graph()) {
        prop_assert!(compute_in_degrees(&graph).values().all(|&d| d > 0));
    }

    #[test]
    fn distribution_counts_cited_nodes(graph in arb_graph()) {
        let cited = compute_in_degrees(&graph).len();
        let counted: usize = in_degree_distribution(&graph).values().sum();
        prop_assert_eq!(cited, counted);
    }

    #[test]
    fn average_out_degree_is_floor_of_mean(graph in arb_graph()) {
        let avg = compute_average_out_degree(&graph).expect("non-empty");
        let n = graph.node_count();
        let edges = graph.edge_count();
        prop_assert!(avg * n <= edges);
        prop_assert!(edges < (avg + 1) * n);
    }

    #[test]
    fn complete_graph_shape(n in 0_usize..40) {
        let g = make_complete_graph(n);
        prop_assert_eq!(g.node_count(), n);
        prop_assert_eq!(g.self_loop_count(), 0);
        for (_, degree) in compute_out_degrees(&g) {
            prop_assert_eq!(degree, n - 1);
        }
    }
}
