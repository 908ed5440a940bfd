#![no_main]

use citegraph_core::parse::parse_adjacency;
use citegraph_core::stats::{compute_in_degrees, compute_out_degrees};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = parse_adjacency(text) else {
        return;
    };

    let out_sum: usize = compute_out_degrees(&graph).values().sum();
    let in_sum: usize = compute_in_degrees(&graph).values().sum();
    assert_eq!(out_sum, in_sum);
    assert_eq!(out_sum, graph.edge_count());
});
