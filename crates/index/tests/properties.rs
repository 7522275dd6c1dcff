//! Randomized property tests: the labeling query must agree with the
//! bidirectional BFS reference on every vertex pair, before and after edge
//! updates, and the on-disk format must round-trip bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spc_index::prelude::*;

/// A connected graph: a random attachment tree plus `extra` chords.
fn random_connected_graph(rng: &mut StdRng, node_count: u32, extra: usize) -> UndirectedGraph {
    let mut edges = Vec::new();
    for v in 1..node_count {
        edges.push((rng.gen_range(0..v), v));
    }
    for _ in 0..extra {
        let u = rng.gen_range(0..node_count);
        let v = rng.gen_range(0..node_count);
        if u != v {
            edges.push((u, v));
        }
    }
    UndirectedGraph::from_edges(node_count, edges).unwrap()
}

fn build_merged(graph: UndirectedGraph) -> SpcIndex {
    let mut index = IndexBuilder::new().build(graph).unwrap();
    index.merge();
    index
}

fn assert_matches_oracle(index: &SpcIndex) {
    for s in 0..index.node_count() {
        for t in (s + 1)..index.node_count() {
            assert_eq!(
                index.count(s, t),
                bi_bfs_count(index.graph(), s, t),
                "pair ({s}, {t})"
            );
        }
    }
}

#[test]
fn labels_are_sorted_and_carry_self_entries() {
    let mut rng = StdRng::seed_from_u64(0x5bc);
    for _ in 0..8 {
        let node_count = rng.gen_range(8..60);
        let graph = random_connected_graph(&mut rng, node_count, node_count as usize);
        let index = build_merged(graph);

        index.validate().unwrap();
        for v in 0..node_count {
            let labels = index.labels(v);
            assert!(labels.contains(&LabelEntry::new(v, 0, 1)));
            for window in labels.windows(2) {
                assert!(index.rank_of(window[0].hub()) < index.rank_of(window[1].hub()));
            }
        }
    }
}

#[test]
fn queries_match_the_oracle() {
    let mut rng = StdRng::seed_from_u64(0x201);
    for _ in 0..6 {
        let node_count = rng.gen_range(10..50);
        let extra = rng.gen_range(0..2 * node_count as usize);
        let graph = random_connected_graph(&mut rng, node_count, extra);
        let index = build_merged(graph);
        assert_matches_oracle(&index);
    }
}

#[test]
fn queries_match_the_oracle_on_a_dense_mesh() {
    // 4x5 grid: plenty of equal-length alternatives
    let (rows, cols) = (4u32, 5u32);
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                edges.push((v, v + 1));
            }
            if r + 1 < rows {
                edges.push((v, v + cols));
            }
        }
    }
    let index = build_merged(UndirectedGraph::from_edges(rows * cols, edges).unwrap());
    assert_matches_oracle(&index);

    // corner to corner of a grid: binomial(7, 3) monotone paths
    assert_eq!(index.count(0, rows * cols - 1), (7, 35));
}

#[test]
fn round_trip_preserves_both_shapes() {
    let mut rng = StdRng::seed_from_u64(0x10);
    let graph = random_connected_graph(&mut rng, 40, 60);
    let mut index = IndexBuilder::new().build(graph).unwrap();

    let dir = tempfile::tempdir().unwrap();

    let split_path = dir.path().join("index.split.bin");
    index.write_to_path(&split_path).unwrap();
    let restored = SpcIndex::read_from_path(&split_path).unwrap();
    assert_eq!(restored, index);

    index.merge();
    let merged_path = dir.path().join("index.merged.bin");
    index.write_to_path(&merged_path).unwrap();
    let restored = SpcIndex::read_from_path(&merged_path).unwrap();
    assert_eq!(restored, index);
}

#[test]
fn merge_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x44);
    let graph = random_connected_graph(&mut rng, 30, 45);
    let mut index = IndexBuilder::new().build(graph).unwrap();

    index.merge();
    let once = index.clone();
    index.merge();
    assert_eq!(index, once);
}

#[test]
fn insertions_track_a_fresh_rebuild() {
    let mut rng = StdRng::seed_from_u64(0x6e5);
    for _ in 0..5 {
        let node_count = rng.gen_range(8..40);
        let graph = random_connected_graph(&mut rng, node_count, node_count as usize / 2);
        let mut index = build_merged(graph);

        // find a non-edge
        let (a, b) = loop {
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            if a != b && !index.graph().has_edge(a, b) {
                break (a, b);
            }
        };

        index.insert_edge(a, b);
        index.validate().unwrap();
        assert_matches_oracle(&index);

        let rebuilt = build_merged(index.graph().clone());
        for s in 0..node_count {
            for t in (s + 1)..node_count {
                assert_eq!(index.count(s, t), rebuilt.count(s, t), "pair ({s}, {t})");
            }
        }
    }
}

#[test]
fn deletions_track_a_fresh_rebuild() {
    let mut rng = StdRng::seed_from_u64(0xde1);
    for _ in 0..5 {
        let node_count = rng.gen_range(8..40);
        let graph = random_connected_graph(&mut rng, node_count, node_count as usize);
        let mut index = build_merged(graph);

        // pick a random present edge
        let (a, b) = loop {
            let a = rng.gen_range(0..node_count);
            if index.graph().degree(a) > 0 {
                let targets = index.graph().neighbors(a);
                let b = targets[rng.gen_range(0..targets.len())];
                break (a, b);
            }
        };

        index.remove_edge(a, b);
        index.validate().unwrap();
        assert_matches_oracle(&index);

        let rebuilt = build_merged(index.graph().clone());
        for s in 0..node_count {
            for t in (s + 1)..node_count {
                assert_eq!(index.count(s, t), rebuilt.count(s, t), "pair ({s}, {t})");
            }
        }
    }
}

#[test]
fn mixed_update_stream_matches_the_oracle() {
    let mut rng = StdRng::seed_from_u64(0x3b);
    let node_count = 24;
    let graph = random_connected_graph(&mut rng, node_count, 20);
    let mut index = build_merged(graph);

    for _ in 0..12 {
        let a = rng.gen_range(0..node_count);
        let b = rng.gen_range(0..node_count);
        if a == b {
            continue;
        }
        if index.graph().has_edge(a, b) {
            index.remove_edge(a, b);
        } else {
            index.insert_edge(a, b);
        }
        index.validate().unwrap();
        assert_matches_oracle(&index);
    }
}

#[test]
fn builds_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x8d);
    let graph = random_connected_graph(&mut rng, 35, 50);

    let first = IndexBuilder::new().build(graph.clone()).unwrap();
    let second = IndexBuilder::new().build(graph).unwrap();
    assert_eq!(first, second);

    let mut bytes_first = Vec::new();
    first.write(&mut bytes_first).unwrap();
    let mut bytes_second = Vec::new();
    second.write(&mut bytes_second).unwrap();
    assert_eq!(bytes_first, bytes_second);
}
