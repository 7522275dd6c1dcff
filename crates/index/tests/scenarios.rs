//! Fixed small-graph scenarios with hand-checked answers, each
//! cross-checked against the bidirectional BFS reference.

use spc_index::prelude::*;

fn build_merged(n: u32, edges: Vec<(u32, u32)>) -> SpcIndex {
    let graph = UndirectedGraph::from_edges(n, edges).unwrap();
    let mut index = IndexBuilder::new().build(graph).unwrap();
    index.validate().unwrap();
    index.merge();
    index.validate().unwrap();
    index
}

fn assert_all_pairs_match_oracle(index: &SpcIndex) {
    for s in 0..index.node_count() {
        for t in 0..index.node_count() {
            if s != t {
                assert_eq!(
                    index.count(s, t),
                    bi_bfs_count(index.graph(), s, t),
                    "pair ({s}, {t})"
                );
            }
        }
    }
}

#[test]
fn triangle() {
    let index = build_merged(3, vec![(0, 1), (1, 2), (0, 2)]);
    for (s, t) in [(0, 1), (1, 2), (0, 2)] {
        assert_eq!(index.count(s, t), (1, 1));
        assert_eq!(index.count(t, s), (1, 1));
    }
    assert_all_pairs_match_oracle(&index);
}

#[test]
fn four_cycle() {
    let index = build_merged(4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    assert_eq!(index.count(0, 2), (2, 2));
    assert_eq!(index.count(1, 3), (2, 2));
    assert_eq!(index.count(0, 1), (1, 1));
    assert_all_pairs_match_oracle(&index);
}

#[test]
fn diamond() {
    let index = build_merged(4, vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
    assert_eq!(index.count(0, 3), (2, 2));
    assert_eq!(index.count(1, 2), (2, 2));
    assert_all_pairs_match_oracle(&index);
}

#[test]
fn path_of_length_three() {
    let mut index = build_merged(4, vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(index.count(0, 3), (3, 1));
    assert_eq!(index.count(0, 2), (2, 1));
    assert_all_pairs_match_oracle(&index);

    index.insert_edge(0, 3);
    assert_eq!(index.count(0, 3), (1, 1));
    // the inserted edge closes the path into a 4-cycle
    assert_eq!(index.count(0, 2), (2, 2));
    assert_all_pairs_match_oracle(&index);
}

#[test]
fn complete_graph_k5() {
    let mut edges = Vec::new();
    for u in 0..5 {
        for v in (u + 1)..5 {
            edges.push((u, v));
        }
    }
    let index = build_merged(5, edges);
    for s in 0..5 {
        for t in 0..5 {
            if s != t {
                assert_eq!(index.count(s, t), (1, 1));
            }
        }
    }
}

#[test]
fn disconnected_components() {
    let index = build_merged(4, vec![(0, 1), (2, 3)]);
    assert_eq!(index.count(0, 2), (0, 0));
    assert_eq!(index.count(0, 3), (0, 0));
    assert_eq!(index.count(0, 1), (1, 1));
    assert_eq!(index.count(2, 3), (1, 1));
    assert_all_pairs_match_oracle(&index);
}

#[test]
fn incremental_chain() {
    let mut index = build_merged(5, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(index.count(0, 4), (4, 1));

    index.insert_edge(0, 2);
    assert_eq!(index.count(0, 4), (3, 1));
    assert_all_pairs_match_oracle(&index);

    index.insert_edge(1, 3);
    // 0-1-3-4 and 0-2-3-4
    assert_eq!(index.count(0, 4), (3, 2));
    assert_all_pairs_match_oracle(&index);
    index.validate().unwrap();
}

#[test]
fn decremental_k4() {
    let mut index = build_merged(4, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    for s in 0..4 {
        for t in (s + 1)..4 {
            assert_eq!(index.count(s, t), (1, 1));
        }
    }

    index.remove_edge(0, 1);
    // via 2 and via 3
    assert_eq!(index.count(0, 1), (2, 2));
    assert_all_pairs_match_oracle(&index);
    index.validate().unwrap();
}
