use std::collections::VecDeque;
use std::time::Instant;

use log::info;

use crate::label::{LabelEntry, INF};
use crate::order::{compute_order, rank_from_order, OrderScheme};
use crate::{Error, SpcIndex, UndirectedGraph};

/// Builds an [`SpcIndex`] from a pruned breadth-first traversal rooted at
/// every vertex, in order of descending centrality.
///
/// The traversal from root `u` only expands into vertices ranked below `u`
/// and skips every vertex whose distance is already covered by the labels
/// of higher-priority hubs; what survives becomes the label entries of the
/// visited vertices. Construction is sequential by design: the pruning test
/// for root `u` reads the canonical labels emitted by all earlier roots.
///
/// # Example
///
/// ```
/// use spc_index::prelude::*;
///
/// let graph = UndirectedGraph::from_edges(4, vec![(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
/// let mut index = IndexBuilder::new().build(graph).unwrap();
/// index.merge();
///
/// assert_eq!(index.count(0, 3), (2, 2));
/// ```
pub struct IndexBuilder {
    scheme: OrderScheme,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            scheme: OrderScheme::Degree,
        }
    }

    pub fn order_scheme(mut self, scheme: OrderScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn build(self, graph: UndirectedGraph) -> Result<SpcIndex, Error> {
        let start = Instant::now();

        let node_count = graph.node_count() as usize;
        let order = compute_order(self.scheme, &graph)?;
        let rank = rank_from_order(&order);

        let mut dl: Vec<Vec<LabelEntry>> = vec![Vec::new(); node_count];
        let mut cl: Vec<Vec<LabelEntry>> = vec![Vec::new(); node_count];

        // scratch arrays, allocated once and cleared via the reset list
        let mut root_dists = vec![INF; node_count];
        let mut dist = vec![INF; node_count];
        let mut cnt = vec![0_u32; node_count];
        let mut queue = VecDeque::new();
        let mut reset = Vec::new();

        for &root in &order {
            let root_rank = rank[root as usize];

            // project the root's canonical labels for the pruning test
            for entry in &dl[root as usize] {
                root_dists[entry.hub() as usize] = entry.dist();
            }

            dist[root as usize] = 0;
            cnt[root as usize] = 1;
            queue.push_back(root);
            reset.push(root);

            while let Some(v) = queue.pop_front() {
                let d_so_far = joint_distance(&root_dists, &dl[v as usize]);
                if dist[v as usize] > d_so_far {
                    continue;
                }

                let entry = LabelEntry::new(root, dist[v as usize], cnt[v as usize]);
                if dist[v as usize] < d_so_far {
                    dl[v as usize].push(entry);
                } else {
                    cl[v as usize].push(entry);
                }

                for &w in graph.neighbors(v) {
                    if rank[w as usize] <= root_rank {
                        continue;
                    }
                    if dist[w as usize] == INF {
                        dist[w as usize] = dist[v as usize] + 1;
                        cnt[w as usize] = cnt[v as usize];
                        queue.push_back(w);
                        reset.push(w);
                    } else if dist[w as usize] == dist[v as usize] + 1 {
                        cnt[w as usize] = cnt[w as usize].saturating_add(cnt[v as usize]);
                    }
                }
            }

            for &v in &reset {
                dist[v as usize] = INF;
                cnt[v as usize] = 0;
            }
            reset.clear();

            for entry in &dl[root as usize] {
                root_dists[entry.hub() as usize] = INF;
            }
        }

        let index = SpcIndex {
            graph,
            dl,
            cl,
            order,
            rank,
        };

        info!(
            "Built index for {} vertices ({} label entries) in {:?}",
            node_count,
            index.label_count(),
            start.elapsed()
        );

        Ok(index)
    }
}

/// The joint distance from the current root to the owner of `labels`: the
/// minimum of `dist(root, hub) + dist(hub, owner)` over the owner's
/// canonical hubs, where `root_dists` projects the root's canonical list.
fn joint_distance(root_dists: &[u32], labels: &[LabelEntry]) -> u32 {
    let mut d = INF;
    for entry in labels {
        let via_root = root_dists[entry.hub() as usize];
        if via_root == INF {
            continue;
        }
        d = d.min(via_root + entry.dist());
    }
    d
}
