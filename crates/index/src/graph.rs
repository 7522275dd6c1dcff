use fxhash::FxHashSet;

use crate::Error;

/// An undirected simple graph over vertices `0..n`, stored as
/// vertex-indexed adjacency lists.
///
/// Neighbor lists are sorted ascending and deduplicated; there are no self
/// loops. The edge `(u, v)` is stored on both endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndirectedGraph {
    adjacency: Vec<Vec<u32>>,
}

impl UndirectedGraph {
    /// Builds a graph from an edge list.
    ///
    /// Duplicate edges are collapsed on the `(min, max)` endpoint pair. Self
    /// loops and out-of-range endpoints are rejected.
    pub fn from_edges<I>(node_count: u32, edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        if node_count < 2 {
            return Err(Error::InvalidInput {
                message: format!("graph needs at least two vertices, got {node_count}"),
            });
        }

        let mut adjacency = vec![Vec::new(); node_count as usize];
        let mut seen = FxHashSet::default();

        for (u, v) in edges {
            if u >= node_count || v >= node_count {
                return Err(Error::InvalidInput {
                    message: format!("edge ({u}, {v}) out of range for {node_count} vertices"),
                });
            }
            if u == v {
                return Err(Error::InvalidInput {
                    message: format!("self loop at vertex {u}"),
                });
            }
            if seen.insert((u.min(v), u.max(v))) {
                adjacency[u as usize].push(v);
                adjacency[v as usize].push(u);
            }
        }

        for targets in adjacency.iter_mut() {
            targets.sort_unstable();
        }

        Ok(Self { adjacency })
    }

    pub(crate) fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Self {
        Self { adjacency }
    }

    /// Checks the structural adjacency invariants on a graph assembled from
    /// untrusted data: targets in range and strictly ascending (which rules
    /// out duplicates), no self loops, every edge stored on both endpoints.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let node_count = self.node_count();
        for v in 0..node_count {
            let targets = self.neighbors(v);
            for &w in targets {
                if w >= node_count {
                    return Err(Error::InvalidInput {
                        message: format!(
                            "neighbor {w} of vertex {v} out of range for {node_count} vertices"
                        ),
                    });
                }
                if w == v {
                    return Err(Error::InvalidInput {
                        message: format!("self loop at vertex {v}"),
                    });
                }
            }
            for window in targets.windows(2) {
                if window[0] >= window[1] {
                    return Err(Error::InvalidInput {
                        message: format!("adjacency of vertex {v} not strictly ascending"),
                    });
                }
            }
            for &w in targets {
                if !self.has_edge(w, v) {
                    return Err(Error::InvalidInput {
                        message: format!("edge ({v}, {w}) is missing its reverse direction"),
                    });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.adjacency.len() as u32
    }

    pub fn edge_count(&self) -> u64 {
        self.adjacency.iter().map(|t| t.len() as u64).sum::<u64>() / 2
    }

    #[inline]
    pub fn degree(&self, node: u32) -> u32 {
        self.adjacency[node as usize].len() as u32
    }

    #[inline]
    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }

    pub fn has_edge(&self, u: u32, v: u32) -> bool {
        self.adjacency[u as usize].binary_search(&v).is_ok()
    }

    /// Inserts the edge `(u, v)` on both endpoints, keeping lists sorted.
    pub fn insert_edge(&mut self, u: u32, v: u32) {
        debug_assert_ne!(u, v);
        for (source, target) in [(u, v), (v, u)] {
            let targets = &mut self.adjacency[source as usize];
            if let Err(i) = targets.binary_search(&target) {
                targets.insert(i, target);
            }
        }
    }

    /// Removes the edge `(u, v)` from both endpoints.
    pub fn remove_edge(&mut self, u: u32, v: u32) {
        for (source, target) in [(u, v), (v, u)] {
            let targets = &mut self.adjacency[source as usize];
            if let Ok(i) = targets.binary_search(&target) {
                targets.remove(i);
            }
        }
    }
}
