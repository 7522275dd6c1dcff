use crate::label::{LabelEntry, D_MAX};
use crate::{Error, UndirectedGraph};

/// A 2-hop labeling index over an undirected graph, carrying shortest-path
/// counts next to distances.
///
/// Freshly built indexes keep two label lists per vertex: the canonical list
/// `dl` (entries whose distance is the true hub distance, used for pruning
/// during construction) and the non-canonical list `cl` (additional
/// shortest-path counts through non-optimal hubs). [`SpcIndex::merge`]
/// folds `dl` into `cl`; queries and updates operate on the merged lists.
///
/// The vertex order is frozen for the lifetime of the index: edge updates
/// patch labels but never reorder vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpcIndex {
    pub(crate) graph: UndirectedGraph,
    pub(crate) dl: Vec<Vec<LabelEntry>>,
    pub(crate) cl: Vec<Vec<LabelEntry>>,
    pub(crate) order: Vec<u32>,
    pub(crate) rank: Vec<u32>,
}

impl SpcIndex {
    #[inline]
    pub fn node_count(&self) -> u32 {
        self.graph.node_count()
    }

    #[inline]
    pub fn graph(&self) -> &UndirectedGraph {
        &self.graph
    }

    /// The vertex order; `order()[0]` is the most central vertex.
    #[inline]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// The position of `v` in the vertex order.
    #[inline]
    pub fn rank_of(&self, v: u32) -> u32 {
        self.rank[v as usize]
    }

    /// Whether the canonical lists have been folded into the merged lists.
    #[inline]
    pub fn is_merged(&self) -> bool {
        self.dl.is_empty()
    }

    /// The (merged) label list of `v`, sorted ascending by hub rank.
    #[inline]
    pub fn labels(&self, v: u32) -> &[LabelEntry] {
        &self.cl[v as usize]
    }

    /// The canonical label list of `v`; empty once merged.
    #[inline]
    pub fn canonical_labels(&self, v: u32) -> &[LabelEntry] {
        self.dl.get(v as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of label entries across all vertices and both lists.
    pub fn label_count(&self) -> u64 {
        let canonical: u64 = self.dl.iter().map(|l| l.len() as u64).sum();
        let merged: u64 = self.cl.iter().map(|l| l.len() as u64).sum();
        canonical + merged
    }

    /// Folds each canonical list into the corresponding merged list,
    /// keeping hub ranks ascending, and drops the canonical lists.
    /// Idempotent.
    pub fn merge(&mut self) {
        if self.dl.is_empty() {
            return;
        }

        for (dl, cl) in self.dl.iter_mut().zip(self.cl.iter_mut()) {
            if dl.is_empty() {
                continue;
            }
            let mut merged = Vec::with_capacity(dl.len() + cl.len());
            let (mut di, mut ci) = (0, 0);
            while di < dl.len() && ci < cl.len() {
                if self.rank[dl[di].hub() as usize] < self.rank[cl[ci].hub() as usize] {
                    merged.push(dl[di]);
                    di += 1;
                } else {
                    merged.push(cl[ci]);
                    ci += 1;
                }
            }
            merged.extend_from_slice(&dl[di..]);
            merged.extend_from_slice(&cl[ci..]);
            dl.clear();
            *cl = merged;
        }

        self.dl = Vec::new();
    }

    /// Checks the structural label invariants: every entry's fields in
    /// range, hub ranks strictly ascending within every list, no hub ranked
    /// below its list owner, and a `(v, 0, 1)` self entry per vertex.
    ///
    /// Entries loaded from a file bypass the [`LabelEntry::new`] checks, so
    /// the field ranges are verified here before any rank lookup.
    pub fn validate(&self) -> Result<(), Error> {
        let node_count = self.node_count();
        for v in 0..node_count {
            for labels in [self.canonical_labels(v), self.labels(v)] {
                for entry in labels {
                    if entry.hub() >= node_count {
                        return Err(Error::InvariantViolation {
                            message: format!(
                                "label list of vertex {v} references hub {} of only {node_count} vertices",
                                entry.hub()
                            ),
                        });
                    }
                    if entry.dist() > D_MAX {
                        return Err(Error::InvariantViolation {
                            message: format!(
                                "label list of vertex {v} stores the reserved distance sentinel"
                            ),
                        });
                    }
                }
                for window in labels.windows(2) {
                    if self.rank_of(window[0].hub()) >= self.rank_of(window[1].hub()) {
                        return Err(Error::InvariantViolation {
                            message: format!("label list of vertex {v} not sorted by hub rank"),
                        });
                    }
                }
                if let Some(last) = labels.last() {
                    if self.rank_of(last.hub()) > self.rank_of(v) {
                        return Err(Error::InvariantViolation {
                            message: format!("vertex {v} carries a hub ranked below itself"),
                        });
                    }
                }
            }

            let self_entry = LabelEntry::new(v, 0, 1);
            let has_self = self.canonical_labels(v).last() == Some(&self_entry)
                || self.labels(v).last() == Some(&self_entry);
            if !has_self {
                return Err(Error::InvariantViolation {
                    message: format!("vertex {v} is missing its self label"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn diamond() -> SpcIndex {
        let graph = UndirectedGraph::from_edges(4, vec![(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        IndexBuilder::new().build(graph).unwrap()
    }

    #[test]
    fn merge_is_idempotent() {
        let mut index = diamond();
        index.merge();
        let once = index.clone();
        index.merge();
        assert_eq!(index, once);
    }

    #[test]
    fn merge_preserves_entry_count_and_order() {
        let mut index = diamond();
        let total = index.label_count();
        index.merge();

        assert!(index.is_merged());
        assert_eq!(index.label_count(), total);
        index.validate().unwrap();
    }

    #[test]
    fn validate_accepts_fresh_index() {
        diamond().validate().unwrap();
    }

    #[test]
    fn validate_rejects_out_of_range_hub() {
        let mut index = diamond();
        index.merge();
        index.cl[0][0] = LabelEntry::new(9, 1, 1);
        assert!(matches!(
            index.validate(),
            Err(Error::InvariantViolation { .. })
        ));
    }
}
