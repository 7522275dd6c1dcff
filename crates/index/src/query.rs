use std::cmp::Ordering;

use crate::label::INF;
use crate::SpcIndex;

impl SpcIndex {
    /// Answers a shortest-path count query: the distance between `v1` and
    /// `v2` and the number of distinct shortest paths of that length.
    ///
    /// Returns `(0, 0)` when the two vertices are disconnected. Requires a
    /// merged index and `v1 != v2`; self queries are a precondition
    /// violation and callers must guard them.
    pub fn count(&self, v1: u32, v2: u32) -> (u32, u64) {
        assert_ne!(v1, v2, "self queries are undefined");
        debug_assert!(self.is_merged(), "query requires a merged index");
        self.count_pair(v1, v2)
    }

    /// The merge-join over both label lists, without the self-query guard.
    /// The decremental affected-set scan relies on being able to probe
    /// `(v, v)` pairs.
    pub(crate) fn count_pair(&self, v1: u32, v2: u32) -> (u32, u64) {
        let l1 = &self.cl[v1 as usize];
        let l2 = &self.cl[v2 as usize];

        let mut sp_d = INF;
        let mut sp_c: u64 = 0;

        let (mut p1, mut p2) = (0, 0);
        while p1 < l1.len() && p2 < l2.len() {
            let r1 = self.rank_of(l1[p1].hub());
            let r2 = self.rank_of(l2[p2].hub());
            match r1.cmp(&r2) {
                Ordering::Less => p1 += 1,
                Ordering::Greater => p2 += 1,
                Ordering::Equal => {
                    let d = l1[p1].dist() + l2[p2].dist();
                    let c = (l1[p1].cnt() as u64).saturating_mul(l2[p2].cnt() as u64);
                    if d < sp_d {
                        sp_d = d;
                        sp_c = c;
                    } else if d == sp_d {
                        sp_c = sp_c.saturating_add(c);
                    }
                    p1 += 1;
                    p2 += 1;
                }
            }
        }

        if sp_d == INF || sp_c == 0 {
            return (0, 0);
        }
        (sp_d, sp_c)
    }

    /// Distance-only merge query between `hub`'s and `v`'s label lists.
    pub(crate) fn query_distance(&self, hub: u32, v: u32) -> u32 {
        let lh = &self.cl[hub as usize];
        let lv = &self.cl[v as usize];

        let mut sp_d = INF;

        let (mut ph, mut pv) = (0, 0);
        while ph < lh.len() && pv < lv.len() {
            let rh = self.rank_of(lh[ph].hub());
            let rv = self.rank_of(lv[pv].hub());
            match rh.cmp(&rv) {
                Ordering::Less => ph += 1,
                Ordering::Greater => pv += 1,
                Ordering::Equal => {
                    sp_d = sp_d.min(lh[ph].dist() + lv[pv].dist());
                    ph += 1;
                    pv += 1;
                }
            }
        }

        sp_d
    }

    /// Hybrid lookup for the updaters: scans `v`'s label list for the entry
    /// at hub `h` while merge-joining the best alternative answer through
    /// hubs ranked above `h`.
    ///
    /// Returns `(d_over, c_over, d_h, c_h, pos)`: the alternative distance
    /// and count, the stored entry at `h` (`d_h == u32::MAX` if absent),
    /// and the position of (or insertion position for) `h` in `v`'s list.
    pub(crate) fn query_search(&self, h: u32, v: u32) -> (u32, u64, u32, u64, usize) {
        let lh = &self.cl[h as usize];
        let lv = &self.cl[v as usize];

        let mut sp_d = INF;
        let mut sp_c: u64 = 0;

        let (mut ph, mut pv) = (0, 0);
        while ph < lh.len() && pv < lv.len() {
            if lv[pv].hub() == h {
                return (sp_d, sp_c, lv[pv].dist(), lv[pv].cnt() as u64, pv);
            }

            let rh = self.rank_of(lh[ph].hub());
            let rv = self.rank_of(lv[pv].hub());
            match rh.cmp(&rv) {
                Ordering::Less => ph += 1,
                Ordering::Greater => pv += 1,
                Ordering::Equal => {
                    let d = lh[ph].dist() + lv[pv].dist();
                    let c = (lh[ph].cnt() as u64).saturating_mul(lv[pv].cnt() as u64);
                    if d < sp_d {
                        sp_d = d;
                        sp_c = c;
                    } else if d == sp_d {
                        sp_c = sp_c.saturating_add(c);
                    }
                    ph += 1;
                    pv += 1;
                }
            }
        }

        (sp_d, sp_c, INF, 0, pv)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn merged(edges: Vec<(u32, u32)>, n: u32) -> SpcIndex {
        let graph = UndirectedGraph::from_edges(n, edges).unwrap();
        let mut index = IndexBuilder::new().build(graph).unwrap();
        index.merge();
        index
    }

    #[test]
    fn adjacent_vertices() {
        let index = merged(vec![(0, 1), (1, 2)], 3);
        assert_eq!(index.count(0, 1), (1, 1));
        assert_eq!(index.count(1, 0), (1, 1));
    }

    #[test]
    fn parallel_shortest_paths_multiply() {
        // two disjoint length-2 routes between 0 and 5
        let index = merged(vec![(0, 1), (1, 5), (0, 2), (2, 5)], 6);
        assert_eq!(index.count(0, 5), (2, 2));
    }

    #[test]
    fn unreachable_pair_is_zero_zero() {
        let index = merged(vec![(0, 1), (2, 3)], 4);
        assert_eq!(index.count(0, 2), (0, 0));
        assert_eq!(index.count(1, 3), (0, 0));
    }

    #[test]
    #[should_panic(expected = "self queries")]
    fn self_query_panics() {
        let index = merged(vec![(0, 1)], 2);
        let _ = index.count(1, 1);
    }

    #[test]
    fn query_search_finds_stored_entry() {
        let index = merged(vec![(0, 1), (1, 2), (0, 2)], 3);
        let hub = index.order()[0];
        let v = index.order()[2];

        let (_, _, d_h, c_h, pos) = index.query_search(hub, v);
        assert_eq!(d_h, 1);
        assert_eq!(c_h, 1);
        assert_eq!(index.labels(v)[pos].hub(), hub);
    }
}
