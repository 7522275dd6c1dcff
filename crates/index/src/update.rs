//! Single-edge index maintenance.
//!
//! [`SpcIndex::insert_edge`] and [`SpcIndex::remove_edge`] patch the merged
//! label lists in place instead of rebuilding. The vertex order is frozen:
//! an update never changes hub priorities, only which entries exist.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::label::{sat, LabelEntry, INF};
use crate::SpcIndex;

/// Patch counters reported by [`SpcIndex::insert_edge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncStats {
    /// Entries whose count changed at an unchanged distance.
    pub renewed_counts: u32,
    /// Entries whose distance shrank.
    pub renewed_dists: u32,
    /// Entries newly inserted.
    pub inserted: u32,
}

/// Patch counters reported by [`SpcIndex::remove_edge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecStats {
    /// Affected vertices on the two endpoint sides.
    pub affected_a: usize,
    pub affected_b: usize,
    /// Receiver-only vertices on the two endpoint sides.
    pub receivers_a: usize,
    pub receivers_b: usize,
    pub renewed_counts: u32,
    pub renewed_dists: u32,
    pub inserted: u32,
    pub removed: u32,
    /// Whether the isolated-vertex fast path handled the deletion.
    pub isolated: bool,
}

impl SpcIndex {
    /// Inserts the edge `(a, b)` into the graph and patches the labels.
    ///
    /// Precondition: `a != b` and the edge is not present; the caller must
    /// validate, the behavior is unspecified otherwise. Requires a merged
    /// index.
    pub fn insert_edge(&mut self, a: u32, b: u32) -> IncStats {
        debug_assert!(self.is_merged(), "updates require a merged index");
        debug_assert_ne!(a, b);
        debug_assert!(!self.graph.has_edge(a, b));

        self.graph.insert_edge(a, b);

        // snapshot both label lists, merged by rank and tagged by side,
        // before any patch runs
        let la = &self.cl[a as usize];
        let lb = &self.cl[b as usize];
        let mut seeds = Vec::with_capacity(la.len() + lb.len());
        let (mut pa, mut pb) = (0, 0);
        while pa < la.len() && pb < lb.len() {
            let ra = self.rank_of(la[pa].hub());
            let rb = self.rank_of(lb[pb].hub());
            if ra <= rb {
                seeds.push((la[pa], false));
                pa += 1;
            }
            if rb <= ra {
                seeds.push((lb[pb], true));
                pb += 1;
            }
        }
        seeds.extend(la[pa..].iter().map(|&e| (e, false)));
        seeds.extend(lb[pb..].iter().map(|&e| (e, true)));

        let rank_a = self.rank_of(a);
        let rank_b = self.rank_of(b);

        let mut stats = IncStats::default();
        for (entry, from_b) in seeds {
            let hub_rank = self.rank_of(entry.hub());
            if !from_b && hub_rank < rank_b {
                self.inc_bfs(entry.hub(), b, entry.dist() + 1, entry.cnt() as u64, &mut stats);
            } else if from_b && hub_rank < rank_a {
                self.inc_bfs(entry.hub(), a, entry.dist() + 1, entry.cnt() as u64, &mut stats);
            }
        }

        stats
    }

    /// Resumes the pruned BFS of `hub` at `start` with distance `d0` and
    /// count `c0`, renewing or inserting entries along every newly covered
    /// shortest path.
    fn inc_bfs(&mut self, hub: u32, start: u32, d0: u32, c0: u64, stats: &mut IncStats) {
        let node_count = self.node_count() as usize;
        let hub_rank = self.rank_of(hub);

        let mut hub_dists = vec![INF; node_count];
        for entry in &self.cl[hub as usize] {
            hub_dists[entry.hub() as usize] = entry.dist();
        }

        let mut dist = vec![INF; node_count];
        let mut cnt = vec![0_u64; node_count];
        dist[start as usize] = d0;
        cnt[start as usize] = c0;

        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            let (previous, pos) =
                joint_distance_upto(&self.rank, &hub_dists, &self.cl[v as usize], hub_rank);

            if dist[v as usize] > previous {
                continue;
            }

            let mut new_cnt = cnt[v as usize];
            let existing = self.cl[v as usize].get(pos).copied();
            let existing_at_hub = existing.filter(|e| e.hub() == hub);

            if let Some(entry) = existing_at_hub {
                if dist[v as usize] == previous && previous == entry.dist() {
                    // old and new shortest paths coexist through this hub
                    new_cnt = new_cnt.saturating_add(entry.cnt() as u64);
                }
                if entry.dist() == dist[v as usize] {
                    stats.renewed_counts += 1;
                } else {
                    stats.renewed_dists += 1;
                }
                self.cl[v as usize][pos] = LabelEntry::new(hub, dist[v as usize], sat(new_cnt));
            } else {
                self.cl[v as usize]
                    .insert(pos, LabelEntry::new(hub, dist[v as usize], sat(new_cnt)));
                stats.inserted += 1;
            }

            for &w in self.graph.neighbors(v) {
                if self.rank[w as usize] <= hub_rank {
                    continue;
                }
                if dist[w as usize] == INF {
                    dist[w as usize] = dist[v as usize] + 1;
                    cnt[w as usize] = cnt[v as usize];
                    queue.push_back(w);
                } else if dist[w as usize] == dist[v as usize] + 1 {
                    cnt[w as usize] = cnt[w as usize].saturating_add(cnt[v as usize]);
                }
            }
        }
    }

    /// Removes the edge `(a, b)` from the graph and patches the labels.
    ///
    /// Precondition: the edge is present; the caller must validate.
    /// Requires a merged index.
    pub fn remove_edge(&mut self, a: u32, b: u32) -> DecStats {
        debug_assert!(self.is_merged(), "updates require a merged index");
        debug_assert!(self.graph.has_edge(a, b));

        let node_count = self.node_count() as usize;

        let mut hubs_a = bitvec![0; node_count];
        for entry in &self.cl[a as usize] {
            hubs_a.set(entry.hub() as usize, true);
        }
        let mut hubs_b = bitvec![0; node_count];
        for entry in &self.cl[b as usize] {
            hubs_b.set(entry.hub() as usize, true);
        }

        // the scans run on the pre-removal graph against pre-removal labels
        let (mut aff_a, rec_a, flags_a) = self.collect_affected(a, b, &hubs_a, &hubs_b);
        let (mut aff_b, rec_b, flags_b) = self.collect_affected(b, a, &hubs_a, &hubs_b);

        let mut stats = DecStats {
            affected_a: aff_a.len(),
            affected_b: aff_b.len(),
            receivers_a: rec_a.len(),
            receivers_b: rec_b.len(),
            ..DecStats::default()
        };

        // isolated-vertex fast path: the deleted edge was the only one of
        // the lower-priority endpoint
        if rec_a.is_empty() && rec_b.is_empty() {
            if aff_a.len() == 1 && self.graph.degree(a) == 1 {
                if self.rank_of(a) > self.rank_of(b) {
                    self.graph.remove_edge(a, b);
                    stats.removed = (self.cl[a as usize].len() - 1) as u32;
                    self.cl[a as usize] = vec![LabelEntry::new(a, 0, 1)];
                    stats.isolated = true;
                    return stats;
                }
            } else if aff_b.len() == 1 && self.graph.degree(b) == 1 {
                if self.rank_of(b) > self.rank_of(a) {
                    self.graph.remove_edge(a, b);
                    stats.removed = (self.cl[b as usize].len() - 1) as u32;
                    self.cl[b as usize] = vec![LabelEntry::new(b, 0, 1)];
                    stats.isolated = true;
                    return stats;
                }
            }
        }

        self.graph.remove_edge(a, b);

        aff_a.sort_unstable();
        aff_b.sort_unstable();

        // walk both affected sets in ascending rank; each affected hub on
        // one side is patched against the other side's sets
        let (mut ai, mut bi) = (0, 0);
        while ai < aff_a.len() || bi < aff_b.len() {
            let from_a = bi == aff_b.len() || (ai < aff_a.len() && aff_a[ai] < aff_b[bi]);
            let hub_rank = if from_a { aff_a[ai] } else { aff_b[bi] };
            let hub = self.order[hub_rank as usize];
            let is_shared = hubs_a[hub as usize] && hubs_b[hub as usize];

            if from_a {
                self.update_hub(hub, &flags_b, &aff_b, &rec_b, is_shared, &mut stats);
                ai += 1;
            } else {
                self.update_hub(hub, &flags_a, &aff_a, &rec_a, is_shared, &mut stats);
                bi += 1;
            }
        }

        stats
    }

    /// BFS from `source` classifying every vertex whose shortest paths to
    /// `other` run over the edge `(source, other)`.
    ///
    /// A vertex is a *receiver* when the labeled count to `other` exceeds
    /// its BFS count and it is not a shared hub of both endpoints: its only
    /// stake in the edge is a count contribution it received through some
    /// other hub. Everything else on such a path is *affected* (sender and
    /// receiver at once). Returns the affected ranks, the receiver vertex
    /// ids, and a per-rank flag array (1 affected, -1 receiver, 0 neither).
    fn collect_affected(
        &self,
        source: u32,
        other: u32,
        hubs_a: &BitSlice,
        hubs_b: &BitSlice,
    ) -> (Vec<u32>, Vec<u32>, Vec<i8>) {
        let node_count = self.node_count() as usize;

        let mut flags = vec![0_i8; node_count];
        let mut affected = Vec::new();
        let mut receivers = Vec::new();

        let mut dist = vec![INF; node_count];
        let mut cnt = vec![0_u64; node_count];
        dist[source as usize] = 0;
        cnt[source as usize] = 1;

        let mut queue = VecDeque::from([source]);

        while let Some(u) = queue.pop_front() {
            let (labeled_d, labeled_c) = self.count_pair(u, other);
            if dist[u as usize] + 1 != labeled_d {
                continue;
            }

            let u_idx = u as usize;
            if cnt[u_idx] < labeled_c && (!hubs_a[u_idx] || !hubs_b[u_idx]) {
                flags[self.rank_of(u) as usize] = -1;
                receivers.push(u);
            } else {
                flags[self.rank_of(u) as usize] = 1;
                affected.push(self.rank_of(u));
            }

            for &w in self.graph.neighbors(u) {
                if dist[w as usize] == INF {
                    dist[w as usize] = dist[u as usize] + 1;
                    cnt[w as usize] = cnt[u as usize];
                    queue.push_back(w);
                } else if dist[w as usize] == dist[u as usize] + 1 {
                    cnt[w as usize] = cnt[w as usize].saturating_add(cnt[u as usize]);
                }
            }
        }

        (affected, receivers, flags)
    }

    /// Re-runs the pruned BFS of one affected hub on the post-removal graph
    /// and reconciles the labels of every vertex it still covers. When the
    /// hub is shared by both endpoints, entries at vertices the BFS no
    /// longer reaches on a shortest path are dropped.
    fn update_hub(
        &mut self,
        hub: u32,
        other_flags: &[i8],
        other_affected: &[u32],
        other_receivers: &[u32],
        is_shared: bool,
        stats: &mut DecStats,
    ) {
        let node_count = self.node_count() as usize;
        let hub_rank = self.rank_of(hub);

        let mut updated = bitvec![0; node_count];
        let mut dist = vec![INF; node_count];
        let mut cnt = vec![0_u64; node_count];
        dist[hub as usize] = 0;
        cnt[hub as usize] = 1;

        let mut queue = VecDeque::from([hub]);

        while let Some(v) = queue.pop_front() {
            if v != hub {
                if other_flags[self.rank_of(v) as usize] == 0 {
                    if self.query_distance(hub, v) < dist[v as usize] {
                        continue;
                    }
                } else {
                    let (d_over, _c_over, d_h, c_h, pos) = self.query_search(hub, v);

                    if dist[v as usize] > d_over {
                        continue;
                    }

                    let stored = sat(cnt[v as usize]);
                    if d_h == INF {
                        self.cl[v as usize]
                            .insert(pos, LabelEntry::new(hub, dist[v as usize], stored));
                        stats.inserted += 1;
                        updated.set(v as usize, true);
                    } else if d_h != dist[v as usize] || c_h != stored as u64 {
                        if d_h == dist[v as usize] {
                            stats.renewed_counts += 1;
                        } else {
                            stats.renewed_dists += 1;
                        }
                        self.cl[v as usize][pos] = LabelEntry::new(hub, dist[v as usize], stored);
                        updated.set(v as usize, true);
                    } else {
                        updated.set(v as usize, true);
                    }
                }
            }

            for &w in self.graph.neighbors(v) {
                if self.rank[w as usize] <= hub_rank {
                    continue;
                }
                if dist[w as usize] == INF {
                    dist[w as usize] = dist[v as usize] + 1;
                    cnt[w as usize] = cnt[v as usize];
                    queue.push_back(w);
                } else if dist[w as usize] == dist[v as usize] + 1 {
                    cnt[w as usize] = cnt[w as usize].saturating_add(cnt[v as usize]);
                }
            }
        }

        if is_shared {
            // entries at this hub may have become spurious for vertices the
            // BFS did not touch
            for &aff_rank in other_affected {
                if aff_rank <= hub_rank {
                    continue;
                }
                let v = self.order[aff_rank as usize];
                if !updated[v as usize] && remove_hub_entry(&mut self.cl[v as usize], hub) {
                    stats.removed += 1;
                    updated.set(v as usize, true);
                }
            }
            for &v in other_receivers {
                if self.rank_of(v) <= hub_rank {
                    continue;
                }
                if !updated[v as usize] && remove_hub_entry(&mut self.cl[v as usize], hub) {
                    stats.removed += 1;
                    updated.set(v as usize, true);
                }
            }
        }
    }
}

/// Scans `labels` up to (and including) the entry ranked `hub_rank`,
/// returning the best joint distance via `hub_dists` and the position of
/// the first entry ranked at or above `hub_rank`: the slot of the hub's
/// own entry, or its insertion position (possibly `labels.len()`).
fn joint_distance_upto(
    rank: &[u32],
    hub_dists: &[u32],
    labels: &[LabelEntry],
    hub_rank: u32,
) -> (u32, usize) {
    let mut d = INF;
    let mut pos = 0;
    while pos < labels.len() {
        let entry = labels[pos];
        let entry_rank = rank[entry.hub() as usize];
        if entry_rank > hub_rank {
            break;
        }
        let via_hub = hub_dists[entry.hub() as usize];
        if via_hub == INF {
            pos += 1;
            continue;
        }
        d = d.min(via_hub + entry.dist());
        if entry_rank == hub_rank {
            break;
        }
        pos += 1;
    }
    (d, pos)
}

fn remove_hub_entry(labels: &mut Vec<LabelEntry>, hub: u32) -> bool {
    if let Some(i) = labels.iter().position(|e| e.hub() == hub) {
        labels.remove(i);
        true
    } else {
        false
    }
}
