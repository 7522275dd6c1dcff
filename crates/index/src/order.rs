use std::cmp::Reverse;
use std::convert::Infallible;
use std::str::FromStr;

use rayon::prelude::*;

use crate::{Error, UndirectedGraph};

/// Vertex ordering schemes. The order decides hub priority: position 0 is
/// the most central vertex and every label list is sorted by it.
///
/// `Invalid` is the unset placeholder and fails at ordering time; further
/// schemes (e.g. betweenness) slot in as new variants of the match in
/// [`compute_order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderScheme {
    /// Degree descending, ties broken by ascending vertex id.
    Degree,
    Invalid,
}

impl FromStr for OrderScheme {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "degree" => OrderScheme::Degree,
            _ => OrderScheme::Invalid,
        })
    }
}

/// Computes the total vertex order for `scheme` as a permutation of
/// `0..node_count`.
pub fn compute_order(scheme: OrderScheme, graph: &UndirectedGraph) -> Result<Vec<u32>, Error> {
    match scheme {
        OrderScheme::Degree => Ok(degree_order(graph)),
        OrderScheme::Invalid => Err(Error::InvalidOrderScheme),
    }
}

/// Inverts a permutation: `rank[v]` is the position of `v` in `order`.
pub fn rank_from_order(order: &[u32]) -> Vec<u32> {
    let mut rank = vec![0; order.len()];
    for (i, &v) in order.iter().enumerate() {
        rank[v as usize] = i as u32;
    }
    rank
}

fn degree_order(graph: &UndirectedGraph) -> Vec<u32> {
    let mut order = (0..graph.node_count()).collect::<Vec<_>>();
    // total key, so the unstable sort is still deterministic
    order.par_sort_unstable_by_key(|&v| (Reverse(graph.degree(v)), v));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_descending_with_stable_ties() {
        let graph = UndirectedGraph::from_edges(
            5,
            vec![(0, 1), (1, 2), (1, 3), (2, 3), (3, 4), (2, 4)],
        )
        .unwrap();

        // degrees: 0 -> 1, 1 -> 3, 2 -> 3, 3 -> 3, 4 -> 2
        let order = compute_order(OrderScheme::Degree, &graph).unwrap();
        assert_eq!(order, vec![1, 2, 3, 4, 0]);

        let rank = rank_from_order(&order);
        assert_eq!(rank, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn invalid_scheme_is_fatal() {
        let graph = UndirectedGraph::from_edges(2, vec![(0, 1)]).unwrap();
        assert!(matches!(
            compute_order(OrderScheme::Invalid, &graph),
            Err(Error::InvalidOrderScheme)
        ));
    }

    #[test]
    fn scheme_parsing() {
        assert_eq!("degree".parse::<OrderScheme>(), Ok(OrderScheme::Degree));
        assert_eq!("between".parse::<OrderScheme>(), Ok(OrderScheme::Invalid));
    }
}
