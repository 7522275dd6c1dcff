//! A dynamic 2-hop labeling index answering shortest-path *count* queries
//! on large undirected simple graphs.
//!
//! For a vertex pair `(s, t)` the index returns `(d, c)`: the shortest-path
//! distance and the number of distinct shortest paths of that length. Each
//! vertex carries a list of label entries `(hub, dist, cnt)` sorted by hub
//! priority; a query is a single merge-join over the two lists, so it runs
//! in time linear in the label sizes no matter how large the graph is.
//!
//! The index is built once by a pruned breadth-first traversal from every
//! vertex and can afterwards be kept current under single-edge insertions
//! and deletions without a rebuild.
//!
//! # Example
//!
//! ```
//! use spc_index::prelude::*;
//!
//! // a 4-cycle: two shortest paths between opposite corners
//! let graph = UndirectedGraph::from_edges(4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//!
//! let mut index = IndexBuilder::new()
//!     .order_scheme(OrderScheme::Degree)
//!     .build(graph)
//!     .unwrap();
//! index.merge();
//!
//! assert_eq!(index.count(0, 2), (2, 2));
//! assert_eq!(index.count(0, 1), (1, 1));
//!
//! // maintain the index under edge updates
//! index.insert_edge(0, 2);
//! assert_eq!(index.count(0, 2), (1, 1));
//! ```
//!
//! Indexes serialize to a compact binary file either before or after
//! [`SpcIndex::merge`]; the reader accepts both shapes. Unreachable pairs
//! answer `(0, 0)`, and path counts saturate at [`UB_C`] instead of
//! overflowing.

pub mod bfs;
pub mod build;
pub mod graph;
pub mod index;
pub mod input;
mod io;
pub mod label;
pub mod order;
mod query;
pub mod update;

pub mod prelude;

pub use crate::build::IndexBuilder;
pub use crate::graph::UndirectedGraph;
pub use crate::index::SpcIndex;
pub use crate::label::{LabelEntry, D_MAX, UB_C};
pub use crate::order::OrderScheme;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("invalid ordering scheme")]
    InvalidOrderScheme,
    #[error("index invariant violated: {message}")]
    InvariantViolation { message: String },
}
