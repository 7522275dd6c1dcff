pub use crate::bfs::bi_bfs_count;
pub use crate::build::IndexBuilder;
pub use crate::graph::UndirectedGraph;
pub use crate::index::SpcIndex;
pub use crate::input::{read_graph, read_queries, read_updates, EdgeUpdate};
pub use crate::label::{LabelEntry, D_MAX, UB_C};
pub use crate::order::{compute_order, rank_from_order, OrderScheme};
pub use crate::update::{DecStats, IncStats};

pub use crate::Error;
