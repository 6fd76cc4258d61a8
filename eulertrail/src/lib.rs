//! Heaviest trails in undirected weighted multigraphs.
//!
//! A trail from `s` to `t` uses every edge at most once. The heaviest one is
//! found by making every degree even (counting a virtual `s`-`t` edge) at
//! minimum cost: odd nodes are paired by a minimum-cost perfect matching over
//! shortest-path distances, the paths between partners are removed, and the
//! remaining edges around `s` form the trail.
//!
//! ```
//! use eulertrail::{parse_edge_list, CostPolicy, NodeId, TrailSolver};
//!
//! let graph = parse_edge_list("0/1@1\n1/2@1\n2/0@1\n", CostPolicy::Strength);
//! let mut solver = TrailSolver::new(&graph);
//! assert_eq!(solver.longest_trail_to(NodeId(0), NodeId(1)).unwrap(), Some(2));
//! assert_eq!(solver.longest_trail(NodeId(0)).unwrap(), 3);
//! ```

mod assemble;
mod brute;
mod edgelist;
mod error;
mod exposure;
mod graph;
mod pairing;
mod shortest_path;

pub use crate::assemble::{component_weight, mark_path, Assembly, TrailSolver};
pub use crate::brute::{longest_trail_brute, longest_trails_brute};
pub use crate::edgelist::{
    parse_edge_line, parse_edge_list, read_edge_list, CostPolicy, EdgeLine, MAX_TOTAL_COST,
};
pub use crate::error::{Error, Result};
pub use crate::exposure::{exposed_nodes, ExposedSet};
pub use crate::graph::{EdgeId, EdgeMarks, EdgeRecord, Graph, Node, NodeId};
pub use crate::pairing::{match_exposed, Matching};
pub use crate::shortest_path::{shortest_paths, Hop, Hops, Path, PathCache, PathTree};

/// Edge and trail weights. Edge costs are never negative.
pub type Cost = i64;
