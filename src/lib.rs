//! Prize-Collecting Steiner Tree ("PCST") solver in Rust. Generic over floating point numeric
//! types.
//!
//! Given a weighted undirected graph with a prize on every node, the PCST problem asks for a
//! connected subtree maximising the prizes collected minus the cost of the edges used. This crate
//! computes a good approximate answer in two steps:
//!  1. A primal-dual growth phase (Goemans-Williamson clustering). Every node starts as a cluster
//!     growing a "moat" at unit rate. A cluster stops growing once its moat has paid for its
//!     prize, and two clusters merge once their moats cover an edge between them. Growth ends
//!     when at most one cluster still grows; its merge edges form the candidate tree; and
//!  2. Strong pruning, a leaf-peeling dynamic program over the candidate tree that cuts off
//!     every subtree whose prizes do not pay for the edge connecting it, and keeps the best
//!     rooted subtree.
//!
//! Both steps are single threaded and can be cancelled cooperatively through a
//! [`TerminationFlag`].
//!
//! # Examples
//! ```
//!use pcst::{Graph, ParentLink, Pcst, PRUNED, ROOT};
//!
//!let graph = Graph::from_edges(4, &[(0, 1, 100.0), (1, 2, 10.0), (2, 3, 100.0)]);
//!let prizes = [20.0, 20.0, 20.0, 20.0];
//!let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
//!let tree = pcst.compute().unwrap();
//!assert_eq!(tree.parent_array(), &[PRUNED, 2, ROOT, PRUNED]);
//!assert_eq!(ParentLink::Node(2), tree.parent(1));
//!assert_eq!(30.0, tree.net_value());
//! ```
//!
//! # References
//! * Goemans, M.X.; Williamson, D.P. A General Approximation Technique for Constrained Forest
//!   Problems. SIAM Journal on Computing, 1995.
//! * Johnson, D.S.; Minkoff, M.; Phillips, S. The Prize Collecting Steiner Tree Problem: Theory
//!   and Practice. SODA 2000.

pub use crate::data_wrappers::GrowthResult;
pub use crate::error::PcstError;
pub use crate::graph::{AdjacencyView, Graph};
pub use crate::growth::GrowthPhase;
pub use crate::parameters::{PcstParams, PcstParamsBuilder};
pub use crate::pcst::Pcst;
pub use crate::steiner_tree::{ParentLink, PrizeSteinerTree, PRUNED, ROOT};
pub use crate::termination::{RunningTrue, TerminationFlag};

mod cluster_activity;
mod cluster_events;
mod cluster_structure;
mod data_wrappers;
mod edge_events;
mod error;
mod graph;
mod growth;
mod indexed_heap;
mod pairing_heap;
mod parameters;
mod pcst;
mod steiner_tree;
mod strong_pruning;
mod termination;
mod tree_producer;
mod validation;
