//! Graph algorithms for control-flow analysis.
//!
//! # Available Algorithms
//!
//! ## Traversal
//!
//! - [`dfs`] - Depth-first pre-order traversal
//! - [`postorder`] - Depth-first post-order traversal
//! - [`DfsTree`] - Depth-first spanning tree with pre-order numbering
//!
//! ## Dominator Analysis
//!
//! - [`compute_dominators`] - Lengauer-Tarjan dominator tree
//! - [`DominatorTree`] - Dominance queries over the result
//! - [`DominanceFrontiers`] / [`compute_dominance_frontiers`] - Lazy and
//!   eager dominance frontiers for SSA phi placement
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | DFS / postorder | O(V + E) | Traversal, ordering |
//! | Spanning tree | O(V + E) | Dominator input, reachability |
//! | Dominators | O(V α(V)) | SSA construction, loop analysis |
//! | Frontiers | O(V + E + output) | Phi placement |

mod dominators;
mod traversal;

pub use dominators::{
    compute_dominance_frontiers, compute_dominators, compute_dominators_rooted,
    DominanceFrontiers, DominatorIterator, DominatorTree,
};
pub use traversal::{dfs, postorder, DfsIterator, DfsTree};
