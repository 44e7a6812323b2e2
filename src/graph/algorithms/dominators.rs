//! Dominator tree computation using the Lengauer-Tarjan algorithm.
//!
//! A node `d` **dominates** a node `n` if every path from the entry to `n`
//! passes through `d`. The **immediate dominator** of `n` is its closest
//! strict dominator; making each node a child of its immediate dominator
//! yields the dominator tree, with the entry as root.
//!
//! Dominator trees and the **dominance frontiers** derived from them are
//! the backbone of SSA construction (phi placement), loop detection, and
//! control-dependence analysis.
//!
//! # Algorithm
//!
//! [`compute_dominators`] runs Lengauer-Tarjan with path compression over
//! the depth-first spanning tree of the graph:
//!
//! 1. Number the nodes in DFS pre-order ([`DfsTree`]).
//! 2. Walking the nodes in reverse pre-order, compute each node's
//!    semidominator from its predecessors, deferring through an ancestor
//!    forest with path compression.
//! 3. Resolve each node against its semidominator's bucket: either the
//!    immediate dominator is known immediately, or the node is marked as
//!    sharing its dominator with an ancestor (`samedom`) and resolved in a
//!    final forward pass.
//!
//! Time complexity is O(V α(V)); the construction scratch (`semi`,
//! `ancestor`, `best`, `samedom`, `bucket`) lives in parallel tables that
//! are dropped when construction finishes.
//!
//! Nodes unreachable from the entry receive no immediate dominator;
//! [`DominatorTree::is_reachable`] distinguishes them, and every query
//! involving them answers `None`/`false`.

use rustc_hash::FxHashSet;

use crate::graph::{
    algorithms::traversal::DfsTree, NodeId, Predecessors, RootedGraph, Successors,
};

/// Pre-order rank sentinel for nodes outside the spanning tree.
const UNREACHED: usize = usize::MAX;

/// Result of dominator tree computation.
///
/// Stores the immediate dominator of every reachable node. Each node
/// except the entry has exactly one immediate dominator; the entry (and
/// any unreachable node) has none.
///
/// # Examples
///
/// ```rust
/// use liftir::graph::{algorithms::compute_dominators, DirectedGraph};
///
/// // entry -> a -> b
/// let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
/// let entry = graph.add_node("entry");
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// graph.add_edge(entry, a, ())?;
/// graph.add_edge(a, b, ())?;
///
/// let doms = compute_dominators(&graph, entry);
/// assert_eq!(doms.immediate_dominator(b), Some(a));
/// assert!(doms.dominates(entry, b));
/// # Ok::<(), liftir::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DominatorTree {
    /// The entry (root) node of the dominator tree
    entry: NodeId,
    /// Immediate dominator per node; `None` for the entry and for nodes
    /// unreachable from it
    idom: Vec<Option<NodeId>>,
    /// Whether the node was reached by the spanning-tree traversal
    reachable: Vec<bool>,
}

impl DominatorTree {
    /// Returns the entry (root) node of the dominator tree.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Returns the number of nodes the tree was computed over.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.idom.len()
    }

    /// Returns `true` if the node is reachable from the entry.
    ///
    /// Dominance is only defined for reachable nodes; every query below
    /// answers `None`/`false` for unreachable ones.
    #[must_use]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.reachable.get(node.index()).copied().unwrap_or(false)
    }

    /// Returns the immediate dominator of a node.
    ///
    /// `None` for the entry node and for nodes unreachable from the entry.
    #[must_use]
    pub fn immediate_dominator(&self, node: NodeId) -> Option<NodeId> {
        self.idom.get(node.index()).copied().flatten()
    }

    /// Checks whether `a` dominates `b`.
    ///
    /// Every reachable node dominates itself; the entry dominates every
    /// reachable node. Implemented as an iterative climb along the
    /// immediate-dominator chain, so deep graphs cannot overflow the
    /// stack.
    ///
    /// # Complexity
    ///
    /// O(depth of `b` in the dominator tree).
    #[must_use]
    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        if !self.is_reachable(a) || !self.is_reachable(b) {
            return false;
        }
        if a == b {
            return true;
        }

        let mut current = b;
        while let Some(idom) = self.idom[current.index()] {
            if idom == a {
                return true;
            }
            current = idom;
        }
        false
    }

    /// Checks whether `a` strictly dominates `b` (dominates and `a != b`).
    #[inline]
    #[must_use]
    pub fn strictly_dominates(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Returns an iterator over all dominators of a node, from the node
    /// itself up to and including the entry.
    pub fn dominators(&self, node: NodeId) -> DominatorIterator<'_> {
        DominatorIterator {
            tree: self,
            current: self.is_reachable(node).then_some(node),
        }
    }

    /// Returns the depth of a node in the dominator tree.
    ///
    /// The entry has depth 0. Unreachable nodes report 0 as well; check
    /// [`is_reachable`](Self::is_reachable) first when that matters.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(idom) = self.immediate_dominator(current) {
            current = idom;
            depth += 1;
        }
        depth
    }

    /// Returns the children of a node in the dominator tree, in ascending
    /// node order.
    ///
    /// Children are the nodes whose immediate dominator is `node`.
    ///
    /// # Complexity
    ///
    /// O(V).
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        for (i, idom) in self.idom.iter().enumerate() {
            if *idom == Some(node) {
                result.push(NodeId::new(i));
            }
        }
        result
    }

    /// Returns the dominator-tree edges as `(idom, node)` pairs, in
    /// ascending node order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.idom
            .iter()
            .enumerate()
            .filter_map(|(i, idom)| idom.map(|d| (d, NodeId::new(i))))
    }
}

/// Iterator over the dominators of a node, from the node up to the entry.
pub struct DominatorIterator<'a> {
    tree: &'a DominatorTree,
    current: Option<NodeId>,
}

impl Iterator for DominatorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.immediate_dominator(current);
        Some(current)
    }
}

/// Computes the dominator tree for a graph rooted at `entry` using the
/// Lengauer-Tarjan algorithm.
///
/// # Arguments
///
/// * `graph` - The graph to analyze; successor and predecessor order must
///   be stable, and the result is deterministic given that order
/// * `entry` - The root every dominance relation is relative to
///
/// # Returns
///
/// A [`DominatorTree`] answering dominance queries for every node
/// reachable from `entry`.
///
/// # Panics
///
/// Panics if `entry` is out of range for a non-empty graph.
///
/// # Complexity
///
/// O(V α(V)) time, O(V) space.
#[must_use]
pub fn compute_dominators<G>(graph: &G, entry: NodeId) -> DominatorTree
where
    G: Successors + Predecessors,
{
    let node_count = graph.node_count();
    if node_count == 0 {
        return DominatorTree {
            entry,
            idom: Vec::new(),
            reachable: Vec::new(),
        };
    }

    let tree = DfsTree::build(graph, entry);
    let reachable = (0..node_count)
        .map(|i| tree.is_reachable(NodeId::new(i)))
        .collect();
    let idom = LengauerTarjan::new(&tree, node_count).compute(graph);

    DominatorTree {
        entry,
        idom,
        reachable,
    }
}

/// Convenience wrapper computing dominators for a [`RootedGraph`].
///
/// Equivalent to `compute_dominators(graph, graph.entry())`.
#[must_use]
pub fn compute_dominators_rooted<G>(graph: &G) -> DominatorTree
where
    G: RootedGraph,
{
    compute_dominators(graph, graph.entry())
}

/// Construction scratch for the Lengauer-Tarjan algorithm.
///
/// All per-node working state lives in these parallel vectors and is
/// dropped once [`compute`](Self::compute) returns the idom table.
struct LengauerTarjan<'t> {
    /// The depth-first spanning tree driving the numbering
    tree: &'t DfsTree,
    /// Pre-order rank per node, `UNREACHED` outside the tree
    dfnum: Vec<usize>,
    /// Semidominator per node, initialized to the node itself
    semi: Vec<NodeId>,
    /// Forest link for `eval`; `None` until the node is linked
    ancestor: Vec<Option<NodeId>>,
    /// Node with the lowest-ranked semidominator on the compressed path
    best: Vec<NodeId>,
    /// Deferred resolution: this node shares its idom with another
    samedom: Vec<Option<NodeId>>,
    /// Nodes whose semidominator is this node
    bucket: Vec<Vec<NodeId>>,
    /// Immediate dominators being assembled
    idom: Vec<Option<NodeId>>,
}

impl<'t> LengauerTarjan<'t> {
    fn new(tree: &'t DfsTree, node_count: usize) -> Self {
        let mut dfnum = vec![UNREACHED; node_count];
        for (rank, node) in tree.nodes().enumerate() {
            dfnum[node.index()] = rank;
        }

        LengauerTarjan {
            tree,
            dfnum,
            semi: (0..node_count).map(NodeId::new).collect(),
            ancestor: vec![None; node_count],
            best: (0..node_count).map(NodeId::new).collect(),
            samedom: vec![None; node_count],
            bucket: vec![Vec::new(); node_count],
            idom: vec![None; node_count],
        }
    }

    fn compute<G: Predecessors>(mut self, graph: &G) -> Vec<Option<NodeId>> {
        let order: Vec<NodeId> = self.tree.nodes().collect();

        // Semidominator pass: reverse pre-order, entry excluded.
        for &n in order.iter().skip(1).rev() {
            // The entry is the only reachable node without a parent, and
            // it is excluded above.
            let Some(parent) = self.tree.parent(n) else {
                continue;
            };

            let mut s = parent;
            let preds: Vec<NodeId> = graph.predecessors(n).collect();
            for v in preds {
                if self.dfnum[v.index()] == UNREACHED {
                    continue;
                }
                let s_tag = if self.dfnum[v.index()] <= self.dfnum[n.index()] {
                    v
                } else {
                    let y = self.eval(v);
                    self.semi[y.index()]
                };
                if self.dfnum[s_tag.index()] < self.dfnum[s.index()] {
                    s = s_tag;
                }
            }

            self.semi[n.index()] = s;
            self.bucket[s.index()].push(n);

            // Link n under its spanning-tree parent.
            self.ancestor[n.index()] = Some(parent);
            self.best[n.index()] = n;

            // Resolve the nodes whose semidominator is the parent: their
            // dominator is either the parent itself or deferred to an
            // ancestor with a lower-ranked semidominator.
            for v in std::mem::take(&mut self.bucket[parent.index()]) {
                let y = self.eval(v);
                if self.semi[y.index()] == self.semi[v.index()] {
                    self.idom[v.index()] = Some(parent);
                } else {
                    self.samedom[v.index()] = Some(y);
                }
            }
        }

        // Deferred pass: forward pre-order fills in shared dominators.
        for &n in order.iter().skip(1) {
            if let Some(shared) = self.samedom[n.index()] {
                self.idom[n.index()] = self.idom[shared.index()];
            }
        }

        self.idom
    }

    /// Returns the linked ancestor of `v` whose semidominator has the
    /// lowest pre-order rank, compressing the path on the way.
    fn eval(&mut self, v: NodeId) -> NodeId {
        if self.ancestor[v.index()].is_none() {
            return v;
        }
        self.compress(v);
        self.best[v.index()]
    }

    /// Path compression: collect the ancestor chain of `v`, then fold the
    /// `best` values back down from the top. Iterative so the forest
    /// depth is not bounded by the call stack.
    fn compress(&mut self, v: NodeId) {
        let mut path = Vec::new();
        let mut u = v;
        while let Some(a) = self.ancestor[u.index()] {
            if self.ancestor[a.index()].is_none() {
                break;
            }
            path.push(u);
            u = a;
        }

        for &w in path.iter().rev() {
            let Some(a) = self.ancestor[w.index()] else {
                continue;
            };
            let best_a = self.best[a.index()];
            let best_w = self.best[w.index()];
            if self.dfnum[self.semi[best_a.index()].index()]
                < self.dfnum[self.semi[best_w.index()].index()]
            {
                self.best[w.index()] = best_a;
            }
            self.ancestor[w.index()] = self.ancestor[a.index()];
        }
    }
}

/// Lazily-computed, memoized dominance frontiers.
///
/// The dominance frontier of `n` is the set of nodes `w` where `n`'s
/// dominance ends: `n` dominates a predecessor of `w` but does not
/// strictly dominate `w` itself. Frontiers drive phi placement during SSA
/// construction.
///
/// Each frontier is computed on first request via the classic two-part
/// recurrence and cached in a per-node table:
///
/// - **DF-local**: CFG successors of `n` whose immediate dominator is not
///   `n`
/// - **DF-up**: entries of the frontiers of `n`'s dominator-tree children
///   that `n` does not strictly dominate
///
/// Requesting the frontier of a node therefore computes (and caches) the
/// frontiers of its entire dominator subtree. Use
/// [`compute_dominance_frontiers`] when all frontiers are wanted anyway.
///
/// # Examples
///
/// ```rust
/// use liftir::graph::{
///     algorithms::{compute_dominators, DominanceFrontiers},
///     DirectedGraph,
/// };
///
/// // Diamond: the frontier of each branch arm is the join block.
/// let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
/// let entry = graph.add_node("entry");
/// let left = graph.add_node("left");
/// let right = graph.add_node("right");
/// let join = graph.add_node("join");
/// graph.add_edge(entry, left, ())?;
/// graph.add_edge(entry, right, ())?;
/// graph.add_edge(left, join, ())?;
/// graph.add_edge(right, join, ())?;
///
/// let doms = compute_dominators(&graph, entry);
/// let mut frontiers = DominanceFrontiers::new(&graph, &doms);
/// assert!(frontiers.frontier(left).contains(&join));
/// assert!(frontiers.frontier(entry).is_empty());
/// # Ok::<(), liftir::Error>(())
/// ```
pub struct DominanceFrontiers<'a, G> {
    /// The control flow graph the frontiers refer to
    graph: &'a G,
    /// The precomputed dominator tree
    tree: &'a DominatorTree,
    /// Memoized frontier per node; `None` until first requested
    cache: Vec<Option<FxHashSet<NodeId>>>,
    /// Dominator-tree children per node
    children: Vec<Vec<NodeId>>,
}

impl<'a, G: Successors> DominanceFrontiers<'a, G> {
    /// Creates a frontier table over `graph` and its dominator tree.
    ///
    /// No frontiers are computed yet; they materialize on demand.
    #[must_use]
    pub fn new(graph: &'a G, tree: &'a DominatorTree) -> Self {
        let node_count = graph.node_count();
        let mut children = vec![Vec::new(); node_count];
        for i in 0..node_count {
            let node = NodeId::new(i);
            if let Some(idom) = tree.immediate_dominator(node) {
                children[idom.index()].push(node);
            }
        }

        DominanceFrontiers {
            graph,
            tree,
            cache: vec![None; node_count],
            children,
        }
    }

    /// Returns the dominance frontier of `node`, computing and memoizing
    /// it on first use.
    ///
    /// Unreachable nodes have an empty frontier.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node of the underlying graph.
    pub fn frontier(&mut self, node: NodeId) -> &FxHashSet<NodeId> {
        self.ensure(node);
        self.cache[node.index()].get_or_insert_with(FxHashSet::default)
    }

    /// Consumes the table, returning every frontier indexed by node.
    #[must_use]
    pub fn into_all(mut self) -> Vec<FxHashSet<NodeId>> {
        for i in 0..self.cache.len() {
            self.ensure(NodeId::new(i));
        }
        self.cache
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }

    /// Fills the cache for `node` and any uncached dominator-tree
    /// descendants, children first.
    fn ensure(&mut self, node: NodeId) {
        if self.cache[node.index()].is_some() {
            return;
        }
        if !self.tree.is_reachable(node) {
            self.cache[node.index()] = Some(FxHashSet::default());
            return;
        }

        // Post-order over the dominator subtree: child frontiers are
        // ready before the parent's DF-up step consumes them.
        let mut stack = vec![(node, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                let frontier = self.compute_frontier(current);
                self.cache[current.index()] = Some(frontier);
            } else if self.cache[current.index()].is_none() {
                stack.push((current, true));
                for &child in &self.children[current.index()] {
                    if self.cache[child.index()].is_none() {
                        stack.push((child, false));
                    }
                }
            }
        }
    }

    /// Computes the frontier of `node`, assuming the frontiers of its
    /// dominator-tree children are already cached.
    fn compute_frontier(&self, node: NodeId) -> FxHashSet<NodeId> {
        let mut frontier = FxHashSet::default();

        // DF-local: successors this node does not immediately dominate.
        for succ in self.graph.successors(node) {
            if self.tree.immediate_dominator(succ) != Some(node) {
                frontier.insert(succ);
            }
        }

        // DF-up: frontier entries of the children that escape this node's
        // dominance (a node is in its own frontier when a back edge loops
        // onto it).
        for &child in &self.children[node.index()] {
            if let Some(child_frontier) = &self.cache[child.index()] {
                for &w in child_frontier {
                    if !self.tree.dominates(node, w) || node == w {
                        frontier.insert(w);
                    }
                }
            }
        }

        frontier
    }
}

/// Computes the dominance frontier of every node at once.
///
/// # Arguments
///
/// * `graph` - The control flow graph
/// * `tree` - The precomputed dominator tree
///
/// # Returns
///
/// A vector where `result[i]` is the dominance frontier of node `i`.
/// Unreachable nodes have empty frontiers.
///
/// # Complexity
///
/// O(V + E + total frontier size).
#[must_use]
pub fn compute_dominance_frontiers<G>(graph: &G, tree: &DominatorTree) -> Vec<FxHashSet<NodeId>>
where
    G: Successors,
{
    DominanceFrontiers::new(graph, tree).into_all()
}
