//! Core directed graph implementation.
//!
//! [`DirectedGraph`] is the storage layer under every analysis in this
//! crate. It keeps nodes and edges in insertion order and maintains
//! adjacency lists in both directions, so successor and predecessor
//! enumeration are O(degree) and their order is observable and stable -
//! a property the dominator construction depends on.

use crate::{
    graph::{
        edge::EdgeId,
        node::NodeId,
        traits::{GraphBase, Predecessors, Successors},
    },
    Error, Result,
};

/// Internal storage for edge data and endpoints.
#[derive(Debug, Clone)]
struct EdgeData<E> {
    /// Source node of the edge
    source: NodeId,
    /// Target node of the edge
    target: NodeId,
    /// User-provided edge data
    data: E,
}

/// A directed graph with typed node and edge data.
///
/// The graph supports:
///
/// - Generic node data (`N`) and edge data (`E`)
/// - Multiple edges between the same pair of nodes and self-loops
/// - Forward (successor) and backward (predecessor) adjacency queries in
///   edge-insertion order
///
/// # Memory Layout
///
/// Nodes and edges live in contiguous vectors indexed by [`NodeId`] and
/// [`EdgeId`]; per-node `outgoing`/`incoming` lists hold `EdgeId`
/// references. Node and edge access are O(1).
///
/// # Thread Safety
///
/// `DirectedGraph<N, E>` is [`Send`] and [`Sync`] when `N` and `E` are.
/// Build the graph single-threaded, then share it immutably.
///
/// # Examples
///
/// ```rust
/// use liftir::graph::{DirectedGraph, Successors, Predecessors};
///
/// let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// let c = graph.add_node("C");
///
/// graph.add_edge(a, b, ())?;
/// graph.add_edge(a, c, ())?;
///
/// assert_eq!(graph.successors(a).count(), 2);
/// assert_eq!(graph.predecessors(b).collect::<Vec<_>>(), vec![a]);
/// # Ok::<(), liftir::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, E> {
    /// Node data storage
    nodes: Vec<N>,
    /// Edge data storage
    edges: Vec<EdgeData<E>>,
    /// Outgoing edges per node (adjacency list for successors)
    outgoing: Vec<Vec<EdgeId>>,
    /// Incoming edges per node (adjacency list for predecessors)
    incoming: Vec<Vec<EdgeId>>,
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DirectedGraph<N, E> {
    /// Creates a new empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        DirectedGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Creates a new directed graph with pre-allocated capacity.
    ///
    /// Avoids reallocation during construction when the approximate size
    /// is known in advance.
    #[must_use]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        DirectedGraph {
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
            outgoing: Vec::with_capacity(node_capacity),
            incoming: Vec::with_capacity(node_capacity),
        }
    }

    /// Adds a new node with the given data to the graph.
    ///
    /// Nodes receive sequential [`NodeId`]s starting from 0.
    ///
    /// # Returns
    ///
    /// The `NodeId` assigned to the new node.
    pub fn add_node(&mut self, data: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Returns a reference to the data of the given node, or `None` if
    /// the node does not exist.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node.index())
    }

    /// Returns a mutable reference to the data of the given node, or
    /// `None` if the node does not exist.
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(node.index())
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over all node identifiers, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns an iterator over `(NodeId, &N)` pairs, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, data)| (NodeId::new(i), data))
    }

    /// Adds a directed edge from `source` to `target` with the given data.
    ///
    /// Edges receive sequential [`EdgeId`]s starting from 0; multiple
    /// edges between the same pair of nodes are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either endpoint does not exist in
    /// the graph. Referencing an unknown node is a programming error on
    /// the caller's side; the graph is left unchanged.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, data: E) -> Result<EdgeId> {
        if source.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "source node {} does not exist in graph with {} nodes",
                source,
                self.nodes.len()
            )));
        }
        if target.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "target node {} does not exist in graph with {} nodes",
                target,
                self.nodes.len()
            )));
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(EdgeData {
            source,
            target,
            data,
        });

        self.outgoing[source.index()].push(id);
        self.incoming[target.index()].push(id);

        Ok(id)
    }

    /// Returns a reference to the data of the given edge, or `None` if
    /// the edge does not exist.
    #[must_use]
    pub fn edge(&self, edge: EdgeId) -> Option<&E> {
        self.edges.get(edge.index()).map(|e| &e.data)
    }

    /// Returns a mutable reference to the data of the given edge, or
    /// `None` if the edge does not exist.
    pub fn edge_mut(&mut self, edge: EdgeId) -> Option<&mut E> {
        self.edges.get_mut(edge.index()).map(|e| &mut e.data)
    }

    /// Returns the `(source, target)` endpoints of the given edge, or
    /// `None` if the edge does not exist.
    #[must_use]
    pub fn edge_endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edges.get(edge.index()).map(|e| (e.source, e.target))
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over all edge identifiers, in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Returns an iterator over `(EdgeId, &E)` pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::new(i), &e.data))
    }

    /// Returns an iterator over the successors of the given node, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing[node.index()]
            .iter()
            .map(|&edge_id| self.edges[edge_id.index()].target)
    }

    /// Returns an iterator over the predecessors of the given node, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming[node.index()]
            .iter()
            .map(|&edge_id| self.edges[edge_id.index()].source)
    }

    /// Returns an iterator over `(EdgeId, &E)` for edges leaving the
    /// given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn outgoing_edges(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.outgoing[node.index()]
            .iter()
            .map(|&edge_id| (edge_id, &self.edges[edge_id.index()].data))
    }

    /// Returns an iterator over `(EdgeId, &E)` for edges entering the
    /// given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn incoming_edges(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.incoming[node.index()]
            .iter()
            .map(|&edge_id| (edge_id, &self.edges[edge_id.index()].data))
    }

    /// Returns the out-degree (number of outgoing edges) of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.outgoing[node.index()].len()
    }

    /// Returns the in-degree (number of incoming edges) of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.incoming[node.index()].len()
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over nodes with no incoming edges.
    ///
    /// In a well-formed control flow graph this is the entry block alone.
    pub fn entry_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&node| self.in_degree(node) == 0)
    }

    /// Returns an iterator over nodes with no outgoing edges.
    pub fn exit_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&node| self.out_degree(node) == 0)
    }

    /// Returns `true` if the given node ID refers to a node in this graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Returns `true` if the given edge ID refers to an edge in this graph.
    #[must_use]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        edge.index() < self.edges.len()
    }
}

impl<N, E> GraphBase for DirectedGraph<N, E> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }
}

impl<N, E> Successors for DirectedGraph<N, E> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.outgoing[node.index()]
            .iter()
            .map(|&edge_id| self.edges[edge_id.index()].target)
    }
}

impl<N, E> Predecessors for DirectedGraph<N, E> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.incoming[node.index()]
            .iter()
            .map(|&edge_id| self.edges[edge_id.index()].source)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{
        directed::DirectedGraph,
        edge::EdgeId,
        node::NodeId,
        traits::{GraphBase, Predecessors, Successors},
    };

    /// Creates a diamond graph: A -> B, A -> C, B -> D, C -> D
    fn create_diamond_graph() -> DirectedGraph<&'static str, ()> {
        let mut graph = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        graph.add_edge(a, b, ()).unwrap();
        graph.add_edge(a, c, ()).unwrap();
        graph.add_edge(b, d, ()).unwrap();
        graph.add_edge(c, d, ()).unwrap();
        graph
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph: DirectedGraph<(), ()> = DirectedGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_node_sequential_ids() {
        let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
        assert_eq!(graph.add_node("A"), NodeId::new(0));
        assert_eq!(graph.add_node("B"), NodeId::new(1));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_node_access() {
        let mut graph: DirectedGraph<String, ()> = DirectedGraph::new();
        let a = graph.add_node(String::from("hello"));

        if let Some(data) = graph.node_mut(a) {
            data.push_str(" world");
        }

        assert_eq!(graph.node(a), Some(&String::from("hello world")));
        assert_eq!(graph.node(NodeId::new(999)), None);
    }

    #[test]
    fn test_add_edge() {
        let mut graph: DirectedGraph<&str, &str> = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");

        let edge = graph.add_edge(a, b, "A->B").unwrap();
        assert_eq!(edge, EdgeId::new(0));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge(edge), Some(&"A->B"));
        assert_eq!(graph.edge_endpoints(edge), Some((a, b)));
    }

    #[test]
    fn test_add_edge_invalid_endpoints() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());

        let result = graph.add_edge(NodeId::new(999), a, ());
        assert!(result.unwrap_err().to_string().contains("source node"));

        let result = graph.add_edge(a, NodeId::new(999), ());
        assert!(result.unwrap_err().to_string().contains("target node"));

        // Failed inserts leave the graph untouched.
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_multiple_edges_between_same_nodes() {
        let mut graph: DirectedGraph<&str, i32> = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");

        let e1 = graph.add_edge(a, b, 1).unwrap();
        let e2 = graph.add_edge(a, b, 2).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge(e1), Some(&1));
        assert_eq!(graph.edge(e2), Some(&2));
    }

    #[test]
    fn test_self_loop() {
        let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
        let a = graph.add_node("A");

        let edge = graph.add_edge(a, a, ()).unwrap();
        assert_eq!(graph.edge_endpoints(edge), Some((a, a)));
        assert_eq!(graph.out_degree(a), 1);
        assert_eq!(graph.in_degree(a), 1);
    }

    #[test]
    fn test_successor_order_is_insertion_order() {
        let graph = create_diamond_graph();
        let a = NodeId::new(0);

        let successors: Vec<NodeId> = graph.successors(a).collect();
        assert_eq!(successors, vec![NodeId::new(1), NodeId::new(2)]);
    }

    #[test]
    fn test_predecessor_order_is_insertion_order() {
        let graph = create_diamond_graph();
        let d = NodeId::new(3);

        let predecessors: Vec<NodeId> = graph.predecessors(d).collect();
        assert_eq!(predecessors, vec![NodeId::new(1), NodeId::new(2)]);
    }

    #[test]
    fn test_degrees() {
        let graph = create_diamond_graph();

        assert_eq!(graph.out_degree(NodeId::new(0)), 2);
        assert_eq!(graph.in_degree(NodeId::new(0)), 0);
        assert_eq!(graph.out_degree(NodeId::new(3)), 0);
        assert_eq!(graph.in_degree(NodeId::new(3)), 2);
    }

    #[test]
    fn test_entry_and_exit_nodes() {
        let graph = create_diamond_graph();

        let entries: Vec<NodeId> = graph.entry_nodes().collect();
        assert_eq!(entries, vec![NodeId::new(0)]);

        let exits: Vec<NodeId> = graph.exit_nodes().collect();
        assert_eq!(exits, vec![NodeId::new(3)]);
    }

    #[test]
    fn test_outgoing_incoming_edges() {
        let mut graph: DirectedGraph<&str, i32> = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");

        graph.add_edge(a, b, 10).unwrap();
        graph.add_edge(a, c, 20).unwrap();
        graph.add_edge(b, c, 30).unwrap();

        let weights: Vec<i32> = graph.outgoing_edges(a).map(|(_, &w)| w).collect();
        assert_eq!(weights, vec![10, 20]);

        let weights: Vec<i32> = graph.incoming_edges(c).map(|(_, &w)| w).collect();
        assert_eq!(weights, vec![20, 30]);
    }

    #[test]
    fn test_contains() {
        let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let e = graph.add_edge(a, b, ()).unwrap();

        assert!(graph.contains_node(a));
        assert!(!graph.contains_node(NodeId::new(999)));
        assert!(graph.contains_edge(e));
        assert!(!graph.contains_edge(EdgeId::new(999)));
    }

    #[test]
    fn test_trait_impls() {
        fn count<G: GraphBase>(g: &G) -> usize {
            g.node_count()
        }
        fn succ<G: Successors>(g: &G, n: NodeId) -> Vec<NodeId> {
            g.successors(n).collect()
        }
        fn pred<G: Predecessors>(g: &G, n: NodeId) -> Vec<NodeId> {
            g.predecessors(n).collect()
        }

        let graph = create_diamond_graph();
        assert_eq!(count(&graph), 4);
        assert_eq!(succ(&graph, NodeId::new(1)), vec![NodeId::new(3)]);
        assert_eq!(pred(&graph, NodeId::new(1)), vec![NodeId::new(0)]);
    }
}
