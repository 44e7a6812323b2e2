use thiserror::Error;

/// The generic Error type covering every failure this library can return.
///
/// The analysis core has no I/O and no transient failures; everything in
/// this enum is a structural misuse of the API detected at the call site.
/// Each variant carries enough context to identify the offending call.
///
/// # Examples
///
/// ```rust,no_run
/// use liftir::cfg::ControlFlowGraph;
///
/// let mut cfg: ControlFlowGraph<u64> = ControlFlowGraph::new();
/// cfg.add_block(0x1000);
///
/// // Edges may only reference blocks already in the graph.
/// match cfg.add_edge(0x1000, 0x2000) {
///     Err(liftir::Error::GraphError(msg)) => eprintln!("bad edge: {msg}"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A graph operation referenced a node or block that does not exist,
    /// or was otherwise structurally invalid.
    ///
    /// Returned by edge insertion with an unknown endpoint and by entry
    /// selection with an unknown block key. These are programming errors
    /// on the caller's side and are not recoverable.
    #[error("{0}")]
    GraphError(String),

    /// A rooted analysis was requested on a graph with no entry block.
    ///
    /// The depth-first spanning tree and the dominator tree are defined
    /// relative to a designated entry; call
    /// [`ControlFlowGraph::set_entry`](crate::cfg::ControlFlowGraph::set_entry)
    /// first.
    #[error("control flow graph has no entry block")]
    MissingEntry,
}

/// The result type used throughout this library.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_display() {
        let err = Error::GraphError("source block 0x40 does not exist".into());
        assert_eq!(err.to_string(), "source block 0x40 does not exist");
    }

    #[test]
    fn test_missing_entry_display() {
        assert_eq!(
            Error::MissingEntry.to_string(),
            "control flow graph has no entry block"
        );
    }
}
