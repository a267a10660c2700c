use thiserror::Error;

/// Failures surfaced by tree insertion paths. A failed call leaves the tree
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The node store could not provide a slot for a new node.
    #[error("node allocation failed ({requested} node(s) requested)")]
    AllocFailed { requested: usize },
    /// The tree already holds the maximum representable number of nodes.
    #[error("tree size would exceed the maximum of {max} nodes")]
    CapacityOverflow { max: usize },
}
