/// Node store configuration for a tree.
///
/// `node_limit` caps how many live nodes the store hands out; allocation
/// past it fails with [`TreeError::AllocFailed`](crate::TreeError).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    pub initial_capacity: usize,
    pub node_limit: Option<usize>,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }
}
