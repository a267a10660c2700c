/// A location in a tree: a live node, or the past-the-end position.
///
/// Positions are plain arena indices. They stay valid until the node they
/// point at is erased (or the tree is cleared); using a position after that,
/// or with a different tree, is a caller error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub(crate) Option<u32>);

impl Position {
    /// Past-the-end position of every tree.
    pub const END: Position = Position(None);

    pub fn is_end(self) -> bool {
        self.0.is_none()
    }

    /// Arena index of the node, `None` for the end position.
    pub fn index(self) -> Option<u32> {
        self.0
    }

    #[inline]
    pub(crate) fn node(self) -> u32 {
        match self.0 {
            Some(i) => i,
            None => panic!("the end position does not refer to an element"),
        }
    }
}
