use crate::types::Node;

use super::first::{first, last};

#[derive(Clone, Copy)]
enum Dir {
    Forward,
    Backward,
}

impl Dir {
    /// Child link on the side the walk moves toward.
    fn ahead<N: Node>(self, n: &N) -> Option<u32> {
        match self {
            Dir::Forward => n.r(),
            Dir::Backward => n.l(),
        }
    }

    /// Extreme of a subtree closest to where the walk came from.
    fn nearest<N: Node>(self, arena: &[N], root: u32) -> Option<u32> {
        match self {
            Dir::Forward => first(arena, Some(root)),
            Dir::Backward => last(arena, Some(root)),
        }
    }
}

/// One in-order step from `curr`: descend into the subtree ahead if there
/// is one, otherwise climb until we arrive from the trailing side.
fn step<N: Node>(arena: &[N], mut curr: u32, dir: Dir) -> Option<u32> {
    if let Some(child) = dir.ahead(&arena[curr as usize]) {
        return dir.nearest(arena, child);
    }
    while let Some(p) = arena[curr as usize].p() {
        if dir.ahead(&arena[p as usize]) != Some(curr) {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// In-order successor. `None` means the walk fell off the maximum, i.e.
/// the header ("end").
pub fn next<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    step(arena, curr, Dir::Forward)
}

/// In-order predecessor. `None` means `curr` is the minimum.
pub fn prev<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    step(arena, curr, Dir::Backward)
}
