use crate::types::RbNodeLike;

use super::rotate::{rotate_left, rotate_right};
use super::{is_red, Header};

/// Attaches the detached node `x` as the `add_to_left` child of `parent`
/// (or as the root when `parent` is `None`), keeps the header extremes in
/// sync and rebalances.
pub fn link<N: RbNodeLike>(
    arena: &mut [N],
    header: &mut Header,
    x: u32,
    parent: Option<u32>,
    add_to_left: bool,
) {
    let node = &mut arena[x as usize];
    node.set_p(parent);
    node.set_l(None);
    node.set_r(None);

    match parent {
        None => {
            debug_assert!(header.root.is_none(), "root link over a non-empty tree");
            header.root = Some(x);
            header.leftmost = Some(x);
            header.rightmost = Some(x);
        }
        Some(p) if add_to_left => {
            debug_assert!(arena[p as usize].l().is_none());
            arena[p as usize].set_l(Some(x));
            if header.leftmost == Some(p) {
                header.leftmost = Some(x);
            }
        }
        Some(p) => {
            debug_assert!(arena[p as usize].r().is_none());
            arena[p as usize].set_r(Some(x));
            if header.rightmost == Some(p) {
                header.rightmost = Some(x);
            }
        }
    }

    insert_rebalance(arena, &mut header.root, x);
}

/// Restores the color invariants after `x` was linked in as a leaf.
pub fn insert_rebalance<N: RbNodeLike>(arena: &mut [N], root: &mut Option<u32>, mut x: u32) {
    arena[x as usize].set_black(false);

    loop {
        let Some(p) = arena[x as usize].p() else {
            break;
        };
        if arena[p as usize].is_black() {
            break;
        }
        // A red parent is never the root, so the grandparent exists.
        let Some(g) = arena[p as usize].p() else {
            break;
        };

        if arena[g as usize].l() == Some(p) {
            let uncle = arena[g as usize].r();
            if is_red(arena, uncle) {
                if let Some(u) = uncle {
                    arena[u as usize].set_black(true);
                }
                arena[p as usize].set_black(true);
                arena[g as usize].set_black(false);
                x = g;
                continue;
            }

            let mut p = p;
            if arena[p as usize].r() == Some(x) {
                rotate_left(arena, root, p);
                p = x;
            }
            arena[p as usize].set_black(true);
            arena[g as usize].set_black(false);
            rotate_right(arena, root, g);
            break;
        } else {
            let uncle = arena[g as usize].l();
            if is_red(arena, uncle) {
                if let Some(u) = uncle {
                    arena[u as usize].set_black(true);
                }
                arena[p as usize].set_black(true);
                arena[g as usize].set_black(false);
                x = g;
                continue;
            }

            let mut p = p;
            if arena[p as usize].l() == Some(x) {
                rotate_right(arena, root, p);
                p = x;
            }
            arena[p as usize].set_black(true);
            arena[g as usize].set_black(false);
            rotate_left(arena, root, g);
            break;
        }
    }

    if let Some(r) = *root {
        arena[r as usize].set_black(true);
    }
}
