use crate::types::Node;

/// Points whatever referenced `old` (its parent's child link, or the root)
/// at `new`. The parent link of `new` is left to the caller.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    root: &mut Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    match arena[old as usize].p() {
        None => *root = new,
        Some(p) => {
            if arena[p as usize].l() == Some(old) {
                arena[p as usize].set_l(new);
            } else {
                arena[p as usize].set_r(new);
            }
        }
    }
}

/// Rotates left around `x`: its right child `y` takes its place and `x`
/// becomes `y`'s left child.
pub fn rotate_left<N: Node>(arena: &mut [N], root: &mut Option<u32>, x: u32) {
    let Some(y) = arena[x as usize].r() else {
        debug_assert!(false, "rotate_left pivot has no right child");
        return;
    };

    let yl = arena[y as usize].l();
    arena[x as usize].set_r(yl);
    if let Some(yl) = yl {
        arena[yl as usize].set_p(Some(x));
    }

    replace_child(arena, root, x, Some(y));
    let xp = arena[x as usize].p();
    arena[y as usize].set_p(xp);

    arena[y as usize].set_l(Some(x));
    arena[x as usize].set_p(Some(y));
}

/// Mirror of [`rotate_left`].
pub fn rotate_right<N: Node>(arena: &mut [N], root: &mut Option<u32>, x: u32) {
    let Some(y) = arena[x as usize].l() else {
        debug_assert!(false, "rotate_right pivot has no left child");
        return;
    };

    let yr = arena[y as usize].r();
    arena[x as usize].set_l(yr);
    if let Some(yr) = yr {
        arena[yr as usize].set_p(Some(x));
    }

    replace_child(arena, root, x, Some(y));
    let xp = arena[x as usize].p();
    arena[y as usize].set_p(xp);

    arena[y as usize].set_r(Some(x));
    arena[x as usize].set_p(Some(y));
}
