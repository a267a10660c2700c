use crate::types::RbNodeLike;
use crate::util::{first, last};

use super::rotate::{replace_child, rotate_left, rotate_right};
use super::{is_red, Header};

/// Unlinks `z` from the tree and restores the red-black invariants.
///
/// On return `z` is fully detached (all links cleared) and may be freed by
/// the caller. Only link and color writes happen here, so this cannot fail
/// half-way.
pub fn remove<N: RbNodeLike>(arena: &mut [N], header: &mut Header, z: u32) {
    let zl = arena[z as usize].l();
    let zr = arena[z as usize].r();

    // `x` takes the place of the node that physically leaves its slot and
    // `xp` becomes its parent. `x` may be absent.
    let x;
    let xp;

    if let (Some(zl), Some(zr)) = (zl, zr) {
        // Relocate the successor `y` into `z`'s slot.
        let Some(y) = first(arena, Some(zr)) else {
            return;
        };
        x = arena[y as usize].r();

        arena[zl as usize].set_p(Some(y));
        arena[y as usize].set_l(Some(zl));

        if y != zr {
            let yp = arena[y as usize].p();
            if let Some(x) = x {
                arena[x as usize].set_p(yp);
            }
            if let Some(yp) = yp {
                arena[yp as usize].set_l(x);
            }
            arena[y as usize].set_r(Some(zr));
            arena[zr as usize].set_p(Some(y));
            xp = yp;
        } else {
            xp = Some(y);
        }

        replace_child(arena, &mut header.root, z, Some(y));
        let zp = arena[z as usize].p();
        arena[y as usize].set_p(zp);

        // `z` keeps the color that was removed from the tree.
        let y_black = arena[y as usize].is_black();
        let z_black = arena[z as usize].is_black();
        arena[y as usize].set_black(z_black);
        arena[z as usize].set_black(y_black);
    } else {
        x = zl.or(zr);
        xp = arena[z as usize].p();
        if let Some(x) = x {
            arena[x as usize].set_p(xp);
        }
        replace_child(arena, &mut header.root, z, x);

        if header.leftmost == Some(z) {
            header.leftmost = match x {
                Some(_) => first(arena, x),
                None => xp,
            };
        }
        if header.rightmost == Some(z) {
            header.rightmost = match x {
                Some(_) => last(arena, x),
                None => xp,
            };
        }
    }

    if arena[z as usize].is_black() {
        erase_rebalance(arena, &mut header.root, x, xp);
    }

    let node = &mut arena[z as usize];
    node.set_p(None);
    node.set_l(None);
    node.set_r(None);
}

/// Resolves the double-black deficiency sitting at `x` (child of `xp`).
fn erase_rebalance<N: RbNodeLike>(
    arena: &mut [N],
    root: &mut Option<u32>,
    mut x: Option<u32>,
    mut xp: Option<u32>,
) {
    while x != *root && !is_red(arena, x) {
        let Some(p) = xp else {
            break;
        };

        if arena[p as usize].l() == x {
            let Some(mut w) = arena[p as usize].r() else {
                break;
            };
            if arena[w as usize].is_red() {
                arena[w as usize].set_black(true);
                arena[p as usize].set_black(false);
                rotate_left(arena, root, p);
                let Some(nw) = arena[p as usize].r() else {
                    break;
                };
                w = nw;
            }

            let wl = arena[w as usize].l();
            let wr = arena[w as usize].r();
            if !is_red(arena, wl) && !is_red(arena, wr) {
                arena[w as usize].set_black(false);
                x = Some(p);
                xp = arena[p as usize].p();
                continue;
            }

            if !is_red(arena, wr) {
                if let Some(wl) = wl {
                    arena[wl as usize].set_black(true);
                }
                arena[w as usize].set_black(false);
                rotate_right(arena, root, w);
                let Some(nw) = arena[p as usize].r() else {
                    break;
                };
                w = nw;
            }

            let p_black = arena[p as usize].is_black();
            arena[w as usize].set_black(p_black);
            arena[p as usize].set_black(true);
            if let Some(wr) = arena[w as usize].r() {
                arena[wr as usize].set_black(true);
            }
            rotate_left(arena, root, p);
            break;
        } else {
            let Some(mut w) = arena[p as usize].l() else {
                break;
            };
            if arena[w as usize].is_red() {
                arena[w as usize].set_black(true);
                arena[p as usize].set_black(false);
                rotate_right(arena, root, p);
                let Some(nw) = arena[p as usize].l() else {
                    break;
                };
                w = nw;
            }

            let wl = arena[w as usize].l();
            let wr = arena[w as usize].r();
            if !is_red(arena, wl) && !is_red(arena, wr) {
                arena[w as usize].set_black(false);
                x = Some(p);
                xp = arena[p as usize].p();
                continue;
            }

            if !is_red(arena, wl) {
                if let Some(wr) = wr {
                    arena[wr as usize].set_black(true);
                }
                arena[w as usize].set_black(false);
                rotate_left(arena, root, w);
                let Some(nw) = arena[p as usize].l() else {
                    break;
                };
                w = nw;
            }

            let p_black = arena[p as usize].is_black();
            arena[w as usize].set_black(p_black);
            arena[p as usize].set_black(true);
            if let Some(wl) = arena[w as usize].l() {
                arena[wl as usize].set_black(true);
            }
            rotate_right(arena, root, p);
            break;
        }
    }

    if let Some(x) = x {
        arena[x as usize].set_black(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::{link, validate, RbNode};

    fn cmp(a: &i32, b: &i32) -> bool {
        a < b
    }

    fn insert(arena: &mut Vec<RbNode<i32, ()>>, header: &mut Header, k: i32) -> u32 {
        arena.push(RbNode::new(k, ()));
        let x = (arena.len() - 1) as u32;
        let mut parent = None;
        let mut left = true;
        let mut curr = header.root;
        while let Some(c) = curr {
            parent = Some(c);
            left = k < arena[c as usize].k;
            curr = if left {
                arena[c as usize].l
            } else {
                arena[c as usize].r
            };
        }
        link(arena, header, x, parent, left);
        x
    }

    fn keys(arena: &[RbNode<i32, ()>], header: &Header) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = header.leftmost;
        while let Some(i) = curr {
            out.push(arena[i as usize].k);
            curr = crate::util::next(arena, i);
        }
        out
    }

    #[test]
    fn remove_leaf_root_empties_header() {
        let mut arena = Vec::new();
        let mut header = Header::default();
        let x = insert(&mut arena, &mut header, 1);
        remove(&mut arena, &mut header, x);
        assert_eq!(header, Header::default());
    }

    #[test]
    fn remove_node_with_two_children_relocates_successor() {
        let mut arena = Vec::new();
        let mut header = Header::default();
        let ids: Vec<u32> = [5, 3, 8, 1, 4, 7, 9]
            .into_iter()
            .map(|k| insert(&mut arena, &mut header, k))
            .collect();

        remove(&mut arena, &mut header, ids[0]);
        assert_eq!(keys(&arena, &header), vec![1, 3, 4, 7, 8, 9]);
        assert_eq!(header.root, Some(ids[5]));
        assert_eq!(arena[ids[0] as usize].p, None);
        assert_eq!(arena[ids[0] as usize].l, None);
        assert_eq!(arena[ids[0] as usize].r, None);
        validate(&arena, &header, cmp).unwrap();
    }

    #[test]
    fn remove_extremes_moves_cached_min_and_max() {
        let mut arena = Vec::new();
        let mut header = Header::default();
        let ids: Vec<u32> = [5, 3, 8, 1, 4, 7, 9]
            .into_iter()
            .map(|k| insert(&mut arena, &mut header, k))
            .collect();

        remove(&mut arena, &mut header, ids[3]);
        assert_eq!(header.leftmost, Some(ids[1]));
        remove(&mut arena, &mut header, ids[6]);
        assert_eq!(header.rightmost, Some(ids[2]));
        validate(&arena, &header, cmp).unwrap();
    }

    #[test]
    fn remove_every_node_in_insertion_order() {
        let mut arena = Vec::new();
        let mut header = Header::default();
        let ids: Vec<u32> = (0..64)
            .map(|i| insert(&mut arena, &mut header, (i * 37) % 64))
            .collect();

        for (n, &id) in ids.iter().enumerate() {
            remove(&mut arena, &mut header, id);
            validate(&arena, &header, cmp).unwrap();
            assert_eq!(keys(&arena, &header).len(), 63 - n);
        }
        assert_eq!(header, Header::default());
    }
}
