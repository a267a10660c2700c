use crate::types::{KvNode, RbNodeLike};
use crate::util::{first, last, next};

use super::Header;

/// Checks every structural invariant of the tree hanging off `header`:
/// parent links, root color, no red-red edge, uniform black height,
/// non-decreasing in-order keys and the cached extremes.
///
/// Returns the number of reachable nodes.
pub fn validate<K, V, N, F>(arena: &[N], header: &Header, less: F) -> Result<usize, String>
where
    N: RbNodeLike + KvNode<K, V>,
    F: Fn(&K, &K) -> bool,
{
    let Some(root) = header.root else {
        if header.leftmost.is_some() || header.rightmost.is_some() {
            return Err("empty tree with cached extremes".to_string());
        }
        return Ok(0);
    };

    if arena[root as usize].p().is_some() {
        return Err(format!("root {root} has a parent link"));
    }
    if arena[root as usize].is_red() {
        return Err(format!("root {root} is red"));
    }

    check_subtree(arena, root)?;

    if header.leftmost != first(arena, Some(root)) {
        return Err(format!(
            "leftmost cache {:?} does not match minimum {:?}",
            header.leftmost,
            first(arena, Some(root))
        ));
    }
    if header.rightmost != last(arena, Some(root)) {
        return Err(format!(
            "rightmost cache {:?} does not match maximum {:?}",
            header.rightmost,
            last(arena, Some(root))
        ));
    }

    let mut count = 0;
    let mut prev: Option<u32> = None;
    let mut curr = header.leftmost;
    while let Some(i) = curr {
        if let Some(pi) = prev {
            if less(arena[i as usize].key(), arena[pi as usize].key()) {
                return Err(format!("node {i} is ordered before its predecessor {pi}"));
            }
        }
        count += 1;
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(count)
}

/// Returns the black height of the subtree at `node`, absent links
/// counting as zero.
fn check_subtree<N: RbNodeLike>(arena: &[N], node: u32) -> Result<usize, String> {
    let n = &arena[node as usize];
    let mut heights = [0usize; 2];

    for (slot, child) in [n.l(), n.r()].into_iter().enumerate() {
        let Some(c) = child else {
            continue;
        };
        if arena[c as usize].p() != Some(node) {
            return Err(format!("node {c} does not point back to parent {node}"));
        }
        if n.is_red() && arena[c as usize].is_red() {
            return Err(format!("red node {node} has red child {c}"));
        }
        heights[slot] = check_subtree(arena, c)?;
    }

    if heights[0] != heights[1] {
        return Err(format!(
            "black height mismatch under node {node}: {} vs {}",
            heights[0], heights[1]
        ));
    }

    Ok(heights[0] + usize::from(n.is_black()))
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height<N: RbNodeLike>(arena: &[N], root: Option<u32>) -> usize {
    let Some(i) = root else {
        return 0;
    };
    let n = &arena[i as usize];
    1 + height(arena, n.l()).max(height(arena, n.r()))
}

/// Black nodes on the leftmost root-to-leaf path.
pub fn black_height<N: RbNodeLike>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut curr = root;
    while let Some(i) = curr {
        if arena[i as usize].is_black() {
            count += 1;
        }
        curr = arena[i as usize].l();
    }
    count
}
