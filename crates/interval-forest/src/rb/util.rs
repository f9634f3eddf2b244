//! Red-black insertion, deletion and validation, generic over the node
//! type and an [`Augment`] hook.
//!
//! All functions take the arena plus the current root and keep both
//! consistent; the caller owns allocation and slot reclamation.

use crate::error::InvariantError;
use crate::types::{Augment, Color, RbNodeLike};
use crate::util::{first, get_l, get_p, get_r, next, set_l, set_p, set_r};

#[inline]
fn color<N: RbNodeLike>(arena: &[N], i: u32) -> Color {
    arena[i as usize].color()
}

#[inline]
fn set_color<N: RbNodeLike>(arena: &mut [N], i: u32, c: Color) {
    arena[i as usize].set_color(c);
}

/// Null children count as black.
#[inline]
fn black<N: RbNodeLike>(arena: &[N], i: Option<u32>) -> bool {
    i.map_or(true, |i| arena[i as usize].color() == Color::Black)
}

/// The position a delete-fixup argues about: either a real node, or the
/// empty slot left behind by splicing out a childless black node. The
/// empty slot carries its parent so the case analysis can locate the
/// sibling.
enum Deficit {
    Node(u32),
    Leaf { parent: u32 },
}

fn swap_payload_at<N: RbNodeLike>(arena: &mut [N], a: u32, b: u32) {
    debug_assert_ne!(a, b);
    let (lo, hi) = (a.min(b) as usize, a.max(b) as usize);
    let (head, tail) = arena.split_at_mut(hi);
    head[lo].swap_payload(&mut tail[0]);
}

/// Rotates the subtree rooted at `n` to the left; `n`'s right child
/// becomes the local subtree root.
pub(crate) fn rotate_left<N, A>(arena: &mut [N], root: &mut Option<u32>, n: u32)
where
    N: RbNodeLike,
    A: Augment<N>,
{
    let p = get_p(arena, n);
    let pivot = get_r(arena, n).expect("left rotation requires a right child");
    let inner = get_l(arena, pivot);

    set_r(arena, n, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(n));
    }
    set_l(arena, pivot, Some(n));
    set_p(arena, n, Some(pivot));
    set_p(arena, pivot, p);
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(n) {
                set_l(arena, p, Some(pivot));
            } else {
                set_r(arena, p, Some(pivot));
            }
        }
        None => *root = Some(pivot),
    }

    // Re-derive augmentation for the node that moved down before the one
    // that moved up; the latter depends on the former.
    A::update(arena, n);
    A::update(arena, pivot);
}

/// Mirror image of [`rotate_left`].
pub(crate) fn rotate_right<N, A>(arena: &mut [N], root: &mut Option<u32>, n: u32)
where
    N: RbNodeLike,
    A: Augment<N>,
{
    let p = get_p(arena, n);
    let pivot = get_l(arena, n).expect("right rotation requires a left child");
    let inner = get_r(arena, pivot);

    set_l(arena, n, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(n));
    }
    set_r(arena, pivot, Some(n));
    set_p(arena, n, Some(pivot));
    set_p(arena, pivot, p);
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(n) {
                set_l(arena, p, Some(pivot));
            } else {
                set_r(arena, p, Some(pivot));
            }
        }
        None => *root = Some(pivot),
    }

    A::update(arena, n);
    A::update(arena, pivot);
}

/// Links the freshly allocated red node `n` into the tree and restores the
/// red-black invariants.
///
/// The caller must have rejected duplicate keys already; `n` is expected
/// to be red and unlinked.
pub fn insert<N, A>(arena: &mut [N], root: &mut Option<u32>, n: u32)
where
    N: RbNodeLike,
    N::Key: Ord,
    A: Augment<N>,
{
    let Some(mut curr) = *root else {
        set_color(arena, n, Color::Black);
        *root = Some(n);
        return;
    };

    loop {
        let less = arena[n as usize].key() < arena[curr as usize].key();
        let child = if less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(next) => curr = next,
            None => {
                if less {
                    set_l(arena, curr, Some(n));
                } else {
                    set_r(arena, curr, Some(n));
                }
                set_p(arena, n, Some(curr));
                break;
            }
        }
    }

    A::propagate_insert(arena, n);
    insert_fixup::<N, A>(arena, root, n);
}

fn insert_fixup<N, A>(arena: &mut [N], root: &mut Option<u32>, mut n: u32)
where
    N: RbNodeLike,
    A: Augment<N>,
{
    loop {
        // case 1: n is the root
        let Some(p) = get_p(arena, n) else {
            set_color(arena, n, Color::Black);
            return;
        };
        // case 2: black parent, nothing to fix
        if color(arena, p) == Color::Black {
            return;
        }
        let g = get_p(arena, p).expect("a red node is never the root");
        let p_is_left = get_l(arena, g) == Some(p);
        let uncle = if p_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };
        // case 3: red parent and red uncle, push the conflict up
        if !black(arena, uncle) {
            let u = uncle.expect("red uncle exists");
            set_color(arena, p, Color::Black);
            set_color(arena, u, Color::Black);
            set_color(arena, g, Color::Red);
            n = g;
            continue;
        }
        // case 4: inner grandchild, rotate into the aligned shape
        if p_is_left && get_r(arena, p) == Some(n) {
            rotate_left::<N, A>(arena, root, p);
            n = p;
        } else if !p_is_left && get_l(arena, p) == Some(n) {
            rotate_right::<N, A>(arena, root, p);
            n = p;
        }
        // case 5: outer grandchild, rotate the grandparent
        let p = get_p(arena, n).expect("fixup node has a parent");
        set_color(arena, p, Color::Black);
        set_color(arena, g, Color::Red);
        if get_l(arena, g) == Some(p) {
            rotate_right::<N, A>(arena, root, g);
        } else {
            rotate_left::<N, A>(arena, root, g);
        }
        return;
    }
}

/// Unlinks the node at index `n` and restores the red-black invariants.
///
/// A node with two children first swaps payloads with its in-order
/// successor (color and position stay put) and the successor's slot is
/// spliced instead. Returns the arena index that was physically unlinked
/// so the caller can reclaim the slot.
///
/// # Panics
///
/// Panics when the surrounding tree shape contradicts the red-black
/// invariants; that signals a corrupted tree and is not recoverable.
pub fn remove<N, A>(arena: &mut [N], root: &mut Option<u32>, mut n: u32) -> u32
where
    N: RbNodeLike,
    A: Augment<N>,
{
    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        let mut s = get_r(arena, n).expect("right child of a two-child node");
        while let Some(l) = get_l(arena, s) {
            s = l;
        }
        swap_payload_at(arena, n, s);
        n = s;
    }

    // n has at most one child now; splice it out.
    let child = get_l(arena, n).or_else(|| get_r(arena, n));
    let p = get_p(arena, n);
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(n) {
                set_l(arena, p, child);
            } else {
                set_r(arena, p, child);
            }
        }
        None => *root = child,
    }

    A::propagate_remove(arena, p);

    if color(arena, n) == Color::Black {
        match child {
            Some(c) if color(arena, c) == Color::Red => set_color(arena, c, Color::Black),
            Some(_) => {
                // A black node with exactly one child must have a red
                // child, or the black heights differed before the call.
                panic!("red-black invariant violated: black node spliced with a black child");
            }
            None => {
                if let Some(p) = p {
                    remove_fixup::<N, A>(arena, root, Deficit::Leaf { parent: p });
                }
            }
        }
    } else if child.is_some() {
        panic!("red-black invariant violated: red node spliced with a child");
    }

    n
}

/// The six-case rebalancing walk run after splicing out a black node
/// whose replacement could not absorb the missing black unit.
fn remove_fixup<N, A>(arena: &mut [N], root: &mut Option<u32>, mut x: Deficit)
where
    N: RbNodeLike,
    A: Augment<N>,
{
    loop {
        let (p, x_idx) = match x {
            Deficit::Node(i) => (get_p(arena, i), Some(i)),
            Deficit::Leaf { parent } => (Some(parent), None),
        };
        // case 1: the deficit reached the root
        let Some(p) = p else {
            return;
        };
        let x_is_left = get_l(arena, p) == x_idx;
        let mut s = (if x_is_left {
            get_r(arena, p)
        } else {
            get_l(arena, p)
        })
        .unwrap_or_else(|| panic!("red-black invariant violated: deficit node has no sibling"));

        // case 2: red sibling; rotate so the deficit gets a black sibling
        if color(arena, s) == Color::Red {
            set_color(arena, s, Color::Black);
            set_color(arena, p, Color::Red);
            if x_is_left {
                rotate_left::<N, A>(arena, root, p);
            } else {
                rotate_right::<N, A>(arena, root, p);
            }
            s = (if x_is_left {
                get_r(arena, p)
            } else {
                get_l(arena, p)
            })
            .unwrap_or_else(|| {
                panic!("red-black invariant violated: deficit node has no sibling")
            });
        }

        let sl = get_l(arena, s);
        let sr = get_r(arena, s);
        let sl_black = black(arena, sl);
        let sr_black = black(arena, sr);

        // case 3: everything black; recolor and push the deficit up
        if color(arena, p) == Color::Black
            && color(arena, s) == Color::Black
            && sl_black
            && sr_black
        {
            set_color(arena, s, Color::Red);
            x = Deficit::Node(p);
            continue;
        }

        // case 4: red parent absorbs the missing black unit
        if color(arena, p) == Color::Red
            && color(arena, s) == Color::Black
            && sl_black
            && sr_black
        {
            set_color(arena, s, Color::Red);
            set_color(arena, p, Color::Black);
            return;
        }

        // case 5: near nephew red, far nephew black; rotate the sibling
        // so case 6 sees a red far nephew
        if color(arena, s) == Color::Black {
            if x_is_left && sr_black && !sl_black {
                let near = sl.expect("red near nephew exists");
                set_color(arena, near, Color::Black);
                set_color(arena, s, Color::Red);
                rotate_right::<N, A>(arena, root, s);
            } else if !x_is_left && sl_black && !sr_black {
                let near = sr.expect("red near nephew exists");
                set_color(arena, near, Color::Black);
                set_color(arena, s, Color::Red);
                rotate_left::<N, A>(arena, root, s);
            }
            s = (if x_is_left {
                get_r(arena, p)
            } else {
                get_l(arena, p)
            })
            .unwrap_or_else(|| {
                panic!("red-black invariant violated: deficit node has no sibling")
            });
        }

        // case 6: far nephew red; rotate the parent toward the deficit
        set_color(arena, s, color(arena, p));
        set_color(arena, p, Color::Black);
        if x_is_left {
            let far = get_r(arena, s)
                .unwrap_or_else(|| panic!("red-black invariant violated: missing far nephew"));
            set_color(arena, far, Color::Black);
            rotate_left::<N, A>(arena, root, p);
        } else {
            let far = get_l(arena, s)
                .unwrap_or_else(|| panic!("red-black invariant violated: missing far nephew"));
            set_color(arena, far, Color::Black);
            rotate_right::<N, A>(arena, root, p);
        }
        return;
    }
}

/// Verifies the red-black and BST invariants of the tree under `root`.
pub fn assert_red_black_tree<N>(arena: &[N], root: Option<u32>) -> Result<(), InvariantError>
where
    N: RbNodeLike,
    N::Key: Ord,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err(InvariantError::RootHasParent);
    }
    if arena[root as usize].color() != Color::Black {
        return Err(InvariantError::RootNotBlack);
    }

    fn black_height<N: RbNodeLike>(arena: &[N], node: Option<u32>) -> Result<usize, InvariantError> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = arena[node as usize].l();
        let r = arena[node as usize].r();

        if let Some(li) = l {
            if arena[li as usize].p() != Some(node) {
                return Err(InvariantError::BrokenParentLink(node));
            }
        }
        if let Some(ri) = r {
            if arena[ri as usize].p() != Some(node) {
                return Err(InvariantError::BrokenParentLink(node));
            }
        }

        if arena[node as usize].color() == Color::Red && (!black(arena, l) || !black(arena, r)) {
            return Err(InvariantError::RedRedViolation(node));
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(InvariantError::BlackHeightMismatch(node));
        }

        Ok(lh + usize::from(arena[node as usize].color() == Color::Black))
    }

    black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if arena[prev as usize].key() >= arena[i as usize].key() {
                return Err(InvariantError::OrderViolation(i));
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
