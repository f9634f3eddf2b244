//! Traversal helpers shared by the tree families.
//!
//! Every function operates on an arena slice plus `u32` indices; none of
//! them allocate or mutate links except [`reclaim`].

pub mod print;

use crate::types::{KvNode, Node};

pub use print::print;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node under `root`.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        let mut c = r;
        while let Some(l) = get_l(arena, c) {
            c = l;
        }
        return Some(c);
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        let mut c = l;
        while let Some(r) = get_r(arena, c) {
            c = r;
        }
        return Some(c);
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes reachable from `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Finds a node by key.
pub fn find<N>(arena: &[N], root: Option<u32>, key: &N::Key) -> Option<u32>
where
    N: KvNode,
    N::Key: Ord,
{
    let mut curr = root;
    while let Some(i) = curr {
        let node = &arena[i as usize];
        curr = match key.cmp(node.key()) {
            std::cmp::Ordering::Equal => return Some(i),
            std::cmp::Ordering::Less => node.l(),
            std::cmp::Ordering::Greater => node.r(),
        };
    }
    None
}

/// Releases the arena slot `freed` after its node has been unlinked.
///
/// The last arena element is moved into the freed slot and every link that
/// referenced its old index is rewritten, so the arena stays dense. Any
/// index handed out before the call is invalidated by it.
pub(crate) fn reclaim<N: Node>(arena: &mut Vec<N>, root: &mut Option<u32>, freed: u32) {
    let last = (arena.len() - 1) as u32;
    arena.swap_remove(freed as usize);
    if freed == last {
        return;
    }
    // The node previously stored at `last` now lives at `freed`.
    if *root == Some(last) {
        *root = Some(freed);
    }
    if let Some(p) = get_p(arena, freed) {
        if get_l(arena, p) == Some(last) {
            set_l(arena, p, Some(freed));
        } else {
            set_r(arena, p, Some(freed));
        }
    }
    if let Some(l) = get_l(arena, freed) {
        set_p(arena, l, Some(freed));
    }
    if let Some(r) = get_r(arena, freed) {
        set_p(arena, r, Some(freed));
    }
}
