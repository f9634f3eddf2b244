use std::fmt::Debug;

use crate::types::{Color, RbNodeLike};

/// Debug printer for red-black trees.
pub fn print<N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    N: RbNodeLike,
    N::Key: Debug,
    N::Value: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.color() == Color::Black {
                "black"
            } else {
                "red"
            };
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.key(),
                n.value()
            )
        }
    }
}
