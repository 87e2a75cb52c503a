//! Tree-dump rendering of any tree through its [`NodeView`]s.

use crate::tree::BinarySearchTree;
use crate::types::{Color, NodeView};

/// Renders one child subtree given the indentation prefix for its lines.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Joins child renderings under a parent line with `├─`/`└─` branches.
/// Trailing `None` children are skipped.
pub fn print_tree(tab: &str, children: &[Option<&PrintChild<'_>>]) -> String {
    let mut out = String::new();
    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child) in children.iter().enumerate().take(last + 1) {
        let Some(child) = child else {
            continue;
        };

        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let rendered = child(&child_tab);
        let branch = if rendered.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !rendered.is_empty() {
            out.push(' ');
            out.push_str(&rendered);
        }
    }

    out
}

/// Multi-line dump of the whole tree. Sentinels are omitted; a missing
/// child next to a present one shows as `∅`.
pub fn render<V, T>(tree: &T) -> String
where
    T: BinarySearchTree<V> + ?Sized,
{
    match tree.root() {
        None => "∅".to_string(),
        Some(root) => render_node::<V, T>(tree, root, ""),
    }
}

fn render_node<V, T>(tree: &T, idx: u32, tab: &str) -> String
where
    T: BinarySearchTree<V> + ?Sized,
{
    let view = tree.view(idx);
    let real = |child: Option<u32>| child.filter(|&c| !tree.view(c).sentinel);
    let (left, right) = (real(view.left), real(view.right));
    if left.is_none() && right.is_none() {
        return label(&view);
    }

    let side = |child: Option<u32>| {
        move |tab: &str| match child {
            Some(c) => render_node::<V, T>(tree, c, tab),
            None => "∅".to_string(),
        }
    };
    let (l, r) = (side(left), side(right));
    let children: [Option<&PrintChild<'_>>; 2] = [Some(&l), Some(&r)];
    format!("{}{}", label(&view), print_tree(tab, &children))
}

fn label(view: &NodeView) -> String {
    let mut out = view.key.to_string();
    match view.color {
        Some(Color::Black) => out.push_str(" b"),
        Some(Color::Red) => out.push_str(" r"),
        None => {}
    }
    if view.marked {
        out.push_str(" *");
    }
    if let Some(depth) = view.depth {
        out.push_str(&format!(" d{depth}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::BasicBst;

    #[test]
    fn renders_branches_and_gaps() {
        let mut tree = BasicBst::new();
        for k in [2, 1, 3, 4] {
            tree.insert(k, ()).unwrap();
        }
        let expected = "2\n├─ 1\n└─ 3\n   ├─ ∅\n   └─ 4";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn empty_tree_renders_as_empty_set() {
        let tree = BasicBst::<()>::new();
        assert_eq!(tree.render(), "∅");
    }
}
