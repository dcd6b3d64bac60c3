//! ASCII tree rendering for report outlines.

use crate::models::SectionLabel;

/// An outline section with the sections nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub label: SectionLabel,
    pub children: Vec<OutlineNode>,
}

/// Nest a flat outline by label depth, keeping document order.
///
/// A label deeper than the one before it becomes that label's child; a label
/// with no shallower predecessor is treated as a root.
pub fn build_tree(sections: &[SectionLabel]) -> Vec<OutlineNode> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    // Depths of the open path from a root down to the last inserted node.
    let mut path: Vec<usize> = Vec::new();

    for section in sections {
        let depth = section.depth();
        while path.last().is_some_and(|&d| d >= depth) {
            path.pop();
        }

        let node = OutlineNode {
            label: section.clone(),
            children: Vec::new(),
        };
        match last_on_path(&mut roots, path.len()) {
            Some(parent) => parent.children.push(node),
            None => {
                path.clear();
                roots.push(node);
            }
        }
        path.push(depth);
    }

    roots
}

/// The node at `len` levels down the rightmost path, or `None` for `len == 0`.
fn last_on_path(roots: &mut [OutlineNode], len: usize) -> Option<&mut OutlineNode> {
    if len == 0 {
        return None;
    }
    let mut node = roots.last_mut()?;
    for _ in 1..len {
        node = node.children.last_mut()?;
    }
    Some(node)
}

/// Render an outline as an ASCII tree.
///
/// Example output:
/// ```text
/// 1. Executive Summary
/// ├── 1. Executive Summary.1 Subsection
/// ├── 1. Executive Summary.2 Subsection
/// └── 1. Executive Summary.3 Subsection
/// 2. Project Overview
/// ```
pub fn render_tree(sections: &[SectionLabel]) -> String {
    let mut output = String::new();
    for root in build_tree(sections) {
        output.push_str(root.label.as_str());
        output.push('\n');
        write_children(&mut output, &root.children, &mut Vec::new());
    }
    output
}

/// Write `children` one per line. `open[i]` is true while the ancestor at
/// indent level `i` still has siblings below it, which keeps its `│` running.
fn write_children(output: &mut String, children: &[OutlineNode], open: &mut Vec<bool>) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        for &running in open.iter() {
            output.push_str(if running { "│   " } else { "    " });
        }
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(child.label.as_str());
        output.push('\n');

        open.push(!is_last);
        write_children(output, &child.children, open);
        open.pop();
    }
}
