//! Tree shape of a flat, indentation-annotated navigation list.
//!
//! Entries arrive in document order with a depth each. One left-to-right pass
//! derives everything needed to draw the sidebar tree: whether an entry is the
//! last of its siblings, which of its ancestors were, whether it has children,
//! and the arena index of its parent.

use crate::nav::NavEntry;

const ANCESTOR_DONE: &str = "   ";
const ANCESTOR_CONTINUES: &str = "│  ";
const LAST_CHILD: &str = "└─ ";
const MIDDLE_CHILD: &str = "├─ ";

/// Position of an entry within its block's tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeShape {
    pub is_last_sibling: bool,
    /// One flag per ancestor depth, outermost first. Length is `depth - 1`.
    pub ancestor_is_last: Vec<bool>,
    pub has_children: bool,
    pub parent: Option<usize>,
}

/// True when no entry at the same depth follows `i` before a shallower one.
pub fn is_last_sibling(depths: &[u32], i: usize) -> bool {
    let depth = depths[i];
    for &next in &depths[i + 1..] {
        if next == depth {
            return false;
        }
        if next < depth {
            return true;
        }
    }
    true
}

/// Compute the tree shape of every depth in `depths`.
pub fn shapes(depths: &[u32]) -> Vec<TreeShape> {
    let mut out = Vec::with_capacity(depths.len());
    // Slot `d - 1` holds the last-sibling flag of the latest entry at depth `d`.
    let mut last_at_depth: Vec<bool> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for (i, &depth) in depths.iter().enumerate() {
        let depth = depth.max(1) as usize;
        let is_last = is_last_sibling(depths, i);

        // Skipped depths count as finished ancestors.
        last_at_depth.truncate(depth - 1);
        last_at_depth.resize(depth - 1, true);
        let ancestor_is_last = last_at_depth.clone();
        last_at_depth.push(is_last);

        while open.last().is_some_and(|&p| depths[p] >= depths[i]) {
            open.pop();
        }
        let parent = open.last().copied();
        open.push(i);

        let has_children = depths.get(i + 1).is_some_and(|&next| next > depths[i]);

        out.push(TreeShape {
            is_last_sibling: is_last,
            ancestor_is_last,
            has_children,
            parent,
        });
    }
    out
}

/// Annotate entries of one navigation block in place.
pub fn resolve(entries: &mut [NavEntry]) {
    let depths: Vec<u32> = entries.iter().map(|e| e.depth).collect();
    for (entry, shape) in entries.iter_mut().zip(shapes(&depths)) {
        entry.shape = shape;
    }
}

/// Tree-drawing prefix for an entry. Top-level entries have none.
pub fn render_prefix(depth: u32, shape: &TreeShape) -> Option<String> {
    if depth < 2 {
        return None;
    }
    let mut prefix = String::new();
    for i in 0..(depth as usize - 1) {
        let done = shape.ancestor_is_last.get(i).copied().unwrap_or(true);
        prefix.push_str(if done { ANCESTOR_DONE } else { ANCESTOR_CONTINUES });
    }
    prefix.push_str(if shape.is_last_sibling {
        LAST_CHILD
    } else {
        MIDDLE_CHILD
    });
    Some(prefix)
}

#[cfg(test)]
mod tests;
