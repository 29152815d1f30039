use super::{FlatEntry, NodeKind, TreeNode};
use std::collections::HashMap;
use tracing::debug;

struct Slot {
    node: TreeNode,
    children: Vec<usize>,
}

/// Builds a [`TreeNode`] hierarchy from a flat recursive listing.
///
/// Every entry is registered under its full path first, then linked to the node
/// registered under its parent path (`""` for top-level entries). Entries whose
/// parent was never registered, or whose parent is a file, are dropped without
/// error. Repeated paths keep their first occurrence. Children keep listing order.
pub fn build_tree(root_name: &str, entries: impl IntoIterator<Item = FlatEntry>) -> TreeNode {
    let mut slots = vec![Slot {
        node: TreeNode::directory(root_name, ""),
        children: Vec::new(),
    }];
    let mut index: HashMap<String, usize> = HashMap::new();
    index.insert(String::new(), 0);

    let mut registered = Vec::new();
    for entry in entries {
        if entry.path.is_empty() || index.contains_key(&entry.path) {
            continue;
        }

        let name = entry
            .path
            .rsplit('/')
            .next()
            .unwrap_or(entry.path.as_str())
            .to_string();
        let node = match NodeKind::from(entry.kind) {
            NodeKind::Directory => TreeNode::directory(name, entry.path.clone()),
            NodeKind::File => TreeNode::file(name, entry.path.clone(), entry.size),
        };

        index.insert(entry.path, slots.len());
        registered.push(slots.len());
        slots.push(Slot {
            node,
            children: Vec::new(),
        });
    }

    let mut orphans = 0usize;
    for id in registered {
        let parent_path = match slots[id].node.path.rfind('/') {
            Some(pos) => &slots[id].node.path[..pos],
            None => "",
        };

        match index.get(parent_path) {
            Some(&parent) if slots[parent].node.is_dir() => slots[parent].children.push(id),
            _ => orphans += 1,
        }
    }

    if orphans > 0 {
        debug!(orphans, "Dropped tree entries without a registered parent directory");
    }

    assemble(&mut slots, 0)
}

fn assemble(slots: &mut [Slot], id: usize) -> TreeNode {
    let child_ids = std::mem::take(&mut slots[id].children);
    let children: Vec<TreeNode> = child_ids
        .into_iter()
        .map(|child| assemble(slots, child))
        .collect();

    let mut node = std::mem::replace(&mut slots[id].node, TreeNode::file("", "", None));
    if node.is_dir() {
        node.children = Some(children);
    }
    node
}
