//! Repository file tree model
//!
//! A [`TreeNode`] hierarchy is built once per analysis from the flat, recursive
//! listing returned by the repository API (see [`build_tree`]) and is treated as
//! immutable afterwards. Both the stack classifier and the layout engine read it.
//!
//! # Example
//!
//! ```
//! use codeviz::tree::{build_tree, EntryKind, FlatEntry};
//!
//! let root = build_tree(
//!     "demo",
//!     vec![
//!         FlatEntry::new("src", EntryKind::Tree, None),
//!         FlatEntry::new("src/main.rs", EntryKind::Blob, Some(120)),
//!     ],
//! );
//!
//! assert_eq!(root.children().len(), 1);
//! assert_eq!(root.find("src/main.rs").map(|n| n.name.as_str()), Some("main.rs"));
//! ```

mod builder;

pub use builder::build_tree;

use serde::{Deserialize, Serialize};

/// Kind of a filesystem entry in the tree model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

/// Kind of an entry as reported by the recursive listing API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
}

impl From<EntryKind> for NodeKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Blob => NodeKind::File,
            EntryKind::Tree => NodeKind::Directory,
        }
    }
}

/// One row of a recursive repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FlatEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind,
            size,
        }
    }
}

/// A file or directory in the repository hierarchy
///
/// The root node has an empty `path`. Directories always carry `Some(children)`
/// (possibly empty), files always carry `None`. Child order is the listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            size: None,
            children: Some(Vec::new()),
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            size,
            children: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Direct children, empty for files
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Direct child whose name matches `name` case-insensitively
    pub fn child_named(&self, name: &str) -> Option<&TreeNode> {
        let wanted = name.to_lowercase();
        self.children()
            .iter()
            .find(|child| child.name.to_lowercase() == wanted)
    }

    /// Looks up a descendant by its full slash-separated path
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children()
            .iter()
            .filter(|child| path == child.path || path.starts_with(&format!("{}/", child.path)))
            .find_map(|child| child.find(path))
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        stats.collect(self);
        if self.is_dir() {
            // the root folder itself is not counted
            stats.folders = stats.folders.saturating_sub(1);
        }
        stats
    }
}

/// File and folder counts of a tree, excluding the root folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub files: usize,
    pub folders: usize,
}

impl TreeStats {
    fn collect(&mut self, node: &TreeNode) {
        match node.kind {
            NodeKind::Directory => {
                self.folders += 1;
                for child in node.children() {
                    self.collect(child);
                }
            }
            NodeKind::File => self.files += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        build_tree(
            "repo",
            vec![
                FlatEntry::new("README.md", EntryKind::Blob, Some(10)),
                FlatEntry::new("src", EntryKind::Tree, None),
                FlatEntry::new("src/lib.rs", EntryKind::Blob, Some(20)),
                FlatEntry::new("src/util", EntryKind::Tree, None),
                FlatEntry::new("src/util/mod.rs", EntryKind::Blob, Some(30)),
            ],
        )
    }

    #[test]
    fn test_entry_kind_maps_to_node_kind() {
        assert_eq!(NodeKind::from(EntryKind::Blob), NodeKind::File);
        assert_eq!(NodeKind::from(EntryKind::Tree), NodeKind::Directory);
    }

    #[test]
    fn test_flat_entry_deserializes_api_shape() {
        let entry: FlatEntry =
            serde_json::from_str(r#"{"path":"src/a.rs","type":"blob","size":42}"#).unwrap();
        assert_eq!(entry, FlatEntry::new("src/a.rs", EntryKind::Blob, Some(42)));

        let dir: FlatEntry = serde_json::from_str(r#"{"path":"src","type":"tree"}"#).unwrap();
        assert_eq!(dir.kind, EntryKind::Tree);
        assert_eq!(dir.size, None);
    }

    #[test]
    fn test_child_named_is_case_insensitive() {
        let root = sample();
        assert_eq!(root.child_named("readme.MD").unwrap().path, "README.md");
        assert!(root.child_named("lib.rs").is_none());
    }

    #[test]
    fn test_find_nested() {
        let root = sample();
        assert_eq!(root.find("").unwrap().name, "repo");
        assert_eq!(root.find("src/util/mod.rs").unwrap().size, Some(30));
        assert!(root.find("src/missing.rs").is_none());
    }

    #[test]
    fn test_stats_exclude_root() {
        let stats = sample().stats();
        assert_eq!(stats.files, 3);
        assert_eq!(stats.folders, 2);

        let empty = TreeNode::directory("empty", "").stats();
        assert_eq!(empty, TreeStats::default());
    }

    #[test]
    fn test_files_have_no_children() {
        let file = TreeNode::file("a.rs", "a.rs", Some(1));
        assert!(file.children.is_none());
        assert!(file.children().is_empty());
        assert!(!file.is_dir());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let file = TreeNode::file("a.rs", "a.rs", None);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["kind"], "file");
        assert!(json.get("size").is_none());
        assert!(json.get("children").is_none());
    }
}
