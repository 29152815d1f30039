use crate::tree::{NodeKind, TreeNode};
use serde::{Deserialize, Serialize};

/// Color used for every edge regardless of theme
pub const EDGE_COLOR: &str = "#475569";

const STANDARD_FOLDER: &str = "#3b82f6";
const STANDARD_FILE: &str = "#64748b";

const EXTENSION_FOLDER: &str = "#3b82f6";
const EXTENSION_DEFAULT: &str = "#64748b";
const EXTENSION_GROUPS: &[(&[&str], &str)] = &[
    (&[".ts", ".tsx"], "#2563eb"),
    (&[".js", ".jsx"], "#facc15"),
    (&[".css", ".scss"], "#ec4899"),
    (&[".json"], "#f97316"),
];

const DEPTH_PALETTE: &[&str] = &["#3b82f6", "#60a5fa", "#93c5fd", "#bfdbfe", "#dbeafe"];

/// Node coloring scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Directories and files get one color each
    Standard,
    /// Files are colored by extension group
    #[default]
    Extension,
    /// Color fades with depth, clamped at the palette's last entry
    Depth,
}

impl Theme {
    pub fn color_for(&self, node: &TreeNode, depth: usize) -> &'static str {
        match self {
            Theme::Standard => match node.kind {
                NodeKind::Directory => STANDARD_FOLDER,
                NodeKind::File => STANDARD_FILE,
            },
            Theme::Extension => {
                if node.is_dir() {
                    return EXTENSION_FOLDER;
                }
                EXTENSION_GROUPS
                    .iter()
                    .find(|(suffixes, _)| suffixes.iter().any(|s| node.name.ends_with(s)))
                    .map(|(_, color)| *color)
                    .unwrap_or(EXTENSION_DEFAULT)
            }
            Theme::Depth => DEPTH_PALETTE[depth.min(DEPTH_PALETTE.len() - 1)],
        }
    }
}
