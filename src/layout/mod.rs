//! Tree-to-graph layout engine
//!
//! [`compute_layout`] turns a [`TreeNode`] hierarchy into positioned nodes and
//! parent-child edges ready for a renderer. The computation is synchronous and
//! deterministic: identical inputs always produce identical coordinates.
//!
//! Traversal is depth-first pre-order. Nodes deeper than
//! [`LayoutOptions::max_depth`] are pruned unless a search query is active, in
//! which case the whole tree is laid out and non-matching nodes are dimmed.
//!
//! # Example
//!
//! ```
//! use codeviz::layout::{compute_layout, LayoutMode, LayoutOptions};
//! use codeviz::tree::{build_tree, EntryKind, FlatEntry};
//!
//! let root = build_tree("demo", vec![FlatEntry::new("a.rs", EntryKind::Blob, None)]);
//! let graph = compute_layout(&root, &LayoutOptions::new(LayoutMode::Radial));
//!
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.edges[0].id, "demo-a.rs");
//! ```

mod highlight;
pub mod position;
mod theme;

pub use highlight::{SearchHighlight, DIMMED_EMPHASIS, FULL_EMPHASIS};
pub use position::{AngularInterval, Position, PositionContext};
pub use theme::{Theme, EDGE_COLOR};

use crate::tree::{NodeKind, TreeNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default depth bound, applied when no search is active
pub const DEFAULT_MAX_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Tree,
    Radial,
}

/// Edge curve hint for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Bezier,
    Straight,
}

impl From<LayoutMode> for EdgeStyle {
    fn from(mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Tree => EdgeStyle::Bezier,
            LayoutMode::Radial => EdgeStyle::Straight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    pub max_depth: usize,
    pub mode: LayoutMode,
    pub theme: Theme,
    pub search_query: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            mode: LayoutMode::default(),
            theme: Theme::default(),
            search_query: String::new(),
        }
    }
}

impl LayoutOptions {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub label: String,
    pub position: Position,
    pub depth: usize,
    pub kind: NodeKind,
    pub emphasis: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub emphasis: f32,
    pub style: EdgeStyle,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&LayoutEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

/// One node's layout result plus the contexts its children inherit
#[derive(Debug, Clone)]
pub struct Placement {
    pub node: LayoutNode,
    pub edge: Option<LayoutEdge>,
    pub child_contexts: Vec<PositionContext>,
}

/// Lays out a single node without descending into its children
pub fn place_node(
    node: &TreeNode,
    id: String,
    depth: usize,
    parent_id: Option<&str>,
    context: PositionContext,
    options: &LayoutOptions,
    highlight: &SearchHighlight,
) -> Placement {
    let position = context.place(depth);
    let emphasis = highlight.emphasis(&node.name);

    let edge = parent_id.map(|parent| LayoutEdge {
        id: format!("{}-{}", parent, id),
        source: parent.to_string(),
        target: id.clone(),
        emphasis,
        style: EdgeStyle::from(options.mode),
        color: EDGE_COLOR.to_string(),
    });

    Placement {
        child_contexts: context.children(position, node.children().len()),
        node: LayoutNode {
            id,
            label: node.name.clone(),
            position,
            depth,
            kind: node.kind,
            emphasis,
            color: options.theme.color_for(node, depth).to_string(),
        },
        edge,
    }
}

/// Computes the positioned node and edge sets for `root`
pub fn compute_layout(root: &TreeNode, options: &LayoutOptions) -> GraphLayout {
    let highlight = SearchHighlight::new(&options.search_query);
    let mut graph = GraphLayout::default();

    walk(
        root,
        root_id(root),
        0,
        None,
        PositionContext::root(options.mode),
        options,
        &highlight,
        &mut graph,
    );

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        mode = ?options.mode,
        search = highlight.is_active(),
        "Computed layout"
    );
    graph
}

#[allow(clippy::too_many_arguments)]
fn walk(
    node: &TreeNode,
    id: String,
    depth: usize,
    parent_id: Option<&str>,
    context: PositionContext,
    options: &LayoutOptions,
    highlight: &SearchHighlight,
    graph: &mut GraphLayout,
) {
    if !highlight.is_active() && depth > options.max_depth {
        return;
    }

    let placement = place_node(node, id, depth, parent_id, context, options, highlight);
    let own_id = placement.node.id.clone();
    graph.nodes.push(placement.node);
    graph.edges.extend(placement.edge);

    for (child, child_context) in node.children().iter().zip(placement.child_contexts) {
        walk(
            child,
            child.path.clone(),
            depth + 1,
            Some(&own_id),
            child_context,
            options,
            highlight,
            graph,
        );
    }
}

/// Root id is its name; prefixed with `/` when a top-level path shares it
fn root_id(root: &TreeNode) -> String {
    if !root.path.is_empty() {
        return root.path.clone();
    }
    if root.children().iter().any(|c| c.path == root.name) {
        format!("/{}", root.name)
    } else {
        root.name.clone()
    }
}
