//! codeviz - repository structure visualizer and technology stack classifier
//!
//! Turns a hosted repository's flat recursive file listing into a tree,
//! classifies the technologies it uses from marker files and dependency
//! manifests, and computes a positioned node/edge graph of the tree.
//!
//! # Core Concepts
//!
//! - **Tree model** ([`tree`]): flat `{path, kind, size}` entries are assembled
//!   into a [`TreeNode`] hierarchy; entries whose parent is missing are dropped.
//! - **Stack classification** ([`stack`]): declarative presence and content
//!   rules produce a [`StackDescriptor`] of languages, frontend, backend,
//!   tools and AI/ML labels.
//! - **Layout** ([`layout`]): a pure function from a tree and
//!   [`LayoutOptions`] to a [`GraphLayout`] in tree or radial form.
//! - **Repository access** ([`github`]): the [`RepositorySource`] seam and its
//!   GitHub REST implementation.
//!
//! # Example Usage
//!
//! ```no_run
//! use codeviz::{compute_layout, parse_repo_url, Analyzer, CodevizConfig, GitHubClient, LayoutOptions};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CodevizConfig::default();
//! let client = GitHubClient::from_config(&config)?;
//! let analyzer = Analyzer::new(Arc::new(client));
//!
//! let repo = parse_repo_url("https://github.com/facebook/react")?;
//! let report = analyzer.analyze(&repo, None).await?;
//! println!("Frontend: {:?}", report.stack.frontend);
//!
//! let graph = compute_layout(&report.tree, &LayoutOptions::default());
//! println!("{} nodes", graph.nodes.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod github;
pub mod layout;
pub mod stack;
pub mod tree;
pub mod util;

pub use analysis::{AnalysisError, AnalysisReport, AnalysisSession, Analyzer, SessionOutcome};
pub use config::{CodevizConfig, ConfigError};
pub use github::{parse_repo_url, FetchError, GitHubClient, RepoDetails, RepoRef, RepositorySource};
pub use layout::{compute_layout, GraphLayout, LayoutMode, LayoutOptions, Theme};
pub use stack::{Category, ContentFetcher, StackClassifier, StackDescriptor};
pub use tree::{build_tree, FlatEntry, NodeKind, TreeNode};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
