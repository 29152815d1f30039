//! Technology stack inference from repository manifest files.
//!
//! Classification runs in two passes over the root directory's direct children:
//!
//! 1. **Presence detection**: marker files and directories (`package.json`, `go.mod`,
//!    `Dockerfile`, `k8s/`, ...) contribute labels just by existing.
//! 2. **Content rules**: manifests that carry a dependency list are read through a
//!    [`ContentFetcher`] and matched against a table of dependency keys or substrings.
//!
//! Both passes are data-driven (see [`rules`]). Each manifest read produces its own
//! [`Contribution`]; the [`StackDescriptor`] is assembled and deduplicated only after
//! every read has settled.
//!
//! # Example
//!
//! ```no_run
//! use codeviz::stack::{ContentFetcher, StackClassifier};
//! use codeviz::tree::TreeNode;
//!
//! # async fn example(root: TreeNode, fetcher: &dyn ContentFetcher) {
//! let classifier = StackClassifier::with_defaults();
//! let stack = classifier.classify(&root, fetcher).await;
//! println!("languages: {:?}", stack.languages);
//! # }
//! ```

mod category;
mod classifier;
mod descriptor;
pub mod rules;

pub use category::{Category, Contribution};
pub use classifier::{ContentFetcher, StackClassifier};
pub use descriptor::StackDescriptor;
pub use rules::{ContentRule, ManifestFormat, ManifestRule, Presence, PresenceRule};
