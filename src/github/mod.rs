//! Hosted repository access
//!
//! [`RepositorySource`] is the seam between the analysis core and the remote
//! API. [`GitHubClient`] implements it over the GitHub REST API; tests plug in
//! in-memory sources.

mod client;
mod error;
pub mod url;

pub use client::GitHubClient;
pub use error::FetchError;
pub use url::{parse_repo_url, RepoRef, RepoUrlError};

use crate::tree::FlatEntry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Repository metadata shown alongside the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetails {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub default_branch: String,
}

#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_details(&self, repo: &RepoRef) -> Result<RepoDetails, FetchError>;

    /// Flat recursive listing of `branch`; an empty repository yields no entries
    async fn fetch_tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<FlatEntry>, FetchError>;

    /// Raw text of a file, `None` when binary, too large, missing or unreachable
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Option<String>;
}
