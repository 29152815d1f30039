//! Top-level repository analysis
//!
//! [`Analyzer`] fetches metadata and the recursive listing, builds the tree and
//! classifies the stack. A metadata or tree failure ends the analysis before
//! classification starts. [`AnalysisSession`] layers last-requested-wins
//! ordering on top for callers that may issue overlapping requests.

use crate::github::{FetchError, RepoDetails, RepoRef, RepositorySource};
use crate::stack::{ContentFetcher, StackClassifier, StackDescriptor};
use crate::tree::{build_tree, TreeNode, TreeStats};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to fetch repository data. Check the URL or try again later.")]
    Fetch(#[from] FetchError),
}

/// Everything the presentation layer shows for one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub details: RepoDetails,
    pub branch: String,
    pub stats: TreeStats,
    pub stack: StackDescriptor,
    pub tree: TreeNode,
}

/// Metadata and tree of a repository, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRepository {
    pub details: RepoDetails,
    pub branch: String,
    pub tree: TreeNode,
}

/// Binds a [`RepositorySource`] to one repository for the classifier
pub struct RepoContentFetcher<'a> {
    source: &'a dyn RepositorySource,
    repo: &'a RepoRef,
}

impl<'a> RepoContentFetcher<'a> {
    pub fn new(source: &'a dyn RepositorySource, repo: &'a RepoRef) -> Self {
        Self { source, repo }
    }
}

#[async_trait]
impl<'a> ContentFetcher for RepoContentFetcher<'a> {
    async fn read_file(&self, path: &str) -> anyhow::Result<Option<String>> {
        Ok(self.source.fetch_file(self.repo, path).await)
    }
}

pub struct Analyzer {
    source: Arc<dyn RepositorySource>,
    classifier: StackClassifier,
}

impl Analyzer {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self::with_classifier(source, StackClassifier::with_defaults())
    }

    pub fn with_classifier(source: Arc<dyn RepositorySource>, classifier: StackClassifier) -> Self {
        Self { source, classifier }
    }

    /// Fetches metadata, then the tree of `branch` or the default branch
    pub async fn fetch_repository(
        &self,
        repo: &RepoRef,
        branch: Option<&str>,
    ) -> Result<FetchedRepository, AnalysisError> {
        let details = self.source.fetch_details(repo).await.map_err(|e| {
            error!(repo = %repo, error = %e, "Failed to fetch repository metadata");
            e
        })?;

        let branch = branch.unwrap_or(&details.default_branch).to_string();
        let entries = self.source.fetch_tree(repo, &branch).await.map_err(|e| {
            error!(repo = %repo, branch = %branch, error = %e, "Failed to fetch repository tree");
            e
        })?;

        let tree = build_tree(&details.name, entries);
        Ok(FetchedRepository {
            details,
            branch,
            tree,
        })
    }

    pub async fn analyze(
        &self,
        repo: &RepoRef,
        branch: Option<&str>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let start = Instant::now();
        info!(repo = %repo, "Analyzing repository");

        let fetched = self.fetch_repository(repo, branch).await?;
        let fetcher = RepoContentFetcher::new(self.source.as_ref(), repo);
        let stack = self.classifier.classify(&fetched.tree, &fetcher).await;
        let stats = fetched.tree.stats();

        info!(
            repo = %repo,
            files = stats.files,
            folders = stats.folders,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            details: fetched.details,
            branch: fetched.branch,
            stats,
            stack,
            tree: fetched.tree,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The result belongs to the latest request and is now current
    Applied(Arc<AnalysisReport>),
    /// A newer request started while this one was in flight
    Superseded,
}

/// Serializes overlapping analyses so that only the latest request is applied
///
/// Every request takes a new epoch. A completed request is applied only if no
/// newer one has started since, regardless of completion order.
pub struct AnalysisSession {
    analyzer: Analyzer,
    epoch: AtomicU64,
    current: Mutex<Option<Arc<AnalysisReport>>>,
}

impl AnalysisSession {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            epoch: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    pub async fn request(
        &self,
        repo: &RepoRef,
        branch: Option<&str>,
    ) -> Result<SessionOutcome, AnalysisError> {
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.analyzer.analyze(repo, branch).await;

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if self.epoch.load(Ordering::SeqCst) != ticket {
            debug!(repo = %repo, ticket, "Discarding superseded analysis");
            return Ok(SessionOutcome::Superseded);
        }

        match result {
            Ok(report) => {
                let report = Arc::new(report);
                *current = Some(Arc::clone(&report));
                Ok(SessionOutcome::Applied(report))
            }
            Err(e) => {
                *current = None;
                Err(e)
            }
        }
    }

    /// Report of the most recently applied request, if it succeeded
    pub fn current(&self) -> Option<Arc<AnalysisReport>> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}
