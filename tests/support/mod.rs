//! In-memory repository source shared by the integration tests

use async_trait::async_trait;
use codeviz::github::{FetchError, RepoDetails, RepoRef, RepositorySource};
use codeviz::tree::{EntryKind, FlatEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
pub struct MockRepository {
    entries: Vec<FlatEntry>,
    files: HashMap<String, String>,
    failing_files: Vec<String>,
    fail_tree: bool,
    gate: Option<Arc<Notify>>,
    reads: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.entries.push(FlatEntry::new(path, EntryKind::Tree, None));
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.entries
            .push(FlatEntry::new(path, EntryKind::Blob, Some(content.len() as u64)));
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Listed file whose content cannot be read
    pub fn with_unreadable_file(mut self, path: &str) -> Self {
        self.entries.push(FlatEntry::new(path, EntryKind::Blob, None));
        self.failing_files.push(path.to_string());
        self
    }

    pub fn with_failing_tree(mut self) -> Self {
        self.fail_tree = true;
        self
    }

    /// Holds `fetch_details` until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositorySource for MockRepository {
    async fn fetch_details(&self, repo: &RepoRef) -> Result<RepoDetails, FetchError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(RepoDetails {
            owner: repo.owner.clone(),
            name: repo.name.clone(),
            description: format!("{} fixture", repo.name),
            stars: 10,
            forks: 2,
            language: "Unknown".to_string(),
            default_branch: "main".to_string(),
        })
    }

    async fn fetch_tree(&self, _repo: &RepoRef, _branch: &str) -> Result<Vec<FlatEntry>, FetchError> {
        if self.fail_tree {
            return Err(FetchError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(self.entries.clone())
    }

    async fn fetch_file(&self, _repo: &RepoRef, path: &str) -> Option<String> {
        self.reads.lock().unwrap().push(path.to_string());
        if self.failing_files.iter().any(|p| p == path) {
            return None;
        }
        self.files.get(path).cloned()
    }
}
