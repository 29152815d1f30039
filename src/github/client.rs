//! GitHub REST API client
//!
//! Implements [`RepositorySource`] with three endpoints:
//!
//! - `GET /repos/{owner}/{repo}` for metadata
//! - `GET /repos/{owner}/{repo}/commits/{ref}` then
//!   `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1` for the file listing
//! - `GET /repos/{owner}/{repo}/contents/{path}` for manifest contents

use super::{FetchError, RepoDetails, RepoRef, RepositorySource};
use crate::config::CodevizConfig;
use crate::tree::{EntryKind, FlatEntry};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    api_base: Url,
    token: Option<String>,
    http_client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    owner: OwnerResponse,
    name: String,
    description: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    language: Option<String>,
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    tree: ShaRef,
}

#[derive(Debug, Deserialize)]
struct ShaRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntryResponse>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntryResponse {
    path: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

impl From<RepoResponse> for RepoDetails {
    fn from(response: RepoResponse) -> Self {
        Self {
            owner: response.owner.login,
            name: response.name,
            description: response.description.unwrap_or_default(),
            stars: response.stargazers_count,
            forks: response.forks_count,
            language: response.language.unwrap_or_else(|| "Unknown".to_string()),
            default_branch: response.default_branch,
        }
    }
}

impl GitHubClient {
    pub fn new(api_base: &str, token: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        let api_base = Url::parse(api_base).map_err(|e| FetchError::InvalidUrl {
            message: format!("{}: {}", api_base, e),
        })?;

        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("codeviz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            api_base,
            token,
            http_client,
            timeout,
        })
    }

    pub fn from_config(config: &CodevizConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.api_base,
            config.github_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Builds `{api_base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                message: format!("{} cannot be a base URL", self.api_base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn repo_endpoint(&self, repo: &RepoRef, rest: &[&str]) -> Result<Url, FetchError> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str()];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(url = %url, "GET");
        let start = Instant::now();

        let mut request = self
            .http_client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("GitHub request timed out after {:?}", self.timeout);
                FetchError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
            } else if e.is_connect() {
                error!("Cannot connect to {}", self.api_base);
                FetchError::Network {
                    message: format!("Connection failed: {}", e),
                }
            } else {
                error!("GitHub request error: {}", e);
                FetchError::Network {
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: api_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        let parsed = response.json::<T>().await.map_err(|e| FetchError::InvalidResponse {
            message: format!("JSON parse error: {}", e),
        })?;

        debug!(url = %url, elapsed_ms = start.elapsed().as_millis() as u64, "GET complete");
        Ok(parsed)
    }

    async fn fetch_file_inner(&self, repo: &RepoRef, path: &str) -> Result<Option<String>, FetchError> {
        let mut rest = vec!["contents"];
        rest.extend(path.split('/').filter(|s| !s.is_empty()));
        let url = self.repo_endpoint(repo, &rest)?;

        let body: serde_json::Value = self.get_json(url).await?;
        Ok(decode_contents(&body))
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_details(&self, repo: &RepoRef) -> Result<RepoDetails, FetchError> {
        let url = self.repo_endpoint(repo, &[])?;
        let response: RepoResponse = self.get_json(url).await?;
        Ok(response.into())
    }

    async fn fetch_tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<FlatEntry>, FetchError> {
        let commit_url = self.repo_endpoint(repo, &["commits", branch])?;
        let commit: CommitResponse = match self.get_json(commit_url).await {
            Ok(commit) => commit,
            Err(FetchError::Status { status, .. }) if status == StatusCode::CONFLICT.as_u16() => {
                info!(repo = %repo, "Repository is empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut tree_url =
            self.repo_endpoint(repo, &["git", "trees", commit.commit.tree.sha.as_str()])?;
        tree_url.query_pairs_mut().append_pair("recursive", "1");

        let response: TreeResponse = self.get_json(tree_url).await?;
        if response.truncated {
            warn!(repo = %repo, "Tree listing was truncated by the API, graph will be partial");
        }

        let entries = flat_entries(response.tree);
        info!(repo = %repo, branch = %branch, entries = entries.len(), "Fetched repository tree");
        Ok(entries)
    }

    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Option<String> {
        match self.fetch_file_inner(repo, path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(repo = %repo, path = %path, error = %e, "Failed to fetch file content");
                None
            }
        }
    }
}

/// Keeps blobs and trees with a path; submodules and other kinds are skipped
fn flat_entries(tree: Vec<TreeEntryResponse>) -> Vec<FlatEntry> {
    tree.into_iter()
        .filter_map(|entry| {
            let kind = match entry.kind.as_str() {
                "blob" => EntryKind::Blob,
                "tree" => EntryKind::Tree,
                _ => return None,
            };
            let path = entry.path.filter(|p| !p.is_empty())?;
            Some(FlatEntry::new(path, kind, entry.size))
        })
        .collect()
}

/// Decodes a contents API body; directories and non-text payloads are `None`
fn decode_contents(body: &serde_json::Value) -> Option<String> {
    if body.is_array() {
        return None;
    }
    let encoded = body.get("content")?.as_str()?;
    if encoded.is_empty() {
        return None;
    }

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

fn api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
