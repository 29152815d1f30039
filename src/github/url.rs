use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoUrlError {
    #[error("Invalid GitHub URL '{0}'. Please use format: https://github.com/owner/repo")]
    Invalid(String),
}

/// Owner and name identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Extracts owner and repository from a GitHub URL or an `owner/repo` shorthand.
///
/// Query strings, fragments and a trailing `.git` on the repository name are
/// dropped.
pub fn parse_repo_url(input: &str) -> Result<RepoRef, RepoUrlError> {
    let input = input.trim();
    let url_re = Regex::new(r"github\.com/([^/?#]+)/([^/?#]+)").expect("valid regex");
    let shorthand_re = Regex::new(r"^([\w.-]+)/([\w.-]+)$").expect("valid regex");

    let captures = url_re
        .captures(input)
        .or_else(|| shorthand_re.captures(input))
        .ok_or_else(|| RepoUrlError::Invalid(input.to_string()))?;

    let owner = &captures[1];
    let name = captures[2].strip_suffix(".git").unwrap_or(&captures[2]);
    if name.is_empty() {
        return Err(RepoUrlError::Invalid(input.to_string()));
    }

    Ok(RepoRef::new(owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        https = { "https://github.com/facebook/react", "facebook", "react" },
        trailing_git = { "https://github.com/rust-lang/cargo.git", "rust-lang", "cargo" },
        no_scheme = { "github.com/tokio-rs/tokio", "tokio-rs", "tokio" },
        deep_link = { "https://github.com/serde-rs/serde/tree/master/serde", "serde-rs", "serde" },
        padded = { "  https://github.com/a/b  ", "a", "b" },
        query = { "https://github.com/facebook/react?tab=readme-ov-file", "facebook", "react" },
        fragment = { "https://github.com/facebook/react#readme", "facebook", "react" },
        git_suffix_with_query = { "https://github.com/rust-lang/cargo.git?x=1", "rust-lang", "cargo" },
        shorthand = { "octocat/Hello-World", "octocat", "Hello-World" },
    )]
    fn test_parse_valid(input: &str, owner: &str, name: &str) {
        assert_eq!(parse_repo_url(input).unwrap(), RepoRef::new(owner, name));
    }

    #[parameterized(
        empty = { "" },
        owner_only = { "https://github.com/facebook" },
        other_host = { "https://gitlab.com/group" },
        bare_word = { "react" },
        only_git_suffix = { "https://github.com/owner/.git" },
    )]
    fn test_parse_invalid(input: &str) {
        assert!(matches!(parse_repo_url(input), Err(RepoUrlError::Invalid(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(RepoRef::new("owner", "repo").to_string(), "owner/repo");
    }
}
