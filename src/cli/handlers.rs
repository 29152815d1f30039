//! Command handlers
//!
//! Each handler returns the process exit code: [`EXIT_SUCCESS`],
//! [`EXIT_FAILURE`] when the analysis or output fails, [`EXIT_INVALID_INPUT`]
//! for a malformed URL or configuration.

use super::commands::{AnalyzeArgs, GraphArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::analysis::{AnalysisError, Analyzer};
use crate::config::CodevizConfig;
use crate::github::{parse_repo_url, GitHubClient, RepoRef, RepositorySource};
use crate::layout::{compute_layout, LayoutOptions};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;

pub async fn handle_analyze(args: &AnalyzeArgs, config: &CodevizConfig) -> i32 {
    let (repo, analyzer) = match prepare(&args.url, config) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let rendered = render_analysis(&analyzer, &repo, args.branch.as_deref(), args.format.into()).await;
    finish(rendered, args.output.as_deref())
}

pub async fn handle_graph(args: &GraphArgs, config: &CodevizConfig) -> i32 {
    let (repo, analyzer) = match prepare(&args.url, config) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let options = graph_options(args, config);
    let rendered = render_graph(
        &analyzer,
        &repo,
        args.branch.as_deref(),
        &options,
        args.format.into(),
    )
    .await;
    finish(rendered, args.output.as_deref())
}

/// Fetches, classifies and formats one repository
pub async fn render_analysis(
    analyzer: &Analyzer,
    repo: &RepoRef,
    branch: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let report = analyzer.analyze(repo, branch).await?;
    OutputFormatter::new(format).format_report(&report)
}

/// Fetches one repository tree and formats its layout
pub async fn render_graph(
    analyzer: &Analyzer,
    repo: &RepoRef,
    branch: Option<&str>,
    options: &LayoutOptions,
    format: OutputFormat,
) -> Result<String> {
    let fetched = analyzer.fetch_repository(repo, branch).await?;
    let layout = compute_layout(&fetched.tree, options);
    info!(
        repo = %repo,
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        "Layout computed"
    );
    OutputFormatter::new(format).format_graph(&layout)
}

pub fn graph_options(args: &GraphArgs, config: &CodevizConfig) -> LayoutOptions {
    let mut options = LayoutOptions::new(args.mode.into())
        .with_theme(args.theme.into())
        .with_max_depth(args.max_depth.unwrap_or(config.max_depth));
    if let Some(query) = &args.search {
        options = options.with_search(query.as_str());
    }
    options
}

fn prepare(url: &str, config: &CodevizConfig) -> Result<(RepoRef, Analyzer), i32> {
    let repo = parse_repo_url(url).map_err(|e| {
        eprintln!("Error: {}", e);
        EXIT_INVALID_INPUT
    })?;
    debug!(repo = %repo, "Parsed repository reference");

    let client = GitHubClient::from_config(config).map_err(|e| {
        eprintln!("Error: {}", e);
        EXIT_INVALID_INPUT
    })?;
    let source: Arc<dyn RepositorySource> = Arc::new(client);

    Ok((repo, Analyzer::new(source)))
}

fn finish(rendered: Result<String>, output: Option<&Path>) -> i32 {
    let content = match rendered {
        Ok(content) => content,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {}", e);
            if let Some(hint) = failure_hint(&e) {
                eprintln!("Hint: {}", hint);
            }
            return EXIT_FAILURE;
        }
    };

    match write_output(&content, output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

/// Extra guidance for failures the user can act on
pub fn failure_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::Fetch(fetch)) if fetch.is_rate_limited() => Some(
            "GitHub rate limit reached. Set CODEVIZ_GITHUB_TOKEN or GITHUB_TOKEN to raise it.",
        ),
        _ => None,
    }
}

pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "Output written");
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
