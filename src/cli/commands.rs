use crate::layout::{LayoutMode, Theme};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Repository structure visualizer and technology stack classifier
#[derive(Parser, Debug)]
#[command(
    name = "codeviz",
    about = "Visualize GitHub repository structure and detect its technology stack",
    version,
    author,
    long_about = "codeviz fetches a GitHub repository's file tree, classifies its technology \
                  stack from marker files and dependency manifests, and lays the tree out as \
                  a node/edge graph in tree or radial form."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Summarize a repository and classify its technology stack",
        long_about = "Fetches repository metadata and the recursive file listing, then \
                      classifies languages, frameworks, tools and AI/ML libraries.\n\n\
                      Examples:\n  \
                      codeviz analyze https://github.com/facebook/react\n  \
                      codeviz analyze tokio-rs/tokio --format json\n  \
                      codeviz analyze owner/repo --branch develop -o report.yaml -f yaml"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Compute the dependency graph layout of a repository tree",
        long_about = "Fetches the repository tree and computes node positions, colors and \
                      search emphasis.\n\n\
                      Examples:\n  \
                      codeviz graph facebook/react\n  \
                      codeviz graph facebook/react --mode radial --theme depth\n  \
                      codeviz graph facebook/react --search hooks --format json"
    )]
    Graph(GraphArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "URL", help = "GitHub repository URL or owner/repo")]
    pub url: String,

    #[arg(
        short = 'b',
        long,
        value_name = "BRANCH",
        help = "Branch, tag or commit to analyze (defaults to the repository's default branch)"
    )]
    pub branch: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[arg(value_name = "URL", help = "GitHub repository URL or owner/repo")]
    pub url: String,

    #[arg(short = 'b', long, value_name = "BRANCH", help = "Branch, tag or commit")]
    pub branch: Option<String>,

    #[arg(long, value_enum, default_value = "tree", help = "Layout mode")]
    pub mode: LayoutModeArg,

    #[arg(long, value_enum, default_value = "extension", help = "Node color theme")]
    pub theme: ThemeArg,

    #[arg(
        long,
        value_name = "N",
        help = "Deepest level shown while no search is active (defaults to CODEVIZ_MAX_DEPTH or 4)"
    )]
    pub max_depth: Option<usize>,

    #[arg(
        short = 's',
        long,
        value_name = "QUERY",
        help = "Highlight nodes whose name contains QUERY; matching nodes bypass the depth limit"
    )]
    pub search: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutModeArg {
    Tree,
    Radial,
}

impl From<LayoutModeArg> for LayoutMode {
    fn from(arg: LayoutModeArg) -> Self {
        match arg {
            LayoutModeArg::Tree => LayoutMode::Tree,
            LayoutModeArg::Radial => LayoutMode::Radial,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Standard,
    Extension,
    Depth,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Standard => Theme::Standard,
            ThemeArg::Extension => Theme::Extension,
            ThemeArg::Depth => Theme::Depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_analyze_args() {
        let args = CliArgs::parse_from(["codeviz", "analyze", "facebook/react"]);
        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.url, "facebook/react");
                assert_eq!(analyze_args.format, OutputFormatArg::Human);
                assert!(analyze_args.branch.is_none());
                assert!(analyze_args.output.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let args = CliArgs::parse_from([
            "codeviz",
            "analyze",
            "https://github.com/a/b",
            "--branch",
            "develop",
            "-f",
            "yaml",
            "-o",
            "/tmp/report.yaml",
        ]);
        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.branch.as_deref(), Some("develop"));
                assert_eq!(analyze_args.format, OutputFormatArg::Yaml);
                assert_eq!(analyze_args.output, Some(PathBuf::from("/tmp/report.yaml")));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_default_graph_args() {
        let args = CliArgs::parse_from(["codeviz", "graph", "a/b"]);
        match args.command {
            Commands::Graph(graph_args) => {
                assert_eq!(graph_args.mode, LayoutModeArg::Tree);
                assert_eq!(graph_args.theme, ThemeArg::Extension);
                assert!(graph_args.max_depth.is_none());
                assert!(graph_args.search.is_none());
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_graph_with_options() {
        let args = CliArgs::parse_from([
            "codeviz",
            "graph",
            "a/b",
            "--mode",
            "radial",
            "--theme",
            "depth",
            "--max-depth",
            "2",
            "--search",
            "hooks",
            "--format",
            "json",
        ]);
        match args.command {
            Commands::Graph(graph_args) => {
                assert_eq!(LayoutMode::from(graph_args.mode), LayoutMode::Radial);
                assert_eq!(Theme::from(graph_args.theme), Theme::Depth);
                assert_eq!(graph_args.max_depth, Some(2));
                assert_eq!(graph_args.search.as_deref(), Some("hooks"));
                assert_eq!(graph_args.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_missing_url_is_rejected() {
        assert!(CliArgs::try_parse_from(["codeviz", "analyze"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["codeviz", "-v", "analyze", "a/b"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["codeviz", "graph", "a/b", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["codeviz", "--log-level", "debug", "analyze", "a/b"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["codeviz", "-v", "-q", "analyze", "a/b"]).is_err());
    }
}
