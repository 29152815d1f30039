use codeviz::cli::commands::{CliArgs, Commands};
use codeviz::cli::handlers::{handle_analyze, handle_graph, EXIT_INVALID_INPUT};
use codeviz::util::logging::{init_logging, parse_level, LoggingConfig};
use codeviz::{CodevizConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("codeviz v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let config = CodevizConfig::default();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_INVALID_INPUT);
    }

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args, &config).await,
        Commands::Graph(graph_args) => handle_graph(graph_args, &config).await,
    };

    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over `CODEVIZ_LOG_LEVEL`
fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();
    config.level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        config.level
    };

    init_logging(config);
}
