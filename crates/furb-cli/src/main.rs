//! Furb command-line interface
//!
//! Lints type-resolved syntax trees (JSON, one per source file), explains
//! error codes, lists checks, and scaffolds new checks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use furb_engine::{ErrorCode, OutputFormat, SortBy};

mod commands;
mod output;

use commands::check::CheckOptions;

#[derive(Parser)]
#[command(name = "furb")]
#[command(about = "Find idiomatic-usage problems in type-resolved syntax trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// When to use colors: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint syntax tree files
    Check {
        /// Tree files or directories to search for .json files
        paths: Vec<PathBuf>,
        /// Settings file (default: nearest furb.toml or pyproject.toml)
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// Error codes to drop from the output
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<ErrorCode>,
        /// Error codes to run even if disabled
        #[arg(long, value_delimiter = ',')]
        enable: Vec<ErrorCode>,
        /// Error codes not to run
        #[arg(long, value_delimiter = ',')]
        disable: Vec<ErrorCode>,
        /// Run every check
        #[arg(long)]
        enable_all: bool,
        /// Run only checks passed to --enable
        #[arg(long)]
        disable_all: bool,
        /// Output format: text or json
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Sort output by file or error
        #[arg(long)]
        sort: Option<SortBy>,
        /// Hide the explain hint
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the documentation of an error code
    Explain {
        /// Error code, e.g. FURB101
        code: ErrorCode,
    },

    /// List all checks
    List,

    /// Generate a new check interactively
    Gen,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let color = cli.color.as_deref();
    match cli.command {
        Commands::Check {
            paths,
            config_file,
            ignore,
            enable,
            disable,
            enable_all,
            disable_all,
            format,
            sort,
            quiet,
        } => commands::check::execute(
            CheckOptions {
                paths,
                config_file,
                ignore,
                enable,
                disable,
                enable_all,
                disable_all,
                format,
                sort,
                quiet,
            },
            color,
        ),

        Commands::Explain { code } => commands::explain::execute(code, color),

        Commands::List => commands::list::execute(color),

        Commands::Gen => commands::gen::execute(),
    }
}
