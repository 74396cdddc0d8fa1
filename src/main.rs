//! fabric-tools: Network fabric state snapshot, diff, and validation tool
//!
//! Compares point-in-time captures of device state, verifies LLDP topology,
//! and runs validation batteries for change windows and CI pipelines.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use fabric_tools::{
    cli::{self, DiffConfig, TopologyConfig, ValidateConfig},
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fabric-tools")]
#[command(version)]
#[command(about = "Network fabric state snapshot, diff, and validation tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected / all checks passed
    1  Changes detected or validation failures found
    3  Error occurred

EXAMPLES:
    # Compare pre- and post-change captures of one device
    fabric-tools diff leaf1_pre.json leaf1_post.json

    # CI/CD pipeline check
    fabric-tools diff leaf1_pre.json leaf1_post.json -o summary

    # Validate captured state
    fabric-tools validate snapshots/leaf1_post-change_*.json

    # Verify fabric topology against the design
    fabric-tools topology snapshots/*_post-change_*.json \\
        --expected fabric.yaml --strict")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the pre-change snapshot
    pre: PathBuf,

    /// Path to the post-change snapshot
    post: PathBuf,

    /// Output format
    #[arg(short = 'o', long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit 0 even when changes are detected
    #[arg(long)]
    no_fail_on_change: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Snapshot files to validate
    #[arg(required = true)]
    snapshots: Vec<PathBuf>,

    /// Combined per-interface error count tolerated before the error check fails
    #[arg(long, default_value = "0")]
    error_threshold: u64,

    /// Output format
    #[arg(short = 'o', long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `topology` subcommand
#[derive(Parser)]
struct TopologyArgs {
    /// Snapshot files, one per device, captured at a comparable point in time
    #[arg(required = true)]
    snapshots: Vec<PathBuf>,

    /// Expected-topology YAML file (pairs and full-mesh rules)
    #[arg(long)]
    expected: Option<PathBuf>,

    /// Also flag confirmed adjacencies missing from the expected topology
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short = 'o', long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two snapshots of the same device
    Diff(DiffArgs),

    /// Run the validation battery against captured snapshots
    Validate(ValidateArgs),

    /// Build and verify the LLDP adjacency graph across devices
    Topology(TopologyArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            cli::exit_codes::ERROR
        }
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Diff(args) => Ok(cli::run_diff(DiffConfig {
            pre: args.pre,
            post: args.post,
            format: args.output,
            output_file: args.output_file,
            no_fail_on_change: args.no_fail_on_change,
        })?),

        Commands::Validate(args) => Ok(cli::run_validate(ValidateConfig {
            snapshots: args.snapshots,
            error_threshold: args.error_threshold,
            format: args.output,
            output_file: args.output_file,
        })?),

        Commands::Topology(args) => Ok(cli::run_topology(TopologyConfig {
            snapshots: args.snapshots,
            expected: args.expected,
            strict: args.strict,
            format: args.output,
            output_file: args.output_file,
        })?),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(cli::exit_codes::SUCCESS)
        }
    }
}
