//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use pygate::output::OutputMode;

/// pygate - fail-fast quality gates for Python codebases
#[derive(Parser, Debug)]
#[command(
    name = "pygate",
    version,
    about = "Fail-fast quality gates for Python codebases",
    long_about = "Run format, unused-import and strict-type checks over the\n\
                  tracked *.py files of a repository, the way a CI quality\n\
                  gate would: fixed order, first failure stops the run."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline: environment setup, then all quality gates
    Run {
        /// Skip the pip upgrade/install steps (tools assumed present)
        #[arg(long)]
        no_install: bool,
    },

    /// Run only the quality gates (no interpreter probe, no installs)
    Check,

    /// Print the checked file set, one path per line
    Files,

    /// Write a default .pygate.toml to the repository root
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let root = cli.directory.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Command::Run { no_install }) => commands::run(&root, no_install, output_mode),
        Some(Command::Check) => commands::check(&root, output_mode),
        Some(Command::Files) => commands::files(&root, output_mode),
        Some(Command::Init { force }) => commands::init(&root, force, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("pygate v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("pygate v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'pygate --help' for usage");
                println!("Run 'pygate run' to execute all quality gates");
            }
            Ok(())
        },
    }
}
