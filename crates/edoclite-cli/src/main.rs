mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edoclite")]
#[command(version, about = "eDocLite field validation tools", long_about = None)]
struct Cli {
    /// Log evaluation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate field values against a rule manifest
    Check {
        /// Rule manifest (.toml or .json)
        #[arg(short, long)]
        rules: PathBuf,

        /// JSON object of field values
        #[arg(long)]
        values: Option<PathBuf>,

        /// Field value as name=value (repeatable, overrides --values)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Report problems in a rule manifest
    Lint {
        /// Rule manifest (.toml or .json)
        #[arg(short, long)]
        rules: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let passed = match cli.command {
        Commands::Check { rules, values, set } => {
            commands::check::execute(&rules, values.as_deref(), &set)?
        }
        Commands::Lint { rules } => commands::lint::execute(&rules)?,
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
