//! tq: Terser Query - CLI for parsing and checking HL7 terser paths.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;

use config::Format;

#[derive(Parser)]
#[command(name = "tq")]
#[command(about = "Terser Query - parse and check HL7 terser paths")]
#[command(version)]
struct Cli {
    /// Config file (default: $TQ_CONFIG, then the platform config dir)
    #[arg(long = "config", global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse paths and print the resulting query
    #[command(visible_alias = "p")]
    Parse {
        /// Terser paths (e.g., PID-3, MSH(1)-9-2, OBX(2)-5(1)-1-1)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Output format (overrides config)
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<Format>,
    },

    /// Validate paths; reads one path per line from stdin when none are given
    #[command(visible_alias = "c")]
    Check {
        /// Terser paths to validate
        paths: Vec<String>,

        /// Only report failures
        #[arg(short = 'q', long = "quiet")]
        quiet: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Parse { paths, format } => commands::parse(&paths, format, config_path),
        Commands::Check { paths, quiet } => commands::check(&paths, quiet),
        Commands::Config => commands::config(config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
