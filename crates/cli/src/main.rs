// wellstat CLI - batch pipeline driver (reconcile raw tables, analyze, write results)

mod exit_codes;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "wellstat")]
#[command(about = "Country-statistics reconciliation and deviation analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reconcile-then-analyze pipeline from a TOML config file
    #[command(after_help = "\
Examples:
  wellstat run pipeline.toml
  wellstat run pipeline.toml --json
  wellstat run pipeline.toml --output-dir out/")]
    Run {
        /// Path to the pipeline .toml config file
        config: PathBuf,

        /// Output the full result envelope as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Override the config's output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate a pipeline config without running
    #[command(after_help = "\
Examples:
  wellstat validate pipeline.toml")]
    Validate {
        /// Path to the pipeline .toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output_dir } => pipeline::cmd_run(config, json, output_dir),
        Commands::Validate { config } => pipeline::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }
}
