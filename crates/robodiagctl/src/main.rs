//! Robodiag Control - ask for an AI diagnosis of a robot snapshot

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use robodiag_common::DiagnosisConfig;
use robodiagctl::{commands, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "robodiagctl")]
#[command(about = "Robot diagnosis - AI analysis of robot logs and state", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/robodiag/config.toml, then /etc/robodiag/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a diagnosis for a snapshot
    Diagnose {
        /// JSON file with `logs` and `state` (initial state if omitted)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Print the request a diagnosis would send
    Prompt {
        /// JSON file with `logs` and `state` (initial state if omitted)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Print the initial robot state, obstacles and cargo box
    State,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Diagnose { snapshot } => {
            let config = DiagnosisConfig::load(cli.config.as_deref())?;
            let snapshot = commands::load_snapshot(snapshot.as_deref())?;
            println!("{}", commands::diagnose(&config, &snapshot).await);
        }
        Commands::Prompt { snapshot } => {
            let config = DiagnosisConfig::load(cli.config.as_deref())?;
            let snapshot = commands::load_snapshot(snapshot.as_deref())?;
            println!("{}", commands::render_prompt(&config, &snapshot));
        }
        Commands::State => {
            println!("{}", commands::initial_state_json()?);
        }
    }

    Ok(())
}
