//! assassin - target chains for the assassin party game
//!
//! CLI binary for generating, exporting and announcing target chains, and
//! for player check-ins.

use anyhow::Result;
use assassin::chain::ARTIFACT_FILE_NAME;
use assassin::config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::Stylize;

#[derive(Parser)]
#[command(name = "assassin")]
#[command(about = "Target chains and check-ins for the assassin game")]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds (email dispatch is never cut short)
    #[arg(long, global = true, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Chain file written by `generate` and read by the other chain commands
    #[arg(long, global = true, default_value = cli::DEFAULT_CHAIN_FILE)]
    chain_file: PathBuf,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a roster CSV (name,email) and save the generated chain
    Generate {
        /// Roster CSV file
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// Organizer email
        #[arg(long, default_value = "")]
        host_email: String,

        /// Print the chain right away
        #[arg(long)]
        reveal: bool,
    },

    /// Print the saved chain in order
    Show,

    /// Write the saved chain as `A → B` lines
    Export {
        /// Output file
        #[arg(short, long, default_value = ARTIFACT_FILE_NAME)]
        out: PathBuf,
    },

    /// Email every participant their target
    Send {
        /// Organizer email
        #[arg(long, default_value = "")]
        host_email: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Submit a check-in selfie
    CheckIn {
        /// Your name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Selfie image file
        #[arg(short, long)]
        selfie: Option<PathBuf>,

        /// This device can take photos directly
        #[arg(long)]
        camera: bool,
    },

    /// List recent check-ins
    CheckIns,

    /// Download a check-in selfie
    Image {
        /// Image reference from `check-ins`
        reference: String,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Check the backend is reachable
    Ping,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "assassin=debug" } else { "assassin=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::new(&cli.api_url, Duration::from_secs(cli.timeout))?;
    let chain_file = cli.chain_file.as_path();

    match cli.command {
        Commands::Generate {
            roster,
            host_email,
            reveal,
        } => {
            cli::run_generate(&config, roster.as_deref(), &host_email, chain_file, reveal).await?;
        }
        Commands::Show => cli::run_show(chain_file).await?,
        Commands::Export { out } => cli::run_export(chain_file, &out).await?,
        Commands::Send { host_email, yes } => {
            cli::run_send(&config, chain_file, &host_email, yes).await?;
        }
        Commands::CheckIn {
            name,
            selfie,
            camera,
        } => cli::run_check_in(&config, &name, selfie.as_deref(), camera).await?,
        Commands::CheckIns => cli::run_check_ins(&config).await?,
        Commands::Image { reference, out } => cli::run_image(&config, &reference, &out).await?,
        Commands::Ping => cli::run_ping(&config).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        anstream::eprintln!("{} {}", cli::cross(), e.to_string().error());
        std::process::exit(1);
    }
}
