//! Send command - start the game by emailing every participant

use crate::cli::connect;
use crate::cli::progress::BarProgress;
use crate::cli::store::load_chain;
use crate::cli::style::{check, Stylize};
use anstream::println;
use assassin::config::ClientConfig;
use assassin::error::{Error, Result};
use assassin::session::{require_host_email, Organizer};
use dialoguer::Confirm;
use std::path::Path;
use std::sync::Arc;

/// Run the send command
pub async fn run_send(
    config: &ClientConfig,
    chain_file: &Path,
    host_email: &str,
    assume_yes: bool,
) -> Result<()> {
    let chain = load_chain(chain_file).await?;
    let host_email = require_host_email(host_email)?;
    let participants = chain.len();

    let organizer = Organizer::new(connect(config)?);
    organizer.restore_chain(chain)?;

    if !assume_yes {
        let prompt = format!("Email targets to all {participants} players now?");
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        if !confirmed {
            println!("{}", "Aborted - no emails sent".muted());
            return Ok(());
        }
    }

    let progress = Arc::new(BarProgress::new("Sending..."));
    let message = organizer.send_emails(host_email, progress).await?;

    println!("{} {}", check(), message.success());
    Ok(())
}
