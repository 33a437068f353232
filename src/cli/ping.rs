//! Ping command - check the backend is reachable

use crate::cli::connect;
use crate::cli::style::{check, Stylize};
use anstream::println;
use assassin::backend::Backend;
use assassin::config::ClientConfig;
use assassin::error::Result;

/// Run the ping command
pub async fn run_ping(config: &ClientConfig) -> Result<()> {
    println!("Checking {}...", config.base_url().as_str().accent());
    let message = connect(config)?.health().await?;
    println!("{} {}", check(), message);
    Ok(())
}
