//! CLI commands
//!
//! Command implementations for the `assassin` binary.

mod checkin;
mod export;
mod generate;
mod ping;
mod progress;
mod send;
mod store;
mod style;

pub use checkin::{run_check_in, run_check_ins, run_image};
pub use export::{run_export, run_show};
pub use generate::run_generate;
pub use ping::run_ping;
pub use send::run_send;
pub use store::DEFAULT_CHAIN_FILE;
pub use style::{cross, Stylize};

use assassin::backend::HttpBackend;
use assassin::config::ClientConfig;
use assassin::error::Result;
use std::sync::Arc;

/// Build the HTTP backend for a config
fn connect(config: &ClientConfig) -> Result<Arc<HttpBackend>> {
    Ok(Arc::new(HttpBackend::new(config.clone())?))
}
