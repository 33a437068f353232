//! Chain file on disk
//!
//! The CLI keeps the generated chain between commands as the same JSON the
//! backend returned, so `send` replays it verbatim.

use assassin::chain::Chain;
use assassin::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Default chain file name
pub const DEFAULT_CHAIN_FILE: &str = "assassin_chain.json";

/// Write a chain as pretty JSON
pub async fn save_chain(path: &Path, chain: &Chain) -> Result<()> {
    let json = serde_json::to_string_pretty(chain)?;
    tokio::fs::write(path, json + "\n").await?;
    debug!(path = %path.display(), participants = chain.len(), "Saved chain");
    Ok(())
}

/// Read a chain saved by `generate`
pub async fn load_chain(path: &Path) -> Result<Chain> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::NoChain),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&json)?)
}
