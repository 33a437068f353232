//! Show and export commands - linearize the saved chain

use crate::cli::store::load_chain;
use crate::cli::style::{arrow, check, Stylize};
use anstream::println;
use assassin::chain::render_artifact;
use assassin::error::Result;
use std::path::Path;

/// Print the chain in traversal order
pub async fn run_show(chain_file: &Path) -> Result<()> {
    let chain = load_chain(chain_file).await?;
    chain.validate()?;
    let links = chain.linearize()?;

    if links.is_empty() {
        println!("{}", "Chain is empty".muted());
        return Ok(());
    }

    println!("{}", "Assassin Chain".emphasis());
    println!();
    for (i, link) in links.iter().enumerate() {
        println!(
            "  {:>3}. {} {} {}",
            (i + 1).muted(),
            link.from,
            arrow(),
            link.to.emphasis()
        );
    }
    println!();
    println!(
        "{} participant{}",
        links.len().accent(),
        if links.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Write the `A → B` text artifact
pub async fn run_export(chain_file: &Path, out: &Path) -> Result<()> {
    let chain = load_chain(chain_file).await?;
    chain.validate()?;
    let text = render_artifact(&chain.linearize()?);
    tokio::fs::write(out, &text).await?;

    println!(
        "{} Wrote {} line{} to {}",
        check(),
        chain.len().accent(),
        if chain.len() == 1 { "" } else { "s" },
        out.display().accent()
    );
    Ok(())
}
