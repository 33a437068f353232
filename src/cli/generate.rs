//! Generate command - upload a roster and save the returned chain

use crate::cli::connect;
use crate::cli::store::save_chain;
use crate::cli::style::{arrow, check, spinner_style, Stylize};
use anstream::println;
use assassin::config::ClientConfig;
use assassin::error::Result;
use assassin::session::Organizer;
use assassin::submit::FileUpload;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Run the generate command
pub async fn run_generate(
    config: &ClientConfig,
    roster: Option<&Path>,
    host_email: &str,
    chain_file: &Path,
    reveal: bool,
) -> Result<()> {
    let file = match roster {
        Some(path) => Some(FileUpload::read(path).await?),
        None => None,
    };

    let organizer = Organizer::new(connect(config)?);

    let spinner = ProgressBar::new_spinner()
        .with_style(spinner_style())
        .with_message("Generating...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = organizer.generate_chain(file, host_email).await;
    spinner.finish_and_clear();
    let chain = result?;

    save_chain(chain_file, &chain).await?;

    println!(
        "{} Chain generated successfully! ({} players)",
        check(),
        chain.len().accent()
    );
    println!("  Saved to {}", chain_file.display().accent());

    if reveal {
        println!();
        for link in organizer.links()? {
            println!("  {} {} {}", link.from, arrow(), link.to.emphasis());
        }
    } else {
        println!(
            "{}",
            "Targets are hidden. Run `assassin show` to see the chain, or skip it to stay in the dark."
                .muted()
        );
    }
    println!();
    println!("To start the game: {}", "assassin send --host-email <email>".accent());

    Ok(())
}
