//! Check-in commands - upload a selfie, list check-ins, fetch an image

use crate::cli::connect;
use crate::cli::style::{self, bullet, check, hyperlink_url, Stream, Stylize};
use anstream::println;
use assassin::backend::{image_endpoint, Backend};
use assassin::checkin::{CheckInDesk, FixedCapabilities};
use assassin::config::ClientConfig;
use assassin::error::Result;
use assassin::submit::FileUpload;
use assassin::types::CaptureSource;
use chrono::Local;
use std::path::Path;
use std::sync::Arc;

fn desk(config: &ClientConfig, camera: bool) -> Result<CheckInDesk> {
    Ok(CheckInDesk::new(
        connect(config)?,
        Arc::new(FixedCapabilities { camera }),
    ))
}

/// Upload a check-in selfie
pub async fn run_check_in(
    config: &ClientConfig,
    name: &str,
    selfie: Option<&Path>,
    camera: bool,
) -> Result<()> {
    let desk = desk(config, camera)?;

    if selfie.is_none() && desk.capture_source() == CaptureSource::Camera {
        println!(
            "{} Take a selfie with your camera, then pass it with {}",
            style::CAMERA,
            "--selfie <file>".accent()
        );
    }

    let image = match selfie {
        Some(path) => Some(FileUpload::read(path).await?),
        None => None,
    };
    desk.submit(image, name).await?;

    println!("{} Nice, thanks for checking in! 🎯", check());
    Ok(())
}

/// List recent check-ins
pub async fn run_check_ins(config: &ClientConfig) -> Result<()> {
    let desk = desk(config, false)?;
    let check_ins = desk.recent().await?;

    if check_ins.is_empty() {
        println!("{}", "No check-ins yet today".muted());
        return Ok(());
    }

    println!("{}", "Check-in list".emphasis());
    println!();
    for record in &check_ins {
        let when = record
            .submitted_at
            .with_timezone(&Local)
            .format("%b %-d, %-I:%M %p")
            .to_string();
        let image = match &record.image_reference {
            Some(reference) => {
                let url = image_endpoint(config, reference)?;
                hyperlink_url(Stream::Stdout, url.as_str())
            }
            None => "-".to_string(),
        };
        println!(
            "  {} {:<24} {}  {}",
            bullet(),
            record.name.accent(),
            when.muted(),
            image
        );
    }
    println!();
    println!(
        "{} check-in{}",
        check_ins.len().accent(),
        if check_ins.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Download the image behind a check-in reference
pub async fn run_image(config: &ClientConfig, reference: &str, out: &Path) -> Result<()> {
    let backend = connect(config)?;
    let bytes = backend.fetch_image(reference).await?;
    tokio::fs::write(out, &bytes).await?;

    println!(
        "{} Saved {} bytes to {}",
        check(),
        bytes.len().accent(),
        out.display().accent()
    );
    Ok(())
}
