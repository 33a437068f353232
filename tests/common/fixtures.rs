//! Test data factories for assassin types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use assassin::chain::Chain;
use assassin::submit::FileUpload;
use assassin::types::{ChainEntry, CheckInRecord};
use chrono::{TimeZone, Utc};

/// A roster CSV with the given player names (emails derived from names)
pub fn roster_csv(names: &[&str]) -> String {
    let mut csv = String::from("name,email\n");
    for name in names {
        csv.push_str(&format!("{name},{}@example.com\n", name.to_lowercase()));
    }
    csv
}

/// A roster upload as picked from disk
pub fn roster_file(names: &[&str]) -> FileUpload {
    FileUpload::from_bytes("players.csv", roster_csv(names).into_bytes())
}

/// A small PNG-looking selfie
pub fn selfie() -> FileUpload {
    FileUpload::from_bytes("selfie.png", vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
}

/// A single cycle following `names` in order, with emails filled in
pub fn make_cycle(names: &[&str]) -> Chain {
    let entries = names.iter().enumerate().map(|(i, name)| {
        let target = names[(i + 1) % names.len()];
        ChainEntry {
            participant: (*name).to_string(),
            target: target.to_string(),
            target_email: Some(format!("{}@example.com", target.to_lowercase())),
            player_email: Some(format!("{}@example.com", name.to_lowercase())),
        }
    });
    Chain::from_entries(entries).unwrap()
}

/// A check-in record at a fixed time
pub fn make_check_in(name: &str, hour: u32, image: Option<&str>) -> CheckInRecord {
    CheckInRecord {
        name: name.to_string(),
        submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        image_reference: image.map(ToString::to_string),
    }
}
