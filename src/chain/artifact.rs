//! Plain-text chain artifact
//!
//! One `A → B` line per participant, newline-terminated, in traversal order.
//! Names are written exactly as the backend returned them, surrounding
//! whitespace included, and the ` → ` separator is the only delimiter.

use super::Chain;
use crate::error::{Error, Result};
use crate::types::ChainLink;
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// Default file name for the exported artifact
pub const ARTIFACT_FILE_NAME: &str = "assassin_chain.txt";

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+?) → (.+)$").expect("hardcoded artifact pattern is valid")
    })
}

/// Render links as the downloadable text artifact
pub fn render_artifact(links: &[ChainLink]) -> String {
    let mut out = String::new();
    for link in links {
        let _ = writeln!(out, "{link}");
    }
    out
}

/// Parse an artifact back into a chain (emails are not carried by the text form)
pub fn parse_artifact(text: &str) -> Result<Chain> {
    let pairs = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line_regex()
                .captures(line)
                .and_then(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
                .ok_or_else(|| Error::Parse(format!("line {}: expected `A → B`, got {line:?}", i + 1)))
        })
        .collect::<Result<Vec<_>>>()?;

    Chain::from_pairs(pairs)
}
