//! Roster preflight
//!
//! Checks a roster upload locally before the generate-chain call, so that
//! obviously bad input never reaches the network.

use crate::error::{Error, Result};
use crate::submit::FileUpload;
use crate::types::Player;
use tracing::debug;

/// Columns every roster must have
pub const REQUIRED_COLUMNS: [&str; 2] = ["name", "email"];

/// Smallest roster that can form a chain
pub const MIN_PLAYERS: usize = 2;

/// A roster file plus the organizer email, ready to send
#[derive(Debug, Clone)]
pub struct RosterUpload {
    /// The CSV file
    pub file: FileUpload,
    /// Organizer email, trimmed
    pub host_email: String,
    /// Players read during preflight
    pub players: Vec<Player>,
}

/// Validate a roster selection and organizer email
pub fn prepare_roster(file: Option<FileUpload>, host_email: &str) -> Result<RosterUpload> {
    let host_email = host_email.trim();
    let Some(file) = file.filter(|_| !host_email.is_empty()) else {
        return Err(Error::Validation(
            "Please upload a CSV file and enter host email first".to_string(),
        ));
    };

    if !file.has_extension("csv") {
        return Err(Error::Validation("Please choose a CSV file".to_string()));
    }
    if file.is_empty() {
        return Err(Error::Validation(format!("{} is empty", file.file_name)));
    }

    let text = std::str::from_utf8(&file.bytes)
        .map_err(|_| Error::Validation(format!("{} is not UTF-8 text", file.file_name)))?;
    let players = read_players(text)?;
    debug!(players = players.len(), file = %file.file_name, "Roster passed preflight");

    Ok(RosterUpload {
        file,
        host_email: host_email.to_string(),
        players,
    })
}

/// Read `name,email` rows from roster CSV text
pub fn read_players(text: &str) -> Result<Vec<Player>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().map(split_record).unwrap_or_default();
    let column = |name: &str| header.iter().position(|h| h == name);
    let (Some(name_col), Some(email_col)) = (column(REQUIRED_COLUMNS[0]), column(REQUIRED_COLUMNS[1]))
    else {
        return Err(Error::Validation(
            "CSV must have \"name\" and \"email\" columns".to_string(),
        ));
    };

    let players: Vec<Player> = lines
        .map(split_record)
        .map(|fields| Player {
            name: fields.get(name_col).cloned().unwrap_or_default(),
            email: fields.get(email_col).cloned().unwrap_or_default(),
        })
        .collect();

    if players.len() < MIN_PLAYERS {
        return Err(Error::Validation(format!(
            "Need at least {MIN_PLAYERS} players"
        )));
    }
    Ok(players)
}

/// Split one CSV record, honoring double-quoted fields
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(text: &str) -> Option<FileUpload> {
        Some(FileUpload::from_bytes("players.csv", text.as_bytes().to_vec()))
    }

    #[test]
    fn test_prepare_valid_roster() {
        let upload = prepare_roster(
            csv("name,email\nJohn,john@example.com\nSarah,sarah@example.com\n"),
            "  host@example.com ",
        )
        .unwrap();
        assert_eq!(upload.host_email, "host@example.com");
        assert_eq!(upload.players.len(), 2);
        assert_eq!(upload.players[1].name, "Sarah");
    }

    #[test]
    fn test_missing_file() {
        let err = prepare_roster(None, "host@example.com").unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("upload a CSV")));
    }

    #[test]
    fn test_missing_host_email() {
        let err = prepare_roster(csv("name,email\na,a@x\nb,b@x\n"), "   ").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_empty_file() {
        let err = prepare_roster(csv(""), "host@example.com").unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_wrong_extension() {
        let file = FileUpload::from_bytes("players.xlsx", b"name,email".to_vec());
        let err = prepare_roster(Some(file), "host@example.com").unwrap_err();
        assert!(err.to_string().contains("CSV"));
    }

    #[test]
    fn test_missing_columns() {
        let err = read_players("name,phone\na,1\nb,2\n").unwrap_err();
        assert!(err.to_string().contains("\"email\""));
    }

    #[test]
    fn test_too_few_players() {
        let err = read_players("name,email\nsolo,solo@x\n").unwrap_err();
        assert_eq!(err.to_string(), "Need at least 2 players");
    }

    #[test]
    fn test_columns_in_any_order_with_quotes() {
        let players = read_players(
            "\u{feff}email,name\n\"a@x\",\"Smith, Anna\"\nb@x,\"Bo \"\"B\"\"\"\n",
        )
        .unwrap();
        assert_eq!(players[0].name, "Smith, Anna");
        assert_eq!(players[0].email, "a@x");
        assert_eq!(players[1].name, "Bo \"B\"");
    }
}
