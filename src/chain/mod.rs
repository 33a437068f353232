//! Target chain model
//!
//! A chain maps every participant to the participant they must act on.
//! Key order is the order the backend sent; the first key is where
//! traversal starts.

mod artifact;
mod traverse;

pub use artifact::{parse_artifact, render_artifact, ARTIFACT_FILE_NAME};

use crate::error::{Error, Result};
use crate::types::{ChainEntry, EntryBody};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Participant → assignment mapping, in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    entries: Vec<ChainEntry>,
    index: HashMap<String, usize>,
}

impl Chain {
    /// Build a chain from entries, rejecting duplicate participant keys
    pub fn from_entries(entries: impl IntoIterator<Item = ChainEntry>) -> Result<Self> {
        let mut chain = Self::default();
        for entry in entries {
            chain.push(entry)?;
        }
        Ok(chain)
    }

    /// Build a bare chain from `(participant, target)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        Self::from_entries(pairs.into_iter().map(|(p, t)| ChainEntry::new(p, t)))
    }

    fn push(&mut self, entry: ChainEntry) -> Result<()> {
        if self.index.contains_key(&entry.participant) {
            return Err(Error::Parse(format!(
                "duplicate participant in chain: {}",
                entry.participant
            )));
        }
        self.index.insert(entry.participant.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no participants
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a participant's entry
    pub fn get(&self, participant: &str) -> Option<&ChainEntry> {
        self.index.get(participant).map(|&i| &self.entries[i])
    }

    /// Whether a participant is part of the chain
    pub fn contains(&self, participant: &str) -> bool {
        self.index.contains_key(participant)
    }

    /// Entries in backend order
    pub fn entries(&self) -> impl Iterator<Item = &ChainEntry> {
        self.entries.iter()
    }

    /// Participant keys in backend order
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.participant.as_str())
    }

    /// First key received, used as the traversal start
    pub fn first_participant(&self) -> Option<&str> {
        self.entries.first().map(|e| e.participant.as_str())
    }

    /// The `participant → target` relation, ignoring order and emails
    pub fn target_relation(&self) -> HashMap<&str, &str> {
        self.entries
            .iter()
            .map(|e| (e.participant.as_str(), e.target.as_str()))
            .collect()
    }
}

impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            let body = EntryBody {
                target: entry.target.clone(),
                target_email: entry.target_email.clone(),
                player_email: entry.player_email.clone(),
            };
            map.serialize_entry(&entry.participant, &body)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ChainVisitor;

        impl<'de> Visitor<'de> for ChainVisitor {
            type Value = Chain;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of participant to assignment")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut chain = Chain::default();
                while let Some((participant, body)) = access.next_entry::<String, EntryBody>()? {
                    chain
                        .push(ChainEntry {
                            participant,
                            target: body.target,
                            target_email: body.target_email,
                            player_email: body.player_email,
                        })
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(chain)
            }
        }

        deserializer.deserialize_map(ChainVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_backend_order() {
        let json = r#"{
            "Zed": {"target": "Amy", "target_email": "amy@x.io", "player_email": "zed@x.io"},
            "Amy": {"target": "Mo"},
            "Mo": {"target": "Zed"}
        }"#;
        let chain: Chain = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = chain.participants().collect();
        assert_eq!(keys, ["Zed", "Amy", "Mo"]);
        assert_eq!(chain.first_participant(), Some("Zed"));

        let zed = chain.get("Zed").unwrap();
        assert_eq!(zed.target, "Amy");
        assert_eq!(zed.target_email.as_deref(), Some("amy@x.io"));
        assert_eq!(zed.player_email.as_deref(), Some("zed@x.io"));
    }

    #[test]
    fn test_serialize_replays_verbatim() {
        let json = r#"{"B":{"target":"A","target_email":"a@x.io","player_email":"b@x.io"},"A":{"target":"B"}}"#;
        let chain: Chain = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&chain).unwrap(), json);
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let err = Chain::from_pairs([("A", "B"), ("A", "C")]).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_empty_chain() {
        let chain: Chain = serde_json::from_str("{}").unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.first_participant(), None);
    }
}
