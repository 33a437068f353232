//! Chain traversal
//!
//! Turns the keyed target map into an ordered `participant → target`
//! sequence by following target links from a start key.

use super::Chain;
use crate::error::{Error, Result};
use crate::types::ChainLink;
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl Chain {
    /// Follow target links from `start` until a visited participant repeats
    ///
    /// Stops early on a sub-cycle. A target outside the key set is an error.
    pub fn walk(&self, start: &str) -> Result<Vec<ChainLink>> {
        let mut visited: HashSet<&str> = HashSet::with_capacity(self.len());
        let mut links = Vec::with_capacity(self.len());
        let mut current = start;

        while !visited.contains(current) {
            let entry = self.get(current).ok_or_else(|| {
                Error::DataIntegrity(format!("{current} is a target but not a participant"))
            })?;
            links.push(ChainLink {
                from: entry.participant.clone(),
                to: entry.target.clone(),
            });
            visited.insert(current);
            current = &entry.target;
        }

        Ok(links)
    }

    /// Linearize the whole chain starting from the first participant
    ///
    /// An empty chain yields no links. A traversal that closes before
    /// covering every participant is reported, not truncated.
    pub fn linearize(&self) -> Result<Vec<ChainLink>> {
        let Some(start) = self.first_participant() else {
            return Ok(Vec::new());
        };

        let links = self.walk(start)?;
        debug!(start, visited = links.len(), total = self.len(), "Walked chain");

        if links.len() != self.len() {
            return Err(Error::DataIntegrity(format!(
                "chain closes after {} of {} participants (starting at {start})",
                links.len(),
                self.len()
            )));
        }
        Ok(links)
    }

    /// Check that targets form one cycle over all participants with no fixed point
    pub fn validate(&self) -> Result<()> {
        let mut incoming: HashMap<&str, usize> = HashMap::with_capacity(self.len());

        for entry in self.entries() {
            if entry.target == entry.participant {
                return Err(Error::DataIntegrity(format!(
                    "{} is their own target",
                    entry.participant
                )));
            }
            if !self.contains(&entry.target) {
                return Err(Error::DataIntegrity(format!(
                    "{} targets unknown participant {}",
                    entry.participant, entry.target
                )));
            }
            *incoming.entry(entry.target.as_str()).or_default() += 1;
        }

        if let Some((target, count)) = incoming.iter().find(|(_, c)| **c > 1) {
            return Err(Error::DataIntegrity(format!(
                "{target} is targeted by {count} participants"
            )));
        }

        self.linearize().map(|_| ())
    }
}
