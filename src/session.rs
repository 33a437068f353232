//! Organizer session
//!
//! Holds the current chain and drives the roster → chain → emails flow:
//! 1. Generate - validate the roster locally, then ask the backend for a chain
//! 2. Export - linearize the chain into the text artifact
//! 3. Send - replay the chain to the backend to notify every participant

use crate::backend::Backend;
use crate::chain::{render_artifact, Chain};
use crate::error::{Error, Result};
use crate::roster::prepare_roster;
use crate::submit::{ActionSlot, EstimatedProgress, FileUpload, ProgressSchedule, ProgressSink};
use crate::types::ChainLink;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Trimmed organizer email, or the validation error shown before sending
pub fn require_host_email(host_email: &str) -> Result<&str> {
    let host_email = host_email.trim();
    if host_email.is_empty() {
        return Err(Error::Validation("Please enter host email first".to_string()));
    }
    Ok(host_email)
}

/// One organizer's view of the game
///
/// The chain is single-owner: it is only ever replaced wholesale by a
/// successful generation (or restored from a saved copy), never edited.
pub struct Organizer {
    backend: Arc<dyn Backend>,
    chain: RwLock<Option<Chain>>,
    generate_slot: ActionSlot,
    send_slot: ActionSlot,
    schedule: ProgressSchedule,
}

impl Organizer {
    /// Create a session with no chain yet
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            chain: RwLock::new(None),
            generate_slot: ActionSlot::new("Generating chain"),
            send_slot: ActionSlot::new("Sending emails"),
            schedule: ProgressSchedule::default(),
        }
    }

    /// Override the progress estimate timing
    #[must_use]
    pub fn with_schedule(mut self, schedule: ProgressSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Current chain, if one has been generated
    pub fn chain(&self) -> Option<Chain> {
        self.chain
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Put back a chain saved from an earlier session
    pub fn restore_chain(&self, chain: Chain) -> Result<()> {
        chain.validate()?;
        self.replace_chain(chain);
        Ok(())
    }

    fn replace_chain(&self, chain: Chain) {
        *self.chain.write().unwrap_or_else(PoisonError::into_inner) = Some(chain);
    }

    /// Generate-chain lifecycle slot
    pub const fn generate_slot(&self) -> &ActionSlot {
        &self.generate_slot
    }

    /// Send-emails lifecycle slot
    pub const fn send_slot(&self) -> &ActionSlot {
        &self.send_slot
    }

    /// Validate the roster and request a new chain
    ///
    /// On success the returned chain replaces any previous one. On failure
    /// the previous chain is left untouched.
    pub async fn generate_chain(&self, file: Option<FileUpload>, host_email: &str) -> Result<Chain> {
        let roster = prepare_roster(file, host_email)?;
        let flight = self.generate_slot.try_begin()?;

        let result = self
            .backend
            .generate_chain(&roster)
            .await
            .and_then(|chain| chain.validate().map(|()| chain));

        match &result {
            Ok(chain) => {
                info!(participants = chain.len(), "Chain generated");
                self.replace_chain(chain.clone());
            }
            Err(e) => warn!("Chain generation failed: {e}"),
        }
        flight.settle(&result);
        result
    }

    /// Linearize the current chain from its first participant
    pub fn links(&self) -> Result<Vec<ChainLink>> {
        self.chain().ok_or(Error::NoChain)?.linearize()
    }

    /// Render the current chain as the `A → B` text artifact
    pub fn export_artifact(&self) -> Result<String> {
        Ok(render_artifact(&self.links()?))
    }

    /// Ask the backend to email every participant their target
    ///
    /// Refused while a generation is in flight, since that chain is about to
    /// be replaced. Progress is estimated on a ticker that is cancelled as
    /// soon as the request settles, whatever the outcome.
    pub async fn send_emails(
        &self,
        host_email: &str,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<String> {
        let chain = self.chain().ok_or(Error::NoChain)?;
        let host_email = require_host_email(host_email)?;
        if self.generate_slot.is_pending() {
            return Err(Error::Busy(self.generate_slot.action()));
        }
        let flight = self.send_slot.try_begin()?;

        let estimate = EstimatedProgress::start(progress, self.schedule).await;
        let result = self.backend.send_emails(&chain, host_email).await;
        estimate.finish(result.is_ok()).await;

        match &result {
            Ok(message) => info!(participants = chain.len(), "{message}"),
            Err(e) => warn!("Sending emails failed: {e}"),
        }
        flight.settle(&result);
        result
    }
}
