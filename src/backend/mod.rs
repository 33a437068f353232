//! Chain backend services
//!
//! Provides one interface over the remote game backend, so the session
//! logic can run against the real HTTP service or an in-memory double.

mod http;

pub use http::{image_endpoint, HttpBackend};

use crate::chain::Chain;
use crate::checkin::CheckInUpload;
use crate::error::Result;
use crate::roster::RosterUpload;
use crate::types::CheckInRecord;
use async_trait::async_trait;

/// Backend service trait for the game's remote operations
///
/// Chain generation and email delivery happen on the backend; the client
/// only sends input and reads results.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Upload a roster and receive a freshly generated chain
    async fn generate_chain(&self, roster: &RosterUpload) -> Result<Chain>;

    /// Replay a chain so the backend emails every participant their target
    async fn send_emails(&self, chain: &Chain, host_email: &str) -> Result<String>;

    /// Upload a check-in selfie
    async fn check_in(&self, upload: &CheckInUpload) -> Result<()>;

    /// Fetch all recent check-ins
    async fn list_check_ins(&self) -> Result<Vec<CheckInRecord>>;

    /// Fetch the raw bytes behind an image reference
    async fn fetch_image(&self, reference: &str) -> Result<Vec<u8>>;

    /// Check that the backend is reachable
    async fn health(&self) -> Result<String>;
}
