//! Mock backend for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use assassin::backend::Backend;
use assassin::chain::Chain;
use assassin::checkin::CheckInUpload;
use assassin::error::{Error, Result};
use assassin::roster::RosterUpload;
use assassin::types::CheckInRecord;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Call record for `generate_chain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub file_name: String,
    pub host_email: String,
    pub players: usize,
}

/// Call record for `send_emails`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCall {
    pub participants: Vec<String>,
    pub host_email: String,
}

/// Call record for `check_in`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInCall {
    pub name: String,
    pub file_name: String,
}

/// Simple mock backend
///
/// Features:
/// - Queued chain responses for `generate_chain`
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Optional artificial latency to hold requests in flight
#[derive(Default)]
pub struct MockBackend {
    chains: Mutex<Vec<Chain>>,
    check_ins: Mutex<Vec<CheckInRecord>>,
    latency: Mutex<Option<Duration>>,
    // Call tracking
    generate_calls: Mutex<Vec<GenerateCall>>,
    send_calls: Mutex<Vec<SendCall>>,
    check_in_calls: Mutex<Vec<CheckInCall>>,
    image_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_generate: Mutex<Option<(u16, String)>>,
    error_on_send: Mutex<Option<(u16, String)>>,
    error_on_check_in: Mutex<Option<(u16, String)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    /// Queue a chain to be returned by the next `generate_chain`
    pub fn push_chain(&self, chain: Chain) {
        self.chains.lock().unwrap().push(chain);
    }

    /// Set the records returned by `list_check_ins`
    pub fn set_check_ins(&self, records: Vec<CheckInRecord>) {
        *self.check_ins.lock().unwrap() = records;
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    // === Error injection ===

    pub fn fail_generate(&self, status: u16, msg: &str) {
        *self.error_on_generate.lock().unwrap() = Some((status, msg.to_string()));
    }

    pub fn fail_send(&self, status: u16, msg: &str) {
        *self.error_on_send.lock().unwrap() = Some((status, msg.to_string()));
    }

    pub fn fail_check_in(&self, status: u16, msg: &str) {
        *self.error_on_check_in.lock().unwrap() = Some((status, msg.to_string()));
    }

    // === Call verification ===

    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn send_calls(&self) -> Vec<SendCall> {
        self.send_calls.lock().unwrap().clone()
    }

    pub fn check_in_calls(&self) -> Vec<CheckInCall> {
        self.check_in_calls.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<String> {
        self.image_calls.lock().unwrap().clone()
    }

    /// Total calls of any kind
    pub fn total_calls(&self) -> usize {
        self.generate_calls().len()
            + self.send_calls().len()
            + self.check_in_calls().len()
            + self.image_calls().len()
    }

    async fn wait(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected(slot: &Mutex<Option<(u16, String)>>) -> Result<()> {
        match slot.lock().unwrap().as_ref() {
            Some((status, message)) => Err(Error::Request {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn generate_chain(&self, roster: &RosterUpload) -> Result<Chain> {
        self.generate_calls.lock().unwrap().push(GenerateCall {
            file_name: roster.file.file_name.clone(),
            host_email: roster.host_email.clone(),
            players: roster.players.len(),
        });
        self.wait().await;
        Self::injected(&self.error_on_generate)?;

        let mut chains = self.chains.lock().unwrap();
        if chains.is_empty() {
            return Err(Error::Request {
                status: 500,
                message: "no chain queued".to_string(),
            });
        }
        Ok(chains.remove(0))
    }

    async fn send_emails(&self, chain: &Chain, host_email: &str) -> Result<String> {
        self.send_calls.lock().unwrap().push(SendCall {
            participants: chain.participants().map(ToString::to_string).collect(),
            host_email: host_email.to_string(),
        });
        self.wait().await;
        Self::injected(&self.error_on_send)?;
        Ok("Emails sent successfully".to_string())
    }

    async fn check_in(&self, upload: &CheckInUpload) -> Result<()> {
        self.check_in_calls.lock().unwrap().push(CheckInCall {
            name: upload.name.clone(),
            file_name: upload.image.file_name.clone(),
        });
        self.wait().await;
        Self::injected(&self.error_on_check_in)
    }

    async fn list_check_ins(&self) -> Result<Vec<CheckInRecord>> {
        Ok(self.check_ins.lock().unwrap().clone())
    }

    async fn fetch_image(&self, reference: &str) -> Result<Vec<u8>> {
        self.image_calls.lock().unwrap().push(reference.to_string());
        Ok(reference.as_bytes().to_vec())
    }

    async fn health(&self) -> Result<String> {
        Ok("API is working!".to_string())
    }
}
