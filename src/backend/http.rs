//! HTTP backend implementation

use crate::backend::Backend;
use crate::chain::Chain;
use crate::checkin::CheckInUpload;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::roster::RosterUpload;
use crate::types::CheckInRecord;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Backend reached over plain HTTP with reqwest
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct GenerateChainResponse {
    chain: Chain,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: Option<String>,
}

#[derive(Deserialize)]
struct CheckInsResponse {
    #[serde(default, rename = "checkIns")]
    check_ins: Vec<CheckInRecord>,
}

#[derive(Serialize)]
struct SendEmailsPayload<'a> {
    chain: &'a Chain,
    host_email: &'a str,
}

/// URL of the image behind an opaque check-in reference
pub fn image_endpoint(config: &ClientConfig, reference: &str) -> Result<Url> {
    config.endpoint(&format!("image/{}", urlencoding::encode(reference)))
}

impl HttpBackend {
    /// Create a new HTTP backend
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Connection settings this backend was built with
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.config.endpoint(path)
    }

    /// Apply the configured timeout to an ordinary request
    fn bounded(&self, request: RequestBuilder) -> RequestBuilder {
        request.timeout(self.config.timeout)
    }
}

/// Pass a success response through, or turn it into [`Error::Request`]
///
/// The message comes from the body's `error` field when present.
async fn check_status(response: Response, fallback: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    debug!(status = status.as_u16(), %message, "Backend rejected request");
    Err(Error::Request {
        status: status.as_u16(),
        message,
    })
}

/// Decode a success body, keeping malformed JSON apart from transport failures
async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response.json().await.map_err(|e| {
        if e.is_decode() {
            Error::Parse(format!("unexpected {what} response: {e}"))
        } else {
            Error::Network(e)
        }
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn generate_chain(&self, roster: &RosterUpload) -> Result<Chain> {
        let url = self.url("generate-chain")?;
        info!(%url, players = roster.players.len(), "Requesting chain");

        let form = Form::new()
            .part("file", roster.file.to_part()?)
            .text("host_email", roster.host_email.clone());

        let response = self
            .bounded(self.client.post(url).multipart(form))
            .send()
            .await?;
        let response = check_status(response, "Failed to generate chain").await?;
        let body: GenerateChainResponse = decode(response, "generate-chain").await?;

        Ok(body.chain)
    }

    async fn send_emails(&self, chain: &Chain, host_email: &str) -> Result<String> {
        let url = self.url("send-emails")?;
        info!(%url, participants = chain.len(), "Sending target emails");

        // No client-side timeout: dispatch time grows with the roster
        let response = self
            .client
            .post(url)
            .json(&SendEmailsPayload { chain, host_email })
            .send()
            .await?;
        let response = check_status(response, "Failed to send emails").await?;

        let message = response
            .json::<MessageResponse>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Emails sent successfully".to_string());
        Ok(message)
    }

    async fn check_in(&self, upload: &CheckInUpload) -> Result<()> {
        let url = self.url("check-in")?;
        info!(%url, name = %upload.name, "Uploading check-in");

        let form = Form::new()
            .part("selfie", upload.image.to_part()?)
            .text("name", upload.name.clone());

        let response = self
            .bounded(self.client.post(url).multipart(form))
            .send()
            .await?;
        check_status(response, "Failed to upload selfie").await?;
        Ok(())
    }

    async fn list_check_ins(&self) -> Result<Vec<CheckInRecord>> {
        let url = self.url("check-ins")?;
        debug!(%url, "Fetching check-ins");

        let response = self
            .bounded(self.client.get(url).header("Cache-Control", "no-cache"))
            .send()
            .await?;
        let response = check_status(response, "Failed to fetch check-ins").await?;
        let body: CheckInsResponse = decode(response, "check-ins").await?;

        Ok(body.check_ins)
    }

    async fn fetch_image(&self, reference: &str) -> Result<Vec<u8>> {
        let url = image_endpoint(&self.config, reference)?;
        debug!(%url, "Fetching image");

        let response = self.bounded(self.client.get(url)).send().await?;
        let bytes = check_status(response, "Failed to fetch image")
            .await?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }

    async fn health(&self) -> Result<String> {
        let url = self.url("api/test")?;
        let response = self.bounded(self.client.get(url)).send().await?;
        let response = check_status(response, "Backend is not responding").await?;
        let body: MessageResponse = decode(response, "health").await?;
        Ok(body.message.unwrap_or_else(|| "ok".to_string()))
    }
}
