//! Check-in flow
//!
//! Players prove they are still in the game by uploading a selfie. The desk
//! validates the upload, keeps one upload in flight at a time and fetches
//! the list of recent check-ins.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::submit::{ActionSlot, FileUpload};
use crate::types::{CaptureSource, CheckInRecord};
use std::sync::Arc;
use tracing::info;

/// Capability query supplied by the hosting environment
pub trait DeviceCapabilities: Send + Sync {
    /// Whether the device can take a photo directly
    fn is_capture_capable_device(&self) -> bool;
}

/// Capabilities fixed at startup (e.g. from a CLI flag)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCapabilities {
    /// Whether a camera is available
    pub camera: bool,
}

impl DeviceCapabilities for FixedCapabilities {
    fn is_capture_capable_device(&self) -> bool {
        self.camera
    }
}

/// A validated selfie upload
#[derive(Debug, Clone)]
pub struct CheckInUpload {
    /// The selfie
    pub image: FileUpload,
    /// Participant name, trimmed
    pub name: String,
}

/// Validate a selfie selection and participant name
pub fn prepare_check_in(image: Option<FileUpload>, name: &str) -> Result<CheckInUpload> {
    let Some(image) = image.filter(FileUpload::is_image) else {
        return Err(Error::Validation("Please select an image file".to_string()));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("Please enter your name first".to_string()));
    }
    if image.is_empty() {
        return Err(Error::Validation(format!("{} is empty", image.file_name)));
    }

    Ok(CheckInUpload {
        image,
        name: name.to_string(),
    })
}

/// Drives selfie uploads and the check-in list
pub struct CheckInDesk {
    backend: Arc<dyn Backend>,
    capabilities: Arc<dyn DeviceCapabilities>,
    upload_slot: ActionSlot,
}

impl CheckInDesk {
    /// Create a desk over a backend
    pub fn new(backend: Arc<dyn Backend>, capabilities: Arc<dyn DeviceCapabilities>) -> Self {
        Self {
            backend,
            capabilities,
            upload_slot: ActionSlot::new("Uploading check-in"),
        }
    }

    /// Where the selfie should come from on this device
    pub fn capture_source(&self) -> CaptureSource {
        if self.capabilities.is_capture_capable_device() {
            CaptureSource::Camera
        } else {
            CaptureSource::FilePicker
        }
    }

    /// Upload slot, for inspecting lifecycle state
    pub const fn upload_slot(&self) -> &ActionSlot {
        &self.upload_slot
    }

    /// Validate and upload a check-in
    ///
    /// Validation failures return before the backend is contacted.
    pub async fn submit(&self, image: Option<FileUpload>, name: &str) -> Result<()> {
        let upload = prepare_check_in(image, name)?;
        let flight = self.upload_slot.try_begin()?;

        let result = self.backend.check_in(&upload).await;
        if result.is_ok() {
            info!(name = %upload.name, "Checked in");
        }
        flight.settle(&result);
        result
    }

    /// Fetch the full check-in list
    pub async fn recent(&self) -> Result<Vec<CheckInRecord>> {
        self.backend.list_check_ins().await
    }

    /// Fetch the selfie behind a check-in
    pub async fn image(&self, record: &CheckInRecord) -> Result<Vec<u8>> {
        let reference = record
            .image_reference
            .as_deref()
            .ok_or_else(|| Error::Validation(format!("{} has no image", record.name)))?;
        self.backend.fetch_image(reference).await
    }
}
