//! Files selected for upload

use crate::error::{Error, Result};
use reqwest::multipart::Part;
use std::path::Path;

/// Image extensions accepted for check-in selfies, with their MIME types
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("bmp", "image/bmp"),
];

/// A file picked by the user, held in memory until it is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent with the multipart part
    pub file_name: String,
    /// MIME type derived from the extension
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Wrap in-memory contents, deriving the MIME type from `file_name`
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn read(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::Validation(format!("not a file: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(file_name, bytes))
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }

    /// Whether the file name ends in `.<ext>` (case-insensitive)
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Whether the MIME type is `image/*`
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Whether the file has no contents
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn to_part(&self) -> Result<Part> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)?)
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn mime_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("csv") => "text/csv",
        Some(ext) => IMAGE_TYPES
            .iter()
            .find(|(e, _)| *e == ext)
            .map_or("application/octet-stream", |(_, mime)| *mime),
        None => "application/octet-stream",
    }
}
