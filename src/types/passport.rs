use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Passport image sent to the scanner endpoint as multipart field `file`.
#[derive(Clone, PartialEq, Eq)]
pub struct PassportUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PassportUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: guess_content_type(&file_name).to_string(),
            file_name,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read an image from disk; the file name sent is the path's last component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "passport".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

impl std::fmt::Debug for PassportUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassportUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// A country travelers can enter without applying for a visa in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisaFreeDestination {
    pub name: &'static str,
    pub region: &'static str,
    pub duration: &'static str,
}

const VISA_FREE_DESTINATIONS: [VisaFreeDestination; 10] = [
    destination("Thailand", "Southeast Asia", "30 days visa-free"),
    destination("Japan", "East Asia", "90 days visa-free"),
    destination("United Kingdom", "Europe", "180 days visa-free"),
    destination("Canada", "North America", "6 months visa-free"),
    destination("Australia", "Oceania", "90 days visa-free"),
    destination("Brazil", "South America", "90 days visa-free"),
    destination("Singapore", "Southeast Asia", "30 days visa-free"),
    destination("UAE", "Middle East", "90 days visa-free"),
    destination("South Korea", "East Asia", "90 days visa-free"),
    destination("Mexico", "North America", "180 days visa-free"),
];

const fn destination(
    name: &'static str,
    region: &'static str,
    duration: &'static str,
) -> VisaFreeDestination {
    VisaFreeDestination {
        name,
        region,
        duration,
    }
}

/// The static catalog shown after a passport scan or country selection.
pub fn visa_free_destinations() -> &'static [VisaFreeDestination] {
    &VISA_FREE_DESTINATIONS
}

/// Catalog entries whose region matches `region`, ignoring case.
pub fn destinations_in_region(region: &str) -> Vec<VisaFreeDestination> {
    let region = region.trim();
    VISA_FREE_DESTINATIONS
        .iter()
        .filter(|entry| entry.region.eq_ignore_ascii_case(region))
        .copied()
        .collect()
}
