//! Upload staging types and the transport trait

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

/// File extensions accepted by the knowledge base
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "md"];

/// Maximum accepted file size (50 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Reason string staged on records that fail the format check
pub const FORMAT_ERROR: &str = "Unsupported file format";

/// Reason string staged on records that fail the size check
pub const SIZE_LIMIT_ERROR: &str = "File exceeds the 50 MB size limit";

/// Lifecycle state of a staged upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

/// A file handed to the upload screen, before any staging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFile {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Where the file lives on disk, when it came from the filesystem
    pub path: Option<PathBuf>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Build a pending file from a filesystem path, taking name and size
    /// from metadata
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Lowercased extension after the final dot, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Check format and size, returning the staging error reason if invalid.
    /// Format is checked before size, matching the screen's message priority.
    pub fn validate(&self) -> Option<&'static str> {
        let allowed = self
            .extension()
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);
        if !allowed {
            return Some(FORMAT_ERROR);
        }
        if self.size > MAX_UPLOAD_BYTES {
            return Some(SIZE_LIMIT_ERROR);
        }
        None
    }
}

/// A staged upload owned by the upload screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub file: PendingFile,
    pub status: UploadStatus,
    /// Progress percentage, 0-100
    pub progress: u8,
    pub error: Option<String>,
}

impl UploadRecord {
    /// Stage a file: invalid files land directly in the error state with a
    /// reason, valid files enter pending at progress 0
    pub fn staged(file: PendingFile) -> Self {
        let error = file.validate().map(|reason| reason.to_string());
        let status = if error.is_some() {
            UploadStatus::Error
        } else {
            UploadStatus::Pending
        };
        Self {
            id: Uuid::new_v4().to_string(),
            file,
            status,
            progress: 0,
            error,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == UploadStatus::Pending
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }
}

/// Explicit result of handing a file to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportOutcome {
    Accepted,
    Rejected { reason: String },
}

/// Trait for the upload transport behind the staging queue
///
/// The dashboard has no real backend; the shipped implementation simulates
/// the outcome. A production transport would perform the actual network
/// upload here and report accept/reject explicitly.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Deliver one staged file and report the backend's verdict
    async fn send(&self, upload: &UploadRecord) -> Result<TransportOutcome>;
}
