//! Knowledge-base document records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of a document in the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processed,
    Processing,
    Error,
}

impl DocumentStatus {
    /// Stable lowercase label, as used in filter arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processed => "processed",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Error => "error",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "processed" => Ok(DocumentStatus::Processed),
            "processing" => Ok(DocumentStatus::Processing),
            "error" => Ok(DocumentStatus::Error),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown document status: {}",
                other
            ))),
        }
    }
}

/// A document stored in the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    /// Display name, extension included
    pub name: String,
    /// File type tag (pdf, docx, md, txt, ...)
    pub file_type: String,
    /// Size in bytes
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
    /// Free-text tags; order preserved, duplicates allowed
    pub tags: Vec<String>,
}

impl DocumentRecord {
    /// Case-insensitive match against name or any tag
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle_lower))
    }
}
