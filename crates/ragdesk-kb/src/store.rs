//! Owned document library state with filtering and sorting

use ragdesk_core::{DocumentRecord, DocumentStatus};

use crate::demo;

/// Status facet applied to the document table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DocumentStatus),
}

/// Column the document table is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first
    #[default]
    UploadDate,
    /// Ascending by code point
    Name,
    /// Largest first
    Size,
}

/// A view over the library: text match, status facet, ordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    pub text: String,
    pub status: StatusFilter,
    pub order: SortKey,
}

impl DocumentQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Aggregate counters for the table header cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    pub processed: usize,
    pub processing: usize,
    pub total_bytes: u64,
}

/// In-memory document library, the single owner of the table rows
///
/// Every mutation bumps `version`, so callers holding derived views can
/// detect that a row set they rendered is out of date.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<DocumentRecord>,
    version: u64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the demo library
    pub fn with_demo_documents() -> Self {
        Self {
            documents: demo::documents(),
            version: 0,
        }
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Append a document to the library
    pub fn insert(&mut self, document: DocumentRecord) {
        tracing::debug!("Inserted document {} ({})", document.id, document.name);
        self.documents.push(document);
        self.version += 1;
    }

    /// Remove the document with the given id, returning it if present.
    /// At most one row is removed even if ids were to collide.
    pub fn remove(&mut self, id: &str) -> Option<DocumentRecord> {
        let index = self.documents.iter().position(|d| d.id == id)?;
        let removed = self.documents.remove(index);
        self.version += 1;
        tracing::debug!("Removed document {}", removed.id);
        Some(removed)
    }

    /// Update the processing status of one document
    pub fn set_status(&mut self, id: &str, status: DocumentStatus) -> bool {
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.status = status;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Rows matching the query, in the query's order. The underlying
    /// library is left untouched; ties keep insertion order.
    pub fn select(&self, query: &DocumentQuery) -> Vec<&DocumentRecord> {
        let needle = query.text.to_lowercase();
        let mut rows: Vec<&DocumentRecord> = self
            .documents
            .iter()
            .filter(|doc| doc.matches_text(&needle))
            .filter(|doc| match query.status {
                StatusFilter::All => true,
                StatusFilter::Only(status) => doc.status == status,
            })
            .collect();

        match query.order {
            SortKey::UploadDate => rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
            SortKey::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Size => rows.sort_by(|a, b| b.size.cmp(&a.size)),
        }
        rows
    }

    /// Counters over the whole library, independent of any filter
    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            total: self.documents.len(),
            processed: self.count_status(DocumentStatus::Processed),
            processing: self.count_status(DocumentStatus::Processing),
            total_bytes: self.documents.iter().map(|d| d.size).sum(),
        }
    }

    fn count_status(&self, status: DocumentStatus) -> usize {
        self.documents.iter().filter(|d| d.status == status).count()
    }
}
