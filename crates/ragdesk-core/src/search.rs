//! Semantic search request/response types and the backend trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One matched fragment returned by the search backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    /// Fragment of the source document the query matched
    pub content: String,
    /// Name of the source document
    pub document: String,
    /// Relevance score in 0.0..=1.0
    pub score: f32,
    /// Terms the backend wants called out in the fragment
    pub highlights: Vec<String>,
    pub page: Option<u32>,
}

/// Sort order applied to search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    #[default]
    Relevance,
    Title,
}

/// Document type facet for narrowing a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocTypeFilter {
    Pdf,
    Word,
    Markdown,
    Text,
}

impl DocTypeFilter {
    /// Whether a document name carries this facet's extension
    pub fn matches(&self, document: &str) -> bool {
        let lower = document.to_lowercase();
        match self {
            Self::Pdf => lower.ends_with(".pdf"),
            Self::Word => lower.ends_with(".doc") || lower.ends_with(".docx"),
            Self::Markdown => lower.ends_with(".md"),
            Self::Text => lower.ends_with(".txt"),
        }
    }
}

/// A search as issued from the console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub order: ResultOrder,
    /// Empty means no type narrowing
    pub doc_types: Vec<DocTypeFilter>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            order: ResultOrder::default(),
            doc_types: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: ResultOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_doc_types(mut self, doc_types: Vec<DocTypeFilter>) -> Self {
        self.doc_types = doc_types;
        self
    }
}

/// Trait for the retrieval backend answering console searches
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_matches_extensions() {
        assert!(DocTypeFilter::Pdf.matches("公司政策手冊.pdf"));
        assert!(DocTypeFilter::Word.matches("技術文檔_API接口.docx"));
        assert!(DocTypeFilter::Word.matches("proposal.DOC"));
        assert!(DocTypeFilter::Markdown.matches("產品需求說明.md"));
        assert!(DocTypeFilter::Text.matches("會議記錄_2024Q1.txt"));
        assert!(!DocTypeFilter::Pdf.matches("產品需求說明.md"));
    }

    #[test]
    fn request_defaults_to_relevance_no_facets() {
        let request = SearchRequest::new("假期");
        assert_eq!(request.order, ResultOrder::Relevance);
        assert!(request.doc_types.is_empty());
    }
}
