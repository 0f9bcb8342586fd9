//! Core traits and types for RagDesk
//!
//! This crate defines the fundamental traits and types used across the RagDesk
//! console. It provides capability-facing interfaces for the chat backend,
//! search backend, upload transport, settings store, and analytics source,
//! making the system test-friendly and extensible.

pub mod analytics;
pub mod chat;
pub mod document;
pub mod error;
pub mod search;
pub mod settings;
pub mod upload;

pub use analytics::{
    ActivityEntry, ActivityKind, AnalyticsSnapshot, AnalyticsSource, HealthState,
    PopularQuestion, ServiceHealth, Trend, TypeShare, UsageOverview,
};
pub use chat::{AssistantReply, ChatBackend, ChatMessage, ChatRole};
pub use document::{DocumentRecord, DocumentStatus};
pub use error::{Error, Result};
pub use search::{DocTypeFilter, ResultOrder, SearchBackend, SearchHit, SearchRequest};
pub use settings::{AiModel, LogLevel, Settings, SettingsStore, SystemInfo};
pub use upload::{
    PendingFile, TransportOutcome, UploadRecord, UploadStatus, UploadTransport,
    ALLOWED_EXTENSIONS, FORMAT_ERROR, MAX_UPLOAD_BYTES, SIZE_LIMIT_ERROR,
};
