//! Knowledge base engine for the RagDesk console
//!
//! This crate owns the state behind every screen: the document library,
//! the upload staging queue, search and chat sessions, and the simulated
//! service backends that stand in for live infrastructure.

mod chat;
pub mod demo;
mod highlight;
mod requests;
mod search;
mod sim;
mod store;
mod upload;

pub use chat::{ChatSession, GREETING};
pub use highlight::{Highlighter, Segment};
pub use requests::{RequestId, RequestTracker};
pub use search::{SearchSession, HISTORY_LIMIT};
pub use sim::{
    SimProfile, SimulatedChatBackend, SimulatedSearchBackend, SimulatedSettingsStore,
    SimulatedUploadTransport, StaticAnalyticsSource, REJECTION_REASON,
};
pub use store::{DocumentQuery, DocumentStore, LibraryStats, SortKey, StatusFilter};
pub use upload::{UploadQueue, UploadSummary, DEFAULT_STEP_DELAY};

// Re-export core types for convenience
pub use ragdesk_core::{
    AnalyticsSnapshot, AnalyticsSource, AssistantReply, ChatBackend, ChatMessage, ChatRole,
    DocTypeFilter, DocumentRecord, DocumentStatus, Error, PendingFile, Result, ResultOrder,
    SearchBackend, SearchHit, SearchRequest, Settings, SettingsStore, SystemInfo,
    TransportOutcome, UploadRecord, UploadStatus, UploadTransport,
};
