//! Usage analytics types and the reporting source trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Headline counters shown at the top of the stats screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageOverview {
    pub total_questions: u64,
    pub total_documents: u64,
    pub total_users: u64,
    /// Seconds
    pub avg_response_time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Search,
    Upload,
    Chat,
    Download,
}

/// One row of the recent activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Wall-clock time label, e.g. "10:30"
    pub time: String,
    pub user: String,
    pub action: String,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// A frequently asked question with its ask count and direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularQuestion {
    pub question: String,
    pub count: u64,
    pub trend: Trend,
}

/// Share of the library held by one document type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeShare {
    pub label: String,
    pub count: u64,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Normal,
    Degraded,
}

/// Status of one backing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub service: String,
    pub state: HealthState,
}

/// Everything the stats screen renders, in one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub overview: UsageOverview,
    pub recent_activity: Vec<ActivityEntry>,
    pub popular_questions: Vec<PopularQuestion>,
    pub document_types: Vec<TypeShare>,
    pub service_health: Vec<ServiceHealth>,
}

/// Trait for the source feeding the stats screen
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn snapshot(&self) -> Result<AnalyticsSnapshot>;
}
