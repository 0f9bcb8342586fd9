//! Simulated service backends
//!
//! The console ships without live services; these implementations stand in
//! for them with fixed latencies and canned data. Swapping a simulated
//! backend for a real one only touches construction in the binary.

use std::env;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

use ragdesk_core::{
    AnalyticsSnapshot, AnalyticsSource, AssistantReply, ChatBackend, Error, Result, ResultOrder,
    SearchBackend, SearchHit, SearchRequest, Settings, SettingsStore, TransportOutcome,
    UploadRecord, UploadTransport,
};

use crate::demo;

/// Reason reported by the simulated transport when a transfer fails
pub const REJECTION_REASON: &str = "Upload failed, please retry";

/// Latencies and outcome odds for the simulated backends
#[derive(Debug, Clone, PartialEq)]
pub struct SimProfile {
    pub chat_delay: Duration,
    pub search_delay: Duration,
    pub settings_save_delay: Duration,
    pub upload_step_delay: Duration,
    /// Probability in 0.0..=1.0 that the transport accepts a file
    pub upload_success_rate: f64,
}

impl Default for SimProfile {
    fn default() -> Self {
        Self {
            chat_delay: Duration::from_millis(2000),
            search_delay: Duration::from_millis(1000),
            settings_save_delay: Duration::from_millis(1000),
            upload_step_delay: Duration::from_millis(200),
            upload_success_rate: 0.8,
        }
    }
}

impl SimProfile {
    /// Zero latency and certain success, for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            chat_delay: Duration::ZERO,
            search_delay: Duration::ZERO,
            settings_save_delay: Duration::ZERO,
            upload_step_delay: Duration::ZERO,
            upload_success_rate: 1.0,
        }
    }

    /// Build the profile from environment variables, falling back to the
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            chat_delay: env_millis("RAGDESK_CHAT_DELAY_MS", defaults.chat_delay),
            search_delay: env_millis("RAGDESK_SEARCH_DELAY_MS", defaults.search_delay),
            settings_save_delay: env_millis(
                "RAGDESK_SETTINGS_SAVE_DELAY_MS",
                defaults.settings_save_delay,
            ),
            upload_step_delay: env_millis("RAGDESK_UPLOAD_STEP_MS", defaults.upload_step_delay),
            upload_success_rate: env_rate(
                "RAGDESK_UPLOAD_SUCCESS_RATE",
                defaults.upload_success_rate,
            ),
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    match env::var(key) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_rate(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(raw) => match raw.parse::<f64>() {
            Ok(rate) if (0.0..=1.0).contains(&rate) => rate,
            _ => {
                tracing::warn!("Ignoring invalid {}={:?}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

/// Answering backend that echoes the question into a canned reply
pub struct SimulatedChatBackend {
    delay: Duration,
}

impl SimulatedChatBackend {
    pub fn new(profile: &SimProfile) -> Self {
        Self {
            delay: profile.chat_delay,
        }
    }
}

#[async_trait]
impl ChatBackend for SimulatedChatBackend {
    async fn answer(&self, question: &str) -> Result<AssistantReply> {
        sleep(self.delay).await;
        Ok(AssistantReply {
            content: format!(
                "根據您的問題\"{}\"，我在知識庫中找到了相關信息。這是一個模擬回復，實際使用時會連接到RAG後端服務進行文檔檢索和生成回答。",
                question
            ),
            sources: vec![
                "文檔A.pdf".to_string(),
                "手冊B.docx".to_string(),
                "政策C.txt".to_string(),
            ],
        })
    }
}

/// Retrieval backend answering every query from the demo corpus
pub struct SimulatedSearchBackend {
    delay: Duration,
}

impl SimulatedSearchBackend {
    pub fn new(profile: &SimProfile) -> Self {
        Self {
            delay: profile.search_delay,
        }
    }
}

#[async_trait]
impl SearchBackend for SimulatedSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        sleep(self.delay).await;

        let mut hits = demo::search_hits();
        if !request.doc_types.is_empty() {
            hits.retain(|hit| request.doc_types.iter().any(|t| t.matches(&hit.document)));
        }
        match request.order {
            ResultOrder::Relevance => {
                hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
            }
            ResultOrder::Title => hits.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        Ok(hits)
    }
}

/// Transport that accepts each file with a fixed probability
pub struct SimulatedUploadTransport {
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedUploadTransport {
    pub fn new(profile: &SimProfile) -> Self {
        Self::with_rng(profile.upload_success_rate, StdRng::from_os_rng())
    }

    /// Deterministic transport for tests and scripted runs
    pub fn seeded(success_rate: f64, seed: u64) -> Self {
        Self::with_rng(success_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(success_rate: f64, rng: StdRng) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl UploadTransport for SimulatedUploadTransport {
    async fn send(&self, upload: &UploadRecord) -> Result<TransportOutcome> {
        let accepted = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| Error::UploadTransport(format!("Lock error: {}", e)))?;
            rng.random_bool(self.success_rate)
        };
        tracing::debug!(
            "Transport verdict for {}: {}",
            upload.file.name,
            if accepted { "accepted" } else { "rejected" }
        );
        Ok(if accepted {
            TransportOutcome::Accepted
        } else {
            TransportOutcome::Rejected {
                reason: REJECTION_REASON.to_string(),
            }
        })
    }
}

/// In-memory settings store that rejects out-of-range values
pub struct SimulatedSettingsStore {
    settings: RwLock<Settings>,
    save_delay: Duration,
}

impl SimulatedSettingsStore {
    pub fn new(profile: &SimProfile) -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            save_delay: profile.settings_save_delay,
        }
    }
}

#[async_trait]
impl SettingsStore for SimulatedSettingsStore {
    async fn load(&self) -> Result<Settings> {
        let settings = self
            .settings
            .read()
            .map_err(|e| Error::SettingsStore(format!("Lock error: {}", e)))?;
        Ok(settings.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let problems = settings.validate();
        if !problems.is_empty() {
            return Err(Error::Validation(problems.join("; ")));
        }

        sleep(self.save_delay).await;

        let mut current = self
            .settings
            .write()
            .map_err(|e| Error::SettingsStore(format!("Lock error: {}", e)))?;
        *current = settings.clone();
        tracing::info!("Settings saved");
        Ok(())
    }
}

/// Usage report source backed by the canned snapshot
pub struct StaticAnalyticsSource;

#[async_trait]
impl AnalyticsSource for StaticAnalyticsSource {
    async fn snapshot(&self) -> Result<AnalyticsSnapshot> {
        Ok(demo::analytics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::{DocTypeFilter, PendingFile};

    fn hit_ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn default_profile_matches_shipped_latencies() {
        let profile = SimProfile::default();
        assert_eq!(profile.chat_delay, Duration::from_millis(2000));
        assert_eq!(profile.search_delay, Duration::from_millis(1000));
        assert_eq!(profile.settings_save_delay, Duration::from_millis(1000));
        assert_eq!(profile.upload_step_delay, Duration::from_millis(200));
        assert_eq!(profile.upload_success_rate, 0.8);
    }

    #[tokio::test]
    async fn chat_reply_embeds_the_question_and_cites_sources() {
        let backend = SimulatedChatBackend::new(&SimProfile::instant());
        let reply = backend.answer("年假有幾天？").await.unwrap();

        assert!(reply.content.contains("年假有幾天？"));
        assert_eq!(reply.sources.len(), 3);
        assert_eq!(reply.sources[0], "文檔A.pdf");
    }

    #[tokio::test]
    async fn search_defaults_to_relevance_order() {
        let backend = SimulatedSearchBackend::new(&SimProfile::instant());
        let hits = backend.search(&SearchRequest::new("假期")).await.unwrap();
        assert_eq!(hit_ids(&hits), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn search_orders_by_title_on_request() {
        let backend = SimulatedSearchBackend::new(&SimProfile::instant());
        let request = SearchRequest::new("假期").with_order(ResultOrder::Title);
        let hits = backend.search(&request).await.unwrap();
        assert_eq!(hit_ids(&hits), ["2", "1", "3"]);
    }

    #[tokio::test]
    async fn search_narrows_by_document_type() {
        let backend = SimulatedSearchBackend::new(&SimProfile::instant());

        let pdf_only = SearchRequest::new("政策").with_doc_types(vec![DocTypeFilter::Pdf]);
        assert_eq!(hit_ids(&backend.search(&pdf_only).await.unwrap()), ["1"]);

        let pdf_or_md = SearchRequest::new("政策")
            .with_doc_types(vec![DocTypeFilter::Pdf, DocTypeFilter::Markdown]);
        assert_eq!(
            hit_ids(&backend.search(&pdf_or_md).await.unwrap()),
            ["1", "3"]
        );
    }

    #[tokio::test]
    async fn transport_at_certainty_is_deterministic() {
        let record = UploadRecord::staged(PendingFile::new("a.pdf", 1024));

        let always = SimulatedUploadTransport::seeded(1.0, 7);
        assert_eq!(
            always.send(&record).await.unwrap(),
            TransportOutcome::Accepted
        );

        let never = SimulatedUploadTransport::seeded(0.0, 7);
        assert_eq!(
            never.send(&record).await.unwrap(),
            TransportOutcome::Rejected {
                reason: REJECTION_REASON.to_string()
            }
        );
    }

    #[tokio::test]
    async fn same_seed_gives_the_same_verdict_sequence() {
        let record = UploadRecord::staged(PendingFile::new("a.pdf", 1024));
        let first = SimulatedUploadTransport::seeded(0.8, 42);
        let second = SimulatedUploadTransport::seeded(0.8, 42);

        for _ in 0..10 {
            assert_eq!(
                first.send(&record).await.unwrap(),
                second.send(&record).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn settings_store_round_trips_valid_settings() {
        let store = SimulatedSettingsStore::new(&SimProfile::instant());
        assert_eq!(store.load().await.unwrap(), Settings::default());

        let mut updated = Settings::default();
        updated.retrieval_top_k = 10;
        store.save(&updated).await.unwrap();
        assert_eq!(store.load().await.unwrap().retrieval_top_k, 10);
    }

    #[tokio::test]
    async fn settings_store_rejects_out_of_range_values() {
        let store = SimulatedSettingsStore::new(&SimProfile::instant());

        let mut bad = Settings::default();
        bad.temperature = 5.0;
        let err = store.save(&bad).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // nothing was persisted
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn analytics_snapshot_is_stable() {
        let source = StaticAnalyticsSource;
        let snapshot = source.snapshot().await.unwrap();
        assert_eq!(snapshot.overview.total_questions, 1247);
        assert_eq!(snapshot.recent_activity.len(), 5);
        assert_eq!(snapshot.popular_questions.len(), 5);
        assert_eq!(snapshot.service_health.len(), 4);
    }
}
