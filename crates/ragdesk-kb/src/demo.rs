//! Built-in demo data for the console
//!
//! The console ships without a live backend, so the document library,
//! search corpus, and usage statistics are seeded from here. Names and
//! fragments are kept verbatim from the demo corpus.

use chrono::{DateTime, TimeZone, Utc};
use ragdesk_core::{
    ActivityEntry, ActivityKind, AnalyticsSnapshot, DocumentRecord, DocumentStatus, HealthState,
    PopularQuestion, SearchHit, ServiceHealth, Trend, TypeShare, UsageOverview,
};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// The seeded document library
pub fn documents() -> Vec<DocumentRecord> {
    vec![
        DocumentRecord {
            id: "1".to_string(),
            name: "公司政策手冊.pdf".to_string(),
            file_type: "pdf".to_string(),
            size: 2_621_440,
            uploaded_at: day(2024, 1, 15),
            status: DocumentStatus::Processed,
            tags: vec!["政策".to_string(), "人事".to_string()],
        },
        DocumentRecord {
            id: "2".to_string(),
            name: "技術文檔_API接口.docx".to_string(),
            file_type: "docx".to_string(),
            size: 1_258_291,
            uploaded_at: day(2024, 1, 14),
            status: DocumentStatus::Processed,
            tags: vec!["技術".to_string(), "API".to_string()],
        },
        DocumentRecord {
            id: "3".to_string(),
            name: "產品需求說明.md".to_string(),
            file_type: "md".to_string(),
            size: 524_288,
            uploaded_at: day(2024, 1, 13),
            status: DocumentStatus::Processing,
            tags: vec!["產品".to_string(), "需求".to_string()],
        },
        DocumentRecord {
            id: "4".to_string(),
            name: "會議記錄_2024Q1.txt".to_string(),
            file_type: "txt".to_string(),
            size: 314_573,
            uploaded_at: day(2024, 1, 12),
            status: DocumentStatus::Processed,
            tags: vec!["會議".to_string(), "記錄".to_string()],
        },
    ]
}

/// The corpus answered for every search
pub fn search_hits() -> Vec<SearchHit> {
    vec![
        SearchHit {
            id: "1".to_string(),
            title: "員工假期政策".to_string(),
            content: "根據公司政策，所有全職員工每年享有21天年假，可在入職滿一年後開始申請使用。病假不超過14天可不扣薪資...".to_string(),
            document: "公司政策手冊.pdf".to_string(),
            score: 0.95,
            highlights: vec!["年假".to_string(), "21天".to_string(), "病假".to_string()],
            page: Some(15),
        },
        SearchHit {
            id: "2".to_string(),
            title: "API接口認證機制".to_string(),
            content: "系統採用JWT令牌進行身份認證，每個API請求都需要在header中包含有效的Bearer token。令牌有效期為24小時...".to_string(),
            document: "技術文檔_API接口.docx".to_string(),
            score: 0.87,
            highlights: vec!["JWT".to_string(), "API".to_string(), "認證".to_string()],
            page: Some(3),
        },
        SearchHit {
            id: "3".to_string(),
            title: "產品功能需求".to_string(),
            content: "用戶管理模組需要支持角色權限控制，包括管理員、編輯者、查看者三種角色。每種角色具有不同的操作權限...".to_string(),
            document: "產品需求說明.md".to_string(),
            score: 0.76,
            highlights: vec!["用戶管理".to_string(), "角色權限".to_string(), "管理員".to_string()],
            page: None,
        },
    ]
}

/// Queries pre-filled into the search history panel
pub fn search_history() -> Vec<String> {
    vec![
        "員工假期政策".to_string(),
        "API接口文檔".to_string(),
        "角色權限管理".to_string(),
        "數據庫設計".to_string(),
    ]
}

/// The static usage report behind the stats screen
pub fn analytics() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        overview: UsageOverview {
            total_questions: 1247,
            total_documents: 156,
            total_users: 28,
            avg_response_time: 2.3,
        },
        recent_activity: vec![
            activity("10:30", "張三", "搜索了「API文檔」", ActivityKind::Search),
            activity("10:25", "李四", "上傳了「新產品說明書.pdf」", ActivityKind::Upload),
            activity("10:20", "王五", "詢問了關於員工政策的問題", ActivityKind::Chat),
            activity("10:15", "趙六", "下載了「技術規範.docx」", ActivityKind::Download),
            activity("10:10", "錢七", "搜索了「會議記錄」", ActivityKind::Search),
        ],
        popular_questions: vec![
            question("如何申請年假？", 45, Trend::Up),
            question("API接口如何認證？", 38, Trend::Up),
            question("員工福利有哪些？", 32, Trend::Down),
            question("技術規範要求是什麼？", 28, Trend::Up),
            question("會議室預訂流程？", 24, Trend::Stable),
        ],
        document_types: vec![
            share("PDF", 67, 43),
            share("Word", 45, 29),
            share("Markdown", 32, 20),
            share("文本", 12, 8),
        ],
        service_health: vec![
            health("API服務", HealthState::Normal),
            health("數據庫", HealthState::Normal),
            health("向量數據庫", HealthState::Degraded),
            health("文檔處理", HealthState::Normal),
        ],
    }
}

fn activity(time: &str, user: &str, action: &str, kind: ActivityKind) -> ActivityEntry {
    ActivityEntry {
        time: time.to_string(),
        user: user.to_string(),
        action: action.to_string(),
        kind,
    }
}

fn question(question: &str, count: u64, trend: Trend) -> PopularQuestion {
    PopularQuestion {
        question: question.to_string(),
        count,
        trend,
    }
}

fn share(label: &str, count: u64, percentage: u8) -> TypeShare {
    TypeShare {
        label: label.to_string(),
        count,
        percentage,
    }
}

fn health(service: &str, state: HealthState) -> ServiceHealth {
    ServiceHealth {
        service: service.to_string(),
        state,
    }
}
