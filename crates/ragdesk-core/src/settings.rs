//! System settings model, validation bounds, and the persistence trait

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Answer model selectable in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "claude-3")]
    Claude3,
    #[serde(rename = "local-llm")]
    LocalLlm,
}

impl AiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4 => "gpt-4",
            Self::Claude3 => "claude-3",
            Self::LocalLlm => "local-llm",
        }
    }

    /// Display label shown in the settings screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "GPT-3.5 Turbo",
            Self::Gpt4 => "GPT-4",
            Self::Claude3 => "Claude-3",
            Self::LocalLlm => "本地模型",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gpt-3.5-turbo" => Ok(Self::Gpt35Turbo),
            "gpt-4" => Ok(Self::Gpt4),
            "claude-3" => Ok(Self::Claude3),
            "local-llm" => Ok(Self::LocalLlm),
            other => Err(Error::InvalidInput(format!("unknown AI model: {}", other))),
        }
    }
}

/// Logging verbosity selectable in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            other => Err(Error::InvalidInput(format!("unknown log level: {}", other))),
        }
    }
}

/// Tunable parameters for the whole system, grouped the way the settings
/// screen presents them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // AI model
    pub ai_model: AiModel,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: String,

    // Retrieval
    pub retrieval_top_k: u32,
    pub similarity_threshold: f32,
    pub chunk_size: u32,
    pub chunk_overlap: u32,

    // System
    pub enable_notifications: bool,
    pub auto_backup: bool,
    pub log_level: LogLevel,
    /// Upload ceiling in megabytes
    pub max_file_size_mb: u32,

    // Security
    pub enable_auth: bool,
    pub session_timeout_hours: u32,
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_model: AiModel::Gpt35Turbo,
            temperature: 0.7,
            max_tokens: 2048,
            system_prompt: "你是一個專業的知識庫助手，請根據提供的文檔內容準確回答用戶問題。"
                .to_string(),
            retrieval_top_k: 5,
            similarity_threshold: 0.75,
            chunk_size: 1024,
            chunk_overlap: 200,
            enable_notifications: true,
            auto_backup: true,
            log_level: LogLevel::Info,
            max_file_size_mb: 50,
            enable_auth: true,
            session_timeout_hours: 24,
            max_retries: 3,
        }
    }
}

impl Settings {
    /// Check every numeric field against the range the settings screen
    /// enforces, returning one message per violation
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(0.0..=1.0).contains(&self.temperature) {
            problems.push("temperature must be between 0.0 and 1.0".to_string());
        }
        if !(512..=8192).contains(&self.max_tokens) {
            problems.push("max_tokens must be between 512 and 8192".to_string());
        }
        if !(1..=20).contains(&self.retrieval_top_k) {
            problems.push("retrieval_top_k must be between 1 and 20".to_string());
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            problems.push("similarity_threshold must be between 0.0 and 1.0".to_string());
        }
        if !(256..=4096).contains(&self.chunk_size) {
            problems.push("chunk_size must be between 256 and 4096".to_string());
        }
        if self.chunk_overlap > 512 {
            problems.push("chunk_overlap must be at most 512".to_string());
        }
        if !(1..=100).contains(&self.max_file_size_mb) {
            problems.push("max_file_size_mb must be between 1 and 100".to_string());
        }
        if !(1..=168).contains(&self.session_timeout_hours) {
            problems.push("session_timeout_hours must be between 1 and 168".to_string());
        }
        if !(1..=10).contains(&self.max_retries) {
            problems.push("max_retries must be between 1 and 10".to_string());
        }
        problems
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Static deployment facts shown at the bottom of the settings screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub deployed_at: String,
    pub database_status: String,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            version: "v1.0.0".to_string(),
            deployed_at: "2024-01-15 10:30:00".to_string(),
            database_status: "正常運行".to_string(),
        }
    }
}

/// Trait for loading and persisting the system settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings>;
    /// Persist the given settings; implementations reject invalid values
    async fn save(&self, settings: &Settings) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().is_valid());
    }

    #[test]
    fn out_of_range_fields_are_reported() {
        let mut settings = Settings::default();
        settings.temperature = 1.5;
        settings.max_tokens = 100;
        settings.chunk_overlap = 1000;
        let problems = settings.validate();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("temperature"));
        assert!(problems[1].contains("max_tokens"));
        assert!(problems[2].contains("chunk_overlap"));
    }

    #[test]
    fn boundary_values_are_valid() {
        let mut settings = Settings::default();
        settings.temperature = 0.0;
        settings.max_tokens = 8192;
        settings.retrieval_top_k = 20;
        settings.chunk_size = 256;
        settings.chunk_overlap = 0;
        settings.max_file_size_mb = 100;
        settings.session_timeout_hours = 168;
        settings.max_retries = 1;
        assert!(settings.is_valid());
    }

    #[test]
    fn model_round_trips_through_str() {
        for model in [
            AiModel::Gpt35Turbo,
            AiModel::Gpt4,
            AiModel::Claude3,
            AiModel::LocalLlm,
        ] {
            assert_eq!(model.as_str().parse::<AiModel>().unwrap(), model);
        }
        assert!("gpt-5".parse::<AiModel>().is_err());
    }

    #[test]
    fn log_level_parse_is_case_insensitive() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("trace".parse::<LogLevel>().is_err());
    }
}
