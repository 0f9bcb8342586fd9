//! Settings screen: draft editing and persistence

use colored::*;
use std::str::FromStr;

use ragdesk_core::{AiModel, LogLevel, Settings, SettingsStore, SystemInfo};

use crate::ui;

/// Render the draft, grouped the way the settings screen groups fields
pub fn show(draft: &Settings) {
    println!("{}", "AI model".bold());
    print_field("ai_model", draft.ai_model.label());
    print_field("temperature", &draft.temperature.to_string());
    print_field("max_tokens", &draft.max_tokens.to_string());
    print_field("system_prompt", &draft.system_prompt);

    println!();
    println!("{}", "Retrieval".bold());
    print_field("retrieval_top_k", &draft.retrieval_top_k.to_string());
    print_field("similarity_threshold", &draft.similarity_threshold.to_string());
    print_field("chunk_size", &draft.chunk_size.to_string());
    print_field("chunk_overlap", &draft.chunk_overlap.to_string());

    println!();
    println!("{}", "System".bold());
    print_field("enable_notifications", bool_label(draft.enable_notifications));
    print_field("auto_backup", bool_label(draft.auto_backup));
    print_field("log_level", draft.log_level.as_str());
    print_field("max_file_size_mb", &draft.max_file_size_mb.to_string());

    println!();
    println!("{}", "Security".bold());
    print_field("enable_auth", bool_label(draft.enable_auth));
    print_field("session_timeout_hours", &draft.session_timeout_hours.to_string());
    print_field("max_retries", &draft.max_retries.to_string());

    let info = SystemInfo::current();
    println!();
    println!("{}", "System info".bold());
    print_field("version", &info.version);
    print_field("deployed", &info.deployed_at);
    print_field("database", &info.database_status);

    println!();
    println!(
        "{}",
        "edit with 'settings set <field> <value>', persist with 'settings save'".dimmed()
    );
}

/// Apply one field edit to the draft. Unknown fields and unparseable
/// values leave the draft untouched.
pub fn apply(draft: &mut Settings, field: &str, value: &str) -> Result<(), String> {
    match field {
        "ai_model" => draft.ai_model = AiModel::from_str(value).map_err(|e| e.to_string())?,
        "temperature" => draft.temperature = parse_value(field, value)?,
        "max_tokens" => draft.max_tokens = parse_value(field, value)?,
        "system_prompt" => draft.system_prompt = value.to_string(),
        "retrieval_top_k" => draft.retrieval_top_k = parse_value(field, value)?,
        "similarity_threshold" => draft.similarity_threshold = parse_value(field, value)?,
        "chunk_size" => draft.chunk_size = parse_value(field, value)?,
        "chunk_overlap" => draft.chunk_overlap = parse_value(field, value)?,
        "enable_notifications" => draft.enable_notifications = parse_switch(field, value)?,
        "auto_backup" => draft.auto_backup = parse_switch(field, value)?,
        "log_level" => draft.log_level = LogLevel::from_str(value).map_err(|e| e.to_string())?,
        "max_file_size_mb" => draft.max_file_size_mb = parse_value(field, value)?,
        "enable_auth" => draft.enable_auth = parse_switch(field, value)?,
        "session_timeout_hours" => draft.session_timeout_hours = parse_value(field, value)?,
        "max_retries" => draft.max_retries = parse_value(field, value)?,
        _ => return Err(format!("unknown field '{}'", field)),
    }
    Ok(())
}

pub async fn save(store: &dyn SettingsStore, draft: &Settings) {
    println!("{}", "Saving...".dimmed());
    match store.save(draft).await {
        Ok(()) => ui::notify_success("Settings saved", ""),
        Err(e) => ui::notify_error("Settings not saved", &e.to_string()),
    }
}

fn print_field(name: &str, value: &str) {
    println!("  {:<22} {}", name, value.cyan());
}

fn bool_label(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn parse_value<T: FromStr>(field: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value '{}' for {}", value, field))
}

fn parse_switch(field: &str, value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("{} wants on/off, got '{}'", field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_updates_numeric_fields() {
        let mut draft = Settings::default();
        apply(&mut draft, "temperature", "0.4").unwrap();
        apply(&mut draft, "max_tokens", "4096").unwrap();
        assert_eq!(draft.temperature, 0.4);
        assert_eq!(draft.max_tokens, 4096);
    }

    #[test]
    fn apply_updates_enums_and_switches() {
        let mut draft = Settings::default();
        apply(&mut draft, "ai_model", "claude-3").unwrap();
        apply(&mut draft, "log_level", "WARN").unwrap();
        apply(&mut draft, "auto_backup", "off").unwrap();
        assert_eq!(draft.ai_model, AiModel::Claude3);
        assert_eq!(draft.log_level, LogLevel::Warn);
        assert!(!draft.auto_backup);
    }

    #[test]
    fn apply_keeps_the_draft_on_bad_input() {
        let mut draft = Settings::default();
        assert!(apply(&mut draft, "temperature", "hot").is_err());
        assert!(apply(&mut draft, "font_size", "12").is_err());
        assert!(apply(&mut draft, "enable_auth", "maybe").is_err());
        assert_eq!(draft, Settings::default());
    }

    #[test]
    fn system_prompt_takes_free_text() {
        let mut draft = Settings::default();
        apply(&mut draft, "system_prompt", "回答要簡潔").unwrap();
        assert_eq!(draft.system_prompt, "回答要簡潔");
    }
}
