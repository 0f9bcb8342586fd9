//! Console command grammar

use ragdesk_core::{DocTypeFilter, DocumentStatus, ResultOrder};
use ragdesk_kb::{SortKey, StatusFilter};

/// A parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Exit,
    /// `None` shows the transcript, `Some` asks a question
    Chat(Option<String>),
    Docs(DocsCommand),
    Upload(UploadCommand),
    Search(SearchCommand),
    Stats,
    Settings(SettingsCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocsCommand {
    /// List documents, optionally narrowed by free text
    List(Option<String>),
    Sort(SortKey),
    Filter(StatusFilter),
    View(String),
    Download(String),
    Delete(String),
    Stats,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadCommand {
    Stage(Vec<String>),
    Start,
    List,
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    Run(String),
    Order(ResultOrder),
    /// `None` clears the type restriction
    Type(Option<DocTypeFilter>),
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsCommand {
    Show,
    Set { field: String, value: String },
    Save,
    Reset,
}

/// Parse one console line. Unrecognized leading words fall through to chat,
/// so bare questions work without a prefix.
pub fn parse(input: &str) -> Result<Command, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty command".to_string());
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (trimmed, None),
    };

    match head {
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        "chat" => Ok(Command::Chat(rest.map(str::to_string))),
        "docs" => parse_docs(rest),
        "upload" => parse_upload(rest),
        "search" => parse_search(rest),
        "stats" => Ok(Command::Stats),
        "settings" => parse_settings(rest),
        _ => Ok(Command::Chat(Some(trimmed.to_string()))),
    }
}

fn parse_docs(rest: Option<&str>) -> Result<Command, String> {
    let Some(rest) = rest else {
        return Ok(Command::Docs(DocsCommand::List(None)));
    };
    let (word, arg) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (rest, None),
    };
    match word {
        "sort" => {
            let key = match arg {
                Some("date") => SortKey::UploadDate,
                Some("name") => SortKey::Name,
                Some("size") => SortKey::Size,
                _ => return Err("usage: docs sort <date|name|size>".to_string()),
            };
            Ok(Command::Docs(DocsCommand::Sort(key)))
        }
        "filter" => {
            let filter = match arg {
                Some("all") => StatusFilter::All,
                Some("processed") => StatusFilter::Only(DocumentStatus::Processed),
                Some("processing") => StatusFilter::Only(DocumentStatus::Processing),
                Some("error") => StatusFilter::Only(DocumentStatus::Error),
                _ => return Err("usage: docs filter <all|processed|processing|error>".to_string()),
            };
            Ok(Command::Docs(DocsCommand::Filter(filter)))
        }
        "view" => match arg {
            Some(id) if !id.is_empty() => Ok(Command::Docs(DocsCommand::View(id.to_string()))),
            _ => Err("usage: docs view <id>".to_string()),
        },
        "download" => match arg {
            Some(id) if !id.is_empty() => Ok(Command::Docs(DocsCommand::Download(id.to_string()))),
            _ => Err("usage: docs download <id>".to_string()),
        },
        "delete" => match arg {
            Some(id) if !id.is_empty() => Ok(Command::Docs(DocsCommand::Delete(id.to_string()))),
            _ => Err("usage: docs delete <id>".to_string()),
        },
        "stats" => Ok(Command::Docs(DocsCommand::Stats)),
        "clear" => Ok(Command::Docs(DocsCommand::Clear)),
        _ => Ok(Command::Docs(DocsCommand::List(Some(rest.to_string())))),
    }
}

fn parse_upload(rest: Option<&str>) -> Result<Command, String> {
    let Some(rest) = rest else {
        return Ok(Command::Upload(UploadCommand::List));
    };
    let (word, arg) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (rest, None),
    };
    match word {
        "start" => Ok(Command::Upload(UploadCommand::Start)),
        "list" => Ok(Command::Upload(UploadCommand::List)),
        "clear" => Ok(Command::Upload(UploadCommand::Clear)),
        "remove" => match arg {
            Some(id) if !id.is_empty() => Ok(Command::Upload(UploadCommand::Remove(id.to_string()))),
            _ => Err("usage: upload remove <id>".to_string()),
        },
        _ => {
            let paths = rest.split_whitespace().map(str::to_string).collect();
            Ok(Command::Upload(UploadCommand::Stage(paths)))
        }
    }
}

fn parse_search(rest: Option<&str>) -> Result<Command, String> {
    let Some(rest) = rest else {
        return Err("usage: search <query>".to_string());
    };
    let (word, arg) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (rest, None),
    };
    match word {
        "order" => {
            let order = match arg {
                Some("relevance") => ResultOrder::Relevance,
                Some("title") => ResultOrder::Title,
                _ => return Err("usage: search order <relevance|title>".to_string()),
            };
            Ok(Command::Search(SearchCommand::Order(order)))
        }
        "type" => {
            let doc_type = match arg {
                Some("pdf") => Some(DocTypeFilter::Pdf),
                Some("word") => Some(DocTypeFilter::Word),
                Some("markdown") => Some(DocTypeFilter::Markdown),
                Some("text") => Some(DocTypeFilter::Text),
                Some("all") => None,
                _ => return Err("usage: search type <pdf|word|markdown|text|all>".to_string()),
            };
            Ok(Command::Search(SearchCommand::Type(doc_type)))
        }
        "history" => Ok(Command::Search(SearchCommand::History)),
        _ => Ok(Command::Search(SearchCommand::Run(rest.to_string()))),
    }
}

fn parse_settings(rest: Option<&str>) -> Result<Command, String> {
    let Some(rest) = rest else {
        return Ok(Command::Settings(SettingsCommand::Show));
    };
    let (word, arg) = match rest.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (rest, None),
    };
    match word {
        "save" => Ok(Command::Settings(SettingsCommand::Save)),
        "reset" => Ok(Command::Settings(SettingsCommand::Reset)),
        "set" => {
            let usage = "usage: settings set <field> <value>".to_string();
            let Some(arg) = arg else { return Err(usage) };
            match arg.split_once(char::is_whitespace) {
                Some((field, value)) if !value.trim().is_empty() => {
                    Ok(Command::Settings(SettingsCommand::Set {
                        field: field.to_string(),
                        value: value.trim().to_string(),
                    }))
                }
                _ => Err(usage),
            }
        }
        _ => Err("usage: settings [set <field> <value>|save|reset]".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_falls_through_to_chat() {
        assert_eq!(
            parse("年假有幾天？"),
            Ok(Command::Chat(Some("年假有幾天？".to_string())))
        );
        assert_eq!(
            parse("what is the leave policy"),
            Ok(Command::Chat(Some("what is the leave policy".to_string())))
        );
    }

    #[test]
    fn chat_without_question_shows_transcript() {
        assert_eq!(parse("chat"), Ok(Command::Chat(None)));
        assert_eq!(
            parse("chat 年假"),
            Ok(Command::Chat(Some("年假".to_string())))
        );
    }

    #[test]
    fn exit_aliases() {
        assert_eq!(parse("exit"), Ok(Command::Exit));
        assert_eq!(parse("quit"), Ok(Command::Exit));
        assert_eq!(parse("  help  "), Ok(Command::Help));
    }

    #[test]
    fn docs_subcommands() {
        assert_eq!(parse("docs"), Ok(Command::Docs(DocsCommand::List(None))));
        assert_eq!(
            parse("docs 政策"),
            Ok(Command::Docs(DocsCommand::List(Some("政策".to_string()))))
        );
        assert_eq!(
            parse("docs sort name"),
            Ok(Command::Docs(DocsCommand::Sort(SortKey::Name)))
        );
        assert_eq!(
            parse("docs sort size"),
            Ok(Command::Docs(DocsCommand::Sort(SortKey::Size)))
        );
        assert_eq!(
            parse("docs filter processed"),
            Ok(Command::Docs(DocsCommand::Filter(StatusFilter::Only(
                DocumentStatus::Processed
            ))))
        );
        assert_eq!(
            parse("docs filter all"),
            Ok(Command::Docs(DocsCommand::Filter(StatusFilter::All)))
        );
        assert_eq!(
            parse("docs delete 3"),
            Ok(Command::Docs(DocsCommand::Delete("3".to_string())))
        );
        assert_eq!(
            parse("docs view 1"),
            Ok(Command::Docs(DocsCommand::View("1".to_string())))
        );
        assert_eq!(
            parse("docs download 2"),
            Ok(Command::Docs(DocsCommand::Download("2".to_string())))
        );
        assert_eq!(parse("docs stats"), Ok(Command::Docs(DocsCommand::Stats)));
        assert_eq!(parse("docs clear"), Ok(Command::Docs(DocsCommand::Clear)));
    }

    #[test]
    fn docs_usage_errors() {
        assert!(parse("docs sort").is_err());
        assert!(parse("docs sort alpha").is_err());
        assert!(parse("docs filter done").is_err());
        assert!(parse("docs delete").is_err());
    }

    #[test]
    fn upload_subcommands() {
        assert_eq!(parse("upload"), Ok(Command::Upload(UploadCommand::List)));
        assert_eq!(parse("upload list"), Ok(Command::Upload(UploadCommand::List)));
        assert_eq!(parse("upload start"), Ok(Command::Upload(UploadCommand::Start)));
        assert_eq!(parse("upload clear"), Ok(Command::Upload(UploadCommand::Clear)));
        assert_eq!(
            parse("upload remove abc"),
            Ok(Command::Upload(UploadCommand::Remove("abc".to_string())))
        );
        assert_eq!(
            parse("upload a.pdf b.txt"),
            Ok(Command::Upload(UploadCommand::Stage(vec![
                "a.pdf".to_string(),
                "b.txt".to_string()
            ])))
        );
        assert!(parse("upload remove").is_err());
    }

    #[test]
    fn search_subcommands() {
        assert_eq!(
            parse("search 員工假期"),
            Ok(Command::Search(SearchCommand::Run("員工假期".to_string())))
        );
        assert_eq!(
            parse("search order title"),
            Ok(Command::Search(SearchCommand::Order(ResultOrder::Title)))
        );
        assert_eq!(
            parse("search type pdf"),
            Ok(Command::Search(SearchCommand::Type(Some(DocTypeFilter::Pdf))))
        );
        assert_eq!(
            parse("search type all"),
            Ok(Command::Search(SearchCommand::Type(None)))
        );
        assert_eq!(parse("search history"), Ok(Command::Search(SearchCommand::History)));
        assert!(parse("search").is_err());
        assert!(parse("search order").is_err());
        assert!(parse("search type video").is_err());
    }

    #[test]
    fn settings_subcommands() {
        assert_eq!(parse("settings"), Ok(Command::Settings(SettingsCommand::Show)));
        assert_eq!(parse("settings save"), Ok(Command::Settings(SettingsCommand::Save)));
        assert_eq!(parse("settings reset"), Ok(Command::Settings(SettingsCommand::Reset)));
        assert_eq!(
            parse("settings set temperature 0.4"),
            Ok(Command::Settings(SettingsCommand::Set {
                field: "temperature".to_string(),
                value: "0.4".to_string(),
            }))
        );
        assert_eq!(
            parse("settings set system_prompt 回答要簡潔 準確"),
            Ok(Command::Settings(SettingsCommand::Set {
                field: "system_prompt".to_string(),
                value: "回答要簡潔 準確".to_string(),
            }))
        );
        assert!(parse("settings set").is_err());
        assert!(parse("settings set temperature").is_err());
        assert!(parse("settings wipe").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }
}
