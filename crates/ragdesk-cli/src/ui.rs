//! Terminal UI utilities for the console

use colored::*;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
};
use std::io::{self, IsTerminal, Write};

use ragdesk_core::Result;

const PROMPT: &str = "ragdesk>";

/// Display the startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let rule_width = std::cmp::min(56, terminal_width.saturating_sub(2));
    let rule = "─".repeat(rule_width);

    println!();
    println!("{}", rule.blue());
    println!("  {}", "RagDesk · Knowledge Base Console".blue().bold());
    println!("  {}", "Terminal workbench for the internal RAG stack".blue());
    println!();
    println!("  {}", "Screens:".bold());

    let screens = [
        ("chat", "ask the knowledge base"),
        ("docs", "manage the document library"),
        ("upload", "stage files for ingestion"),
        ("search", "retrieve fragments with highlights"),
        ("stats", "usage analytics"),
        ("settings", "tune system parameters"),
    ];
    for (name, blurb) in screens {
        println!("  • {} {}", format!("{:<10}", name).green(), blurb);
    }

    println!();
    println!("  {}", "v0.1.0 · simulated backends".dimmed());
    println!("{}", rule.blue());
    println!();
    println!(
        "{}",
        "💡 Tip: bare text goes to chat; type 'help' for the full command list".dimmed()
    );
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - ask the knowledge base (bare text works too)", "chat <question>".green());
    println!("  {} - show the conversation so far", "chat".green());
    println!("  {} - list documents, optionally matching text", "docs [text]".green());
    println!("  {} - order the table", "docs sort <date|name|size>".green());
    println!("  {} - narrow by status", "docs filter <all|processed|processing|error>".green());
    println!("  {} - view / fetch a document (placeholders)", "docs view|download <id>".green());
    println!("  {} - remove a document", "docs delete <id>".green());
    println!("  {} - library counters", "docs stats".green());
    println!("  {} - reset filters and ordering", "docs clear".green());
    println!("  {} - stage files for upload", "upload <path> [path...]".green());
    println!("  {} - transfer everything pending", "upload start".green());
    println!("  {} - show staged files", "upload list".green());
    println!("  {} - unstage one file / all files", "upload remove <id> | upload clear".green());
    println!("  {} - search the knowledge base", "search <query>".green());
    println!("  {} - set result order", "search order <relevance|title>".green());
    println!("  {} - narrow by type", "search type <pdf|word|markdown|text|all>".green());
    println!("  {} - recent queries", "search history".green());
    println!("  {} - usage statistics", "stats".green());
    println!("  {} - view / edit / persist settings", "settings [set <field> <value>|save|reset]".green());
    println!("  {} - show this help message", "help".green());
    println!("  {} - exit the console", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  年假有幾天？");
    println!("  docs sort name");
    println!("  search 員工假期政策");
    println!("  settings set temperature 0.4");
}

/// Raw-mode session for the line editor. The terminal is restored on
/// `release`, or by `Drop` when the editor bails out with an error.
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn release(mut self) -> Result<()> {
        self.active = false;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}

/// Read one line with history navigation (↑/↓), Esc to cancel
pub async fn handle_input_with_history(history: &mut Vec<String>) -> Result<String> {
    // Piped input bypasses the interactive editor
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok("exit".to_string());
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(input);
    }

    let guard = RawModeGuard::enable()?;
    let mut input = String::new();
    let mut history_index: Option<usize> = None;
    let mut cursor_pos = 0;

    redraw_line(&input, cursor_pos)?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            match key_event.code {
                KeyCode::Enter => {
                    guard.release()?;
                    println!();
                    if !input.is_empty() {
                        history.push(input.clone());
                    }
                    return Ok(input);
                }
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    guard.release()?;
                    println!();
                    return Ok("exit".to_string());
                }
                KeyCode::Char(c) => {
                    input.insert(byte_offset(&input, cursor_pos), c);
                    cursor_pos += 1;
                    redraw_line(&input, cursor_pos)?;
                }
                KeyCode::Backspace => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        input.remove(byte_offset(&input, cursor_pos));
                        redraw_line(&input, cursor_pos)?;
                    }
                }
                KeyCode::Left => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        redraw_line(&input, cursor_pos)?;
                    }
                }
                KeyCode::Right => {
                    if cursor_pos < input.chars().count() {
                        cursor_pos += 1;
                        redraw_line(&input, cursor_pos)?;
                    }
                }
                KeyCode::Up => {
                    if !history.is_empty() {
                        let new_index = match history_index {
                            None => history.len() - 1,
                            Some(idx) if idx > 0 => idx - 1,
                            Some(idx) => idx,
                        };
                        history_index = Some(new_index);
                        input = history[new_index].clone();
                        cursor_pos = input.chars().count();
                        redraw_line(&input, cursor_pos)?;
                    }
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx < history.len() - 1 {
                            let new_index = idx + 1;
                            history_index = Some(new_index);
                            input = history[new_index].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        cursor_pos = input.chars().count();
                        redraw_line(&input, cursor_pos)?;
                    }
                }
                KeyCode::Esc => {
                    guard.release()?;
                    println!();
                    return Ok(String::new());
                }
                _ => {}
            }
        }
    }
}

/// Repaint the prompt line and park the cursor after `cursor_pos` chars
fn redraw_line(input: &str, cursor_pos: usize) -> Result<()> {
    execute!(io::stdout(), MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    print!("{} {}", PROMPT.green().bold(), input);
    // the prompt is ASCII, so its column width equals its length
    let column = PROMPT.len() + 1 + display_width(input, cursor_pos);
    execute!(io::stdout(), MoveToColumn(column as u16))?;
    io::stdout().flush()?;
    Ok(())
}

/// Byte index of the `char_pos`-th character
fn byte_offset(input: &str, char_pos: usize) -> usize {
    input
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(input.len())
}

/// Terminal columns taken by the first `char_count` characters.
/// CJK characters occupy two columns.
fn display_width(input: &str, char_count: usize) -> usize {
    input
        .chars()
        .take(char_count)
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum()
}

/// Table and list size formatting, KB below one MiB
pub fn format_size(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    if (bytes as f64) < MIB {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB)
    }
}

/// Upload screen size formatting, always MB with two decimals
pub fn format_upload_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Fixed-width ASCII progress bar
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    let mut bar = String::with_capacity(width);
    bar.push_str(&"#".repeat(filled));
    bar.push_str(&"-".repeat(width.saturating_sub(filled)));
    bar
}

pub fn notify_success(title: &str, detail: &str) {
    println!("{} {}", "✅".green(), title.bold());
    if !detail.is_empty() {
        println!("   {}", detail.dimmed());
    }
}

pub fn notify_error(title: &str, detail: &str) {
    println!("{} {}", "❌".red(), title.bold());
    if !detail.is_empty() {
        println!("   {}", detail.dimmed());
    }
}

pub fn notify_info(title: &str, detail: &str) {
    println!("{} {}", "💡".cyan(), title.bold());
    if !detail.is_empty() {
        println!("   {}", detail.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_below_one_mib_render_as_kb() {
        assert_eq!(format_size(314_573), "307.2 KB");
        assert_eq!(format_size(524_288), "512.0 KB");
        assert_eq!(format_size(1024), "1.0 KB");
    }

    #[test]
    fn sizes_from_one_mib_render_as_mb() {
        assert_eq!(format_size(2_621_440), "2.5 MB");
        assert_eq!(format_size(1_258_291), "1.2 MB");
        assert_eq!(format_size(4_718_592), "4.5 MB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
    }

    #[test]
    fn upload_sizes_always_use_two_decimal_mb() {
        assert_eq!(format_upload_size(52_428_800), "50.00 MB");
        assert_eq!(format_upload_size(1024), "0.00 MB");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 10), "----------");
        assert_eq!(progress_bar(50, 10), "#####-----");
        assert_eq!(progress_bar(100, 10), "##########");
        assert_eq!(progress_bar(43, 20), "########------------");
    }

    #[test]
    fn raw_mode_guard_tolerates_a_terminal_that_is_not_raw() {
        // release reports a clean exit even when raw mode never took effect
        let released = RawModeGuard { active: true };
        assert!(released.release().is_ok());

        // an unreleased guard restores silently on drop
        drop(RawModeGuard { active: true });
        drop(RawModeGuard { active: false });
    }

    #[test]
    fn byte_offset_handles_multibyte_input() {
        let input = "a年b";
        assert_eq!(byte_offset(input, 0), 0);
        assert_eq!(byte_offset(input, 1), 1);
        assert_eq!(byte_offset(input, 2), 4);
        assert_eq!(byte_offset(input, 3), 5);
    }

    #[test]
    fn display_width_counts_cjk_as_two_columns() {
        assert_eq!(display_width("abc", 3), 3);
        assert_eq!(display_width("年假", 2), 4);
        assert_eq!(display_width("a年b", 2), 3);
    }
}
