//! Document library screen

use colored::*;

use ragdesk_core::DocumentStatus;
use ragdesk_kb::{DocumentQuery, DocumentStore, LibraryStats};

use crate::ui;

/// Render the library through the active query
pub fn list(store: &DocumentStore, query: &DocumentQuery) {
    let rows = store.select(query);
    if rows.is_empty() {
        if store.is_empty() {
            println!("{}", "No documents yet".dimmed());
        } else {
            println!("{}", "No matching documents".dimmed());
        }
        return;
    }

    for doc in rows {
        let tags = if doc.tags.is_empty() {
            "-".to_string()
        } else {
            doc.tags.join(", ")
        };
        println!("[{}] {}", doc.id.bold(), doc.name);
        println!(
            "    {} · {} · {} · {}",
            ui::format_size(doc.size),
            doc.uploaded_at.format("%Y-%m-%d"),
            status_label(doc.status),
            tags.dimmed()
        );
    }
}

pub fn delete(store: &mut DocumentStore, id: &str) {
    match store.remove(id) {
        Some(doc) => ui::notify_success("Document removed", &doc.name),
        None => ui::notify_error("No document with that id", ""),
    }
}

/// Placeholder until a document viewer exists
pub fn view(store: &DocumentStore, id: &str) {
    match store.get(id) {
        Some(doc) => ui::notify_info("Viewer not wired up yet", &doc.name),
        None => ui::notify_error("No document with that id", ""),
    }
}

/// Placeholder until the backend can serve file bodies
pub fn download(store: &DocumentStore, id: &str) {
    match store.get(id) {
        Some(doc) => ui::notify_info("Download not wired up yet", &doc.name),
        None => ui::notify_error("No document with that id", ""),
    }
}

pub fn show_stats(stats: &LibraryStats) {
    println!("{}", "Library".bold());
    println!("  total        {}", stats.total);
    println!("  processed    {}", stats.processed);
    println!("  processing   {}", stats.processing);
    println!("  total size   {}", ui::format_size(stats.total_bytes));
}

fn status_label(status: DocumentStatus) -> ColoredString {
    match status {
        DocumentStatus::Processed => status.as_str().green(),
        DocumentStatus::Processing => status.as_str().yellow(),
        DocumentStatus::Error => status.as_str().red(),
    }
}
