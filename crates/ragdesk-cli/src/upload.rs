//! Upload screen: staging, queue listing, transfer runs

use colored::*;
use std::io::{self, Write};
use std::path::Path;

use ragdesk_core::{PendingFile, UploadRecord, UploadStatus, UploadTransport};
use ragdesk_kb::UploadQueue;

use crate::ui;

/// Stage local files. Unreadable paths are reported and skipped; files
/// that fail validation still enter the queue in error state.
pub fn stage(queue: &mut UploadQueue, paths: &[String]) {
    let mut files = Vec::new();
    for path in paths {
        match PendingFile::from_path(Path::new(path)) {
            Ok(file) => files.push(file),
            Err(e) => ui::notify_error(path, &e.to_string()),
        }
    }
    if files.is_empty() {
        return;
    }

    queue.add_files(files);
    list(queue.records());
    if queue.has_pending() {
        ui::notify_info("Files staged", "run 'upload start' to transfer");
    }
}

pub fn list(records: &[UploadRecord]) {
    if records.is_empty() {
        println!("{}", "Nothing staged".dimmed());
        return;
    }
    for record in records {
        println!(
            "[{}] {} ({}) {}",
            short_id(&record.id).bold(),
            record.file.name,
            ui::format_upload_size(record.file.size),
            status_label(record.status)
        );
        if let Some(error) = &record.error {
            println!("    {}", error.red());
        }
    }
}

/// Transfer everything pending, drawing a live progress bar per file
pub async fn start(queue: &mut UploadQueue, transport: &dyn UploadTransport) {
    if !queue.has_pending() {
        ui::notify_info("Nothing to upload", "stage files first with 'upload <path>'");
        return;
    }

    let summary = queue
        .start(transport, |record| {
            if record.is_uploading() {
                print!(
                    "\r⬆️  {} [{}] {:>3}%",
                    record.file.name,
                    ui::progress_bar(record.progress, 20),
                    record.progress
                );
                let _ = io::stdout().flush();
            } else {
                println!();
                match record.status {
                    UploadStatus::Success => {
                        println!("{} {}", "✅".green(), record.file.name);
                    }
                    UploadStatus::Error => {
                        let reason = record.error.as_deref().unwrap_or("upload failed");
                        println!("{} {} {}", "❌".red(), record.file.name, reason.red());
                    }
                    _ => {}
                }
            }
        })
        .await;

    if summary.failed == 0 {
        ui::notify_success(
            "Upload complete",
            &format!("{} file(s) processed and indexed", summary.processed),
        );
    } else {
        ui::notify_error(
            "Upload finished with failures",
            &format!(
                "{} succeeded, {} failed of {} processed",
                summary.succeeded, summary.failed, summary.processed
            ),
        );
    }
}

/// Unstage one record, matched by unique id prefix
pub fn remove(queue: &mut UploadQueue, id: &str) {
    let matches: Vec<String> = queue
        .records()
        .iter()
        .filter(|r| r.id.starts_with(id))
        .map(|r| r.id.clone())
        .collect();

    match matches.as_slice() {
        [] => ui::notify_error("No staged file with that id", ""),
        [full_id] => {
            if queue.remove(full_id) {
                ui::notify_success("Removed from queue", "");
            } else {
                ui::notify_error("Cannot remove a file mid-transfer", "");
            }
        }
        _ => ui::notify_error("Ambiguous id prefix", "give a few more characters"),
    }
}

pub fn clear(queue: &mut UploadQueue) {
    if queue.clear() {
        ui::notify_success("Upload queue cleared", "");
    } else {
        ui::notify_error("Cannot clear while a transfer is running", "");
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn status_label(status: UploadStatus) -> ColoredString {
    match status {
        UploadStatus::Pending => "pending".dimmed(),
        UploadStatus::Uploading => "uploading".yellow(),
        UploadStatus::Success => "success".green(),
        UploadStatus::Error => "error".red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_uuids() {
        assert_eq!(short_id("deadbeef-1234-5678"), "deadbeef");
        assert_eq!(short_id("ab"), "ab");
    }

    #[tokio::test]
    async fn staging_a_real_file_enqueues_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"hello").unwrap();

        let mut queue = UploadQueue::new();
        stage(&mut queue, &[path.to_string_lossy().to_string()]);

        assert_eq!(queue.len(), 1);
        assert!(queue.has_pending());
        assert_eq!(queue.records()[0].file.name, "notes.md");
    }

    #[tokio::test]
    async fn staging_a_missing_path_enqueues_nothing() {
        let mut queue = UploadQueue::new();
        stage(&mut queue, &["/no/such/file.pdf".to_string()]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn staging_an_unsupported_file_lands_in_error_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::File::create(&path).unwrap();

        let mut queue = UploadQueue::new();
        stage(&mut queue, &[path.to_string_lossy().to_string()]);

        assert_eq!(queue.len(), 1);
        assert!(!queue.has_pending());
        assert_eq!(queue.records()[0].status, UploadStatus::Error);
    }
}
