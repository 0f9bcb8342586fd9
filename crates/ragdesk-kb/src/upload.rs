//! Staged upload queue with sequential simulated transfer

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ragdesk_core::{PendingFile, TransportOutcome, UploadRecord, UploadStatus, UploadTransport};

/// Delay between progress steps during a transfer
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(200);

/// Counters for one queue run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Files that were pending when the run started
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Staging area for files headed to the knowledge base
///
/// Files are validated when staged: bad format or size lands a record in
/// the error state immediately, and only pending records are transferred.
/// Transfers run one file at a time, stepping progress from 0 to 100 in
/// increments of 10 before asking the transport for a verdict.
#[derive(Debug)]
pub struct UploadQueue {
    records: Vec<UploadRecord>,
    step_delay: Duration,
    version: u64,
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::with_step_delay(DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(step_delay: Duration) -> Self {
        Self {
            records: Vec::new(),
            step_delay,
            version: 0,
        }
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.records.iter().any(|r| r.is_pending())
    }

    pub fn is_uploading(&self) -> bool {
        self.records.iter().any(|r| r.is_uploading())
    }

    /// Stage files for upload, validating each one. Returns the number of
    /// records added; invalid files are added too, already in error state.
    pub fn add_files(&mut self, files: Vec<PendingFile>) -> usize {
        let added = files.len();
        for file in files {
            let record = UploadRecord::staged(file);
            if let Some(reason) = &record.error {
                tracing::debug!("Rejected {} at staging: {}", record.file.name, reason);
            }
            self.records.push(record);
        }
        if added > 0 {
            self.version += 1;
        }
        added
    }

    /// Remove one staged record. Records mid-transfer cannot be removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) if !self.records[index].is_uploading() => {
                self.records.remove(index);
                self.version += 1;
                true
            }
            _ => false,
        }
    }

    /// Drop every staged record. Refused while a transfer is running.
    pub fn clear(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        if !self.records.is_empty() {
            self.records.clear();
            self.version += 1;
        }
        true
    }

    /// Transfer every pending record, one at a time, in staging order.
    /// The observer sees the record after every state change, which is how
    /// a frontend renders live progress. Transport verdicts land on the
    /// records; a transport failure marks the record instead of aborting
    /// the rest of the run.
    pub async fn start<F>(&mut self, transport: &dyn UploadTransport, mut observer: F) -> UploadSummary
    where
        F: FnMut(&UploadRecord),
    {
        let pending: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.id.clone())
            .collect();

        let mut summary = UploadSummary {
            processed: pending.len(),
            ..Default::default()
        };

        for id in &pending {
            let Some(index) = self.records.iter().position(|r| &r.id == id) else {
                continue;
            };

            {
                let record = &mut self.records[index];
                record.status = UploadStatus::Uploading;
                record.progress = 0;
            }
            self.version += 1;
            observer(&self.records[index]);

            for percent in (0..=100u8).step_by(10) {
                tokio::time::sleep(self.step_delay).await;
                self.records[index].progress = percent;
                self.version += 1;
                observer(&self.records[index]);
            }

            let verdict = transport.send(&self.records[index]).await;
            let record = &mut self.records[index];
            match verdict {
                Ok(TransportOutcome::Accepted) => {
                    record.status = UploadStatus::Success;
                    record.error = None;
                    summary.succeeded += 1;
                }
                Ok(TransportOutcome::Rejected { reason }) => {
                    record.status = UploadStatus::Error;
                    record.error = Some(reason);
                    summary.failed += 1;
                }
                Err(e) => {
                    record.status = UploadStatus::Error;
                    record.error = Some(e.to_string());
                    summary.failed += 1;
                }
            }
            self.version += 1;
            observer(&self.records[index]);
        }

        tracing::info!(
            "Upload run finished: {} processed, {} succeeded, {} failed",
            summary.processed,
            summary.succeeded,
            summary.failed
        );
        summary
    }
}
