// src/core/export.rs
//! CSV and task-list exports, with post-export feedback reconciliation

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::conversation::ConversationLog;
use crate::core::feedback::{FeedbackEntry, FeedbackStore};
use crate::core::service_client::BackendApi;
use crate::types::ChatMessage;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Ignored,
    Completed,
    Failed,
}

/// Assembles the same conversation + effective-feedback context the
/// search requests carry, hands it to the export collaborator, and on
/// success moves pending feedback into applied. Each export kind keeps
/// its own in-flight flag; a failed export leaves every store intact
/// for retry.
pub struct ExportCoordinator<B> {
    backend: B,
    output_dir: PathBuf,
    exporting_csv: bool,
    exporting_list: bool,
    last_error: Option<String>,
    last_success: Option<String>,
}

impl<B: BackendApi> ExportCoordinator<B> {
    pub fn new(backend: B, output_dir: PathBuf) -> Self {
        Self {
            backend,
            output_dir,
            exporting_csv: false,
            exporting_list: false,
            last_error: None,
            last_success: None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_success(&self) -> Option<&str> {
        self.last_success.as_deref()
    }

    /// Request the CSV rendition of the current result set and save it
    /// under the output directory with a date-stamped name. Pending
    /// feedback is committed only once the file is on disk.
    pub async fn export_csv(
        &mut self,
        log: &ConversationLog,
        feedback: &mut FeedbackStore,
        job_title: Option<&str>,
    ) -> ExportOutcome {
        if self.exporting_csv {
            warn!("CSV export rejected: one is already in flight");
            return ExportOutcome::Ignored;
        }
        self.exporting_csv = true;
        self.last_error = None;
        self.last_success = None;

        let history: Vec<ChatMessage> = log.history().collect();
        let effective: Vec<FeedbackEntry> = feedback.effective_feedback();

        let outcome = match self.backend.export_csv(&history, &effective).await {
            Ok(payload) => match self.save_csv(&payload, job_title).await {
                Ok(path) => {
                    let rows = count_csv_rows(&payload);
                    info!("Saved {} candidate rows to {}", rows, path.display());
                    self.last_success =
                        Some(format!("Saved {} candidate rows to {}", rows, path.display()));
                    feedback.commit_pending();
                    ExportOutcome::Completed
                }
                Err(err) => {
                    warn!("CSV save failed: {:#}", err);
                    self.last_error = Some(err.to_string());
                    ExportOutcome::Failed
                }
            },
            Err(err) => {
                warn!("CSV export failed: {:#}", err);
                self.last_error = Some(err.to_string());
                ExportOutcome::Failed
            }
        };

        self.exporting_csv = false;
        outcome
    }

    /// Push the entire matching set to the configured task list. The
    /// collaborator resolves the filter server-side, so nothing needs to
    /// be rendered locally first; only a list id and a job title are
    /// required.
    pub async fn export_to_list(
        &mut self,
        log: &ConversationLog,
        feedback: &mut FeedbackStore,
        list_id: Option<&str>,
        job_title: Option<&str>,
    ) -> ExportOutcome {
        let (Some(list_id), Some(job_title)) = (list_id, job_title) else {
            warn!("List export rejected: list id or job title missing");
            return ExportOutcome::Ignored;
        };
        if self.exporting_list {
            warn!("List export rejected: one is already in flight");
            return ExportOutcome::Ignored;
        }
        self.exporting_list = true;
        self.last_error = None;
        self.last_success = None;

        let history: Vec<ChatMessage> = log.history().collect();
        let effective: Vec<FeedbackEntry> = feedback.effective_feedback();

        let outcome = match self
            .backend
            .export_to_list(list_id, job_title, &history, &effective)
            .await
        {
            Ok(response) if response.success => {
                let mut message = format!("{} candidates exported!", response.candidates_count);
                if let Some(url) = &response.click_up_task_url {
                    message.push_str(&format!(" {}", url));
                }
                info!("List export done: {}", message);
                self.last_success = Some(message);
                feedback.commit_pending();
                ExportOutcome::Completed
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| "Export failed".to_string());
                warn!("List export rejected by collaborator: {}", message);
                self.last_error = Some(message);
                ExportOutcome::Failed
            }
            Err(err) => {
                warn!("List export failed: {:#}", err);
                self.last_error = Some(err.to_string());
                ExportOutcome::Failed
            }
        };

        self.exporting_list = false;
        outcome
    }

    async fn save_csv(&self, payload: &[u8], job_title: Option<&str>) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create directory: {}", self.output_dir.display())
            })?;

        let path = self.output_dir.join(utils::export_filename(job_title));
        tokio::fs::write(&path, payload)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(path)
    }
}

/// Data rows in the exported payload (header excluded). Only used for
/// the success message; a payload that is not valid CSV counts zero.
fn count_csv_rows(payload: &[u8]) -> usize {
    csv::Reader::from_reader(payload)
        .records()
        .filter(|r| r.is_ok())
        .count()
}
