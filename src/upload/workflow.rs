//! The upload screen as an explicit state machine.
//!
//! State only changes through [`UploadWorkflow::select`],
//! [`UploadWorkflow::begin_upload`] and [`UploadWorkflow::settle`];
//! [`UploadWorkflow::upload`] strings them together around one request.

use crate::upload::selection::{CandidateFile, SelectedFile, validate_candidate};
use crate::upload::sink::DownloadSink;
use crate::upload::transport::UploadClient;
use crate::upload::types::{Failure, Phase, UploadOutcome};
use crate::utils::constants::{MSG_INVALID_FILE_TYPE, MSG_UPLOAD_SUCCEEDED};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{}", MSG_INVALID_FILE_TYPE)]
    InvalidType,
    #[error("an upload is already in progress")]
    UploadInFlight,
}

/// Shared view of the in-progress flag, for gating an upload control.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, value: bool) {
        self.0.store(value, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct UploadWorkflow {
    selected: Option<SelectedFile>,
    outcome: UploadOutcome,
    in_flight: InFlight,
}

impl UploadWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn outcome(&self) -> &UploadOutcome {
        &self.outcome
    }

    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_set()
    }

    pub fn phase(&self) -> Phase {
        match (&self.outcome, &self.selected) {
            (UploadOutcome::InProgress, _) => Phase::Uploading,
            (UploadOutcome::Succeeded { .. }, _) => Phase::Succeeded,
            (UploadOutcome::Failed(_), _) => Phase::Failed,
            (UploadOutcome::NotAttempted, Some(_)) => Phase::Selecting,
            (UploadOutcome::NotAttempted, None) => Phase::Idle,
        }
    }

    /// Stages a candidate for upload. Clears any earlier outcome; a rejected
    /// candidate also clears the staged file.
    pub fn select(
        &mut self,
        candidate: Option<&CandidateFile>,
    ) -> Result<&SelectedFile, SelectionError> {
        if self.is_uploading() {
            tracing::warn!("ignoring file selection while an upload is in flight");
            return Err(SelectionError::UploadInFlight);
        }

        self.outcome = UploadOutcome::NotAttempted;
        match validate_candidate(candidate) {
            Some(file) => {
                tracing::debug!("selected {} ({})", file.name, file.media_type);
                Ok(&*self.selected.insert(file))
            }
            None => {
                self.selected = None;
                self.outcome = UploadOutcome::Failed(Failure::invalid_type());
                Err(SelectionError::InvalidType)
            }
        }
    }

    /// Moves to the uploading state and hands back the file to send.
    /// Returns `None` when there is nothing to send or a send is already running.
    pub fn begin_upload(&mut self) -> Option<SelectedFile> {
        if self.is_uploading() {
            return None;
        }
        let Some(file) = self.selected.clone() else {
            self.outcome = UploadOutcome::Failed(Failure::no_file_selected());
            return None;
        };
        self.in_flight.set(true);
        self.outcome = UploadOutcome::InProgress;
        Some(file)
    }

    pub fn settle(&mut self, result: Result<PathBuf, Failure>) {
        self.outcome = match result {
            Ok(saved_to) => {
                self.selected = None;
                UploadOutcome::Succeeded {
                    message: MSG_UPLOAD_SUCCEEDED.to_string(),
                    saved_to,
                }
            }
            Err(failure) => UploadOutcome::Failed(failure),
        };
        self.in_flight.set(false);
    }

    /// Sends the staged file and delivers the result to `sink`.
    pub async fn upload(
        &mut self,
        client: &UploadClient,
        sink: &dyn DownloadSink,
    ) -> &UploadOutcome {
        let Some(file) = self.begin_upload() else {
            return &self.outcome;
        };

        let guard = SettleGuard::new(self);
        let result = match client.send(&file).await {
            Ok(processed) => sink.deliver(&processed).map_err(|e| {
                tracing::error!("could not save {}: {:#}", processed.file_name, e);
                Failure::generic()
            }),
            Err(failure) => Err(failure),
        };
        guard.finish(result);

        &self.outcome
    }
}

// Settles the workflow even if the upload future is dropped or unwinds.
struct SettleGuard<'a> {
    workflow: &'a mut UploadWorkflow,
    settled: bool,
}

impl<'a> SettleGuard<'a> {
    fn new(workflow: &'a mut UploadWorkflow) -> Self {
        Self {
            workflow,
            settled: false,
        }
    }

    fn finish(mut self, result: Result<PathBuf, Failure>) {
        self.workflow.settle(result);
        self.settled = true;
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.workflow.settle(Err(Failure::generic()));
        }
    }
}
