//! The export action: capture, encode, and deliver the card.
//!
//! Interactive exports run on a background thread and report back through a
//! message channel; the UI polls for the result each frame. The composition's
//! export-in-progress flag is set when a job starts and cleared when it
//! reports, or when the worker goes away without reporting.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

use crate::constants::EXPORT_SCALE;
use crate::models::CompositionState;

use super::capture::CardCapture;
use super::download::{encode_png_data_uri, export_file_name, DownloadSink};
use super::ExportFailure;

/// Result of a finished export: where the card was saved.
pub type ExportOutcome = Result<PathBuf, ExportFailure>;

/// Export status tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export has run yet
    Idle,
    /// Capturing and saving
    Exporting,
    /// Last export succeeded
    Saved(PathBuf),
    /// Last export failed
    Failed,
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Exporting => write!(f, "Downloading..."),
            Self::Saved(path) => write!(f, "✓ Saved {}", path.display()),
            Self::Failed => write!(f, "✗ Failed"),
        }
    }
}

/// Message sent from the export worker to the UI thread.
#[derive(Debug)]
pub enum ExportMessage {
    /// Export finished (success or failure)
    Complete(ExportOutcome),
}

/// Runs one export to completion on the current thread.
///
/// Does not touch the export-in-progress flag; callers own it.
pub fn run_export(
    state: &CompositionState,
    capture: &dyn CardCapture,
    sink: &dyn DownloadSink,
    epoch_ms: i64,
) -> ExportOutcome {
    let result = capture_and_deliver(state, capture, sink, epoch_ms);

    match &result {
        Ok(path) => info!(path = %path.display(), "Card exported"),
        Err(e) => error!(error = %e, "Download failed"),
    }
    result
}

fn capture_and_deliver(
    state: &CompositionState,
    capture: &dyn CardCapture,
    sink: &dyn DownloadSink,
    epoch_ms: i64,
) -> ExportOutcome {
    let bitmap = capture
        .capture(state, EXPORT_SCALE)
        .map_err(|e| ExportFailure::Capture(format!("{e:#}")))?;
    let data_uri = encode_png_data_uri(&bitmap)?;
    let file_name = export_file_name(epoch_ms);
    sink.deliver(&file_name, &data_uri)
        .map_err(|e| ExportFailure::Save {
            file_name,
            reason: format!("{e:#}"),
        })
}

/// Runs a guarded export synchronously.
///
/// Returns `Ok(None)` when the guard rejects the export (empty message or an
/// export already running). The flag is always cleared before returning.
pub fn export_now(
    state: &mut CompositionState,
    capture: &dyn CardCapture,
    sink: &dyn DownloadSink,
) -> Result<Option<PathBuf>, ExportFailure> {
    if !state.can_export() {
        return Ok(None);
    }
    state.set_export_in_progress(true);
    let result = run_export(state, capture, sink, now_epoch_ms());
    state.set_export_in_progress(false);
    result.map(Some)
}

/// Current Unix time in milliseconds.
#[must_use]
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Export job state for tracking a background export.
pub struct ExportJob {
    /// Current status
    pub status: ExportStatus,
    /// Message channel receiver (present while a job runs)
    receiver: Option<Receiver<ExportMessage>>,
    capture: Arc<dyn CardCapture>,
    sink: Arc<dyn DownloadSink>,
}

impl std::fmt::Debug for ExportJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportJob")
            .field("status", &self.status)
            .field("running", &self.receiver.is_some())
            .finish_non_exhaustive()
    }
}

impl ExportJob {
    /// Creates an idle job that captures with `capture` and delivers to `sink`.
    #[must_use]
    pub fn new(capture: Arc<dyn CardCapture>, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            status: ExportStatus::Idle,
            receiver: None,
            capture,
            sink,
        }
    }

    /// Checks if an export is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    /// Starts an export of `state` in the background.
    ///
    /// Returns false without doing anything when the message is empty or an
    /// export is already in progress.
    pub fn start(&mut self, state: &mut CompositionState) -> bool {
        if !state.can_export() || self.is_running() {
            return false;
        }

        state.set_export_in_progress(true);
        self.status = ExportStatus::Exporting;

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        let snapshot = state.clone();
        let capture = Arc::clone(&self.capture);
        let sink = Arc::clone(&self.sink);
        let epoch_ms = now_epoch_ms();
        info!(template = snapshot.template().id, "Starting export");

        thread::spawn(move || {
            let outcome = run_export(&snapshot, capture.as_ref(), sink.as_ref(), epoch_ms);
            let _ = sender.send(ExportMessage::Complete(outcome));
        });

        true
    }

    /// Polls the worker for its result.
    ///
    /// Returns the outcome once, when the export finishes. The export flag on
    /// `state` is cleared at that point whatever the outcome.
    pub fn poll(&mut self, state: &mut CompositionState) -> Option<ExportOutcome> {
        let receiver = self.receiver.as_ref()?;

        let outcome = match receiver.try_recv() {
            Ok(ExportMessage::Complete(outcome)) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                error!("Export worker stopped without reporting");
                Err(ExportFailure::Capture(
                    "export worker stopped without reporting".to_string(),
                ))
            }
        };

        self.receiver = None;
        state.set_export_in_progress(false);
        self.status = match &outcome {
            Ok(path) => ExportStatus::Saved(path.clone()),
            Err(_) => ExportStatus::Failed,
        };
        Some(outcome)
    }
}
