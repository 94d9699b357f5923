//! Card export: capture the composition, encode it, and save the download.
//!
//! `capture` produces the bitmap, `download` turns it into a PNG data URI and
//! delivers it under a timestamped file name, and `job` ties the steps together
//! behind the export-in-progress guard.

pub mod capture;
pub mod download;
pub mod job;

use thiserror::Error;

pub use capture::{CardCapture, RasterCapture};
pub use download::{export_file_name, DirectoryDownloads, DownloadSink};
pub use job::{export_now, run_export, ExportJob, ExportOutcome, ExportStatus};

/// The ways an export can fail. None of them are fatal to the application.
#[derive(Debug, Error)]
pub enum ExportFailure {
    /// Rendering the card into a bitmap failed (missing asset, no font, ...)
    #[error("could not capture the card: {0}")]
    Capture(String),
    /// PNG encoding failed
    #[error("could not encode the card as PNG: {0}")]
    Encode(#[from] image::ImageError),
    /// Delivering the download failed
    #[error("could not save {file_name}: {reason}")]
    Save {
        /// File name the download was meant to have
        file_name: String,
        /// Underlying error
        reason: String,
    },
}
