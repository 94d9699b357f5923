//! PNG data URIs, export file names, and download delivery.

use anyhow::{Context, Result};
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::EXPORT_FILE_PREFIX;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// File name for an export started at `epoch_ms` (Unix epoch milliseconds).
#[must_use]
pub fn export_file_name(epoch_ms: i64) -> String {
    format!("{EXPORT_FILE_PREFIX}{epoch_ms}.png")
}

/// Encodes a bitmap as a `data:image/png;base64,...` URI.
pub fn encode_png_data_uri(bitmap: &RgbaImage) -> Result<String, image::ImageError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        bitmap.as_raw(),
        bitmap.width(),
        bitmap.height(),
        ColorType::Rgba8,
    )?;
    Ok(format!(
        "{PNG_DATA_URI_PREFIX}{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

/// Decodes the payload of a PNG data URI.
pub fn decode_png_data_uri(data_uri: &str) -> Result<Vec<u8>> {
    let payload = data_uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .context("Not a base64 PNG data URI")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .context("Invalid base64 in data URI")
}

/// Receives finished downloads.
pub trait DownloadSink: Send + Sync {
    /// Delivers `data_uri` under `file_name`, returning where it ended up.
    fn deliver(&self, file_name: &str, data_uri: &str) -> Result<PathBuf>;
}

/// Saves downloads into a directory, like a browser's download folder.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    /// Creates a sink writing into `dir` (created on first delivery).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloads {
    fn deliver(&self, file_name: &str, data_uri: &str) -> Result<PathBuf> {
        let bytes = decode_png_data_uri(data_uri)?;

        fs::create_dir_all(&self.dir).context(format!(
            "Failed to create download directory: {}",
            self.dir.display()
        ))?;

        let target = self.dir.join(file_name);
        let temp_path = target.with_extension("png.part");

        fs::write(&temp_path, &bytes).context(format!(
            "Failed to write download: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &target).context(format!(
            "Failed to move download into place: {}",
            target.display()
        ))?;

        debug!(path = %target.display(), bytes = bytes.len(), "Download saved");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(1_734_567_890_123),
            "christmas-card-1734567890123.png"
        );
    }

    #[test]
    fn test_data_uri_is_png() {
        let bitmap = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let uri = encode_png_data_uri(&bitmap).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let bytes = decode_png_data_uri(&uri).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        // Alpha survives the trip: transparent backdrop stays transparent
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(2, 1).0, [1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_rejects_other_uris() {
        assert!(decode_png_data_uri("data:text/plain;base64,aGk=").is_err());
        assert!(decode_png_data_uri("data:image/png;base64,***").is_err());
    }

    #[test]
    fn test_directory_downloads_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Downloads");
        let sink = DirectoryDownloads::new(&dir);

        let uri = encode_png_data_uri(&RgbaImage::new(1, 1)).unwrap();
        let path = sink.deliver("christmas-card-1.png", &uri).unwrap();

        assert_eq!(path, dir.join("christmas-card-1.png"));
        assert!(path.exists());
        assert!(!dir.join("christmas-card-1.png.part").exists());
    }
}
