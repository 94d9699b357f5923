//! Export pipeline tests against real assets, fonts and the file system.

use christmas_card::constants::EXPORT_SCALE;
use christmas_card::export::{
    export_now, CardCapture, DirectoryDownloads, ExportFailure, ExportJob, RasterCapture,
};
use christmas_card::models::{CompositionState, TEMPLATES, TEXT_COLORS};
use christmas_card::render::AssetStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod fixtures;
use fixtures::*;

fn card(message: &str) -> CompositionState {
    let mut state = CompositionState::new();
    state.set_message(message);
    state
}

#[test]
fn test_capture_without_message_keeps_background() {
    let assets = temp_assets();
    let capture = RasterCapture::new(AssetStore::new(assets.path()), None);

    let mut state = CompositionState::new();
    state.set_template(&TEMPLATES[2]);
    let bitmap = capture.capture(&state, EXPORT_SCALE).unwrap();

    assert_eq!(bitmap.dimensions(), (ASSET_SIZE.0 * 3, ASSET_SIZE.1 * 3));
    // Center pixel is the template's solid color
    let center = bitmap.get_pixel(bitmap.width() / 2, bitmap.height() / 2);
    assert_eq!(center.0, [120, 60, 40, 255]);
    // Rounded corner is transparent
    assert_eq!(bitmap.get_pixel(0, 0).0[3], 0);
}

#[test]
fn test_capture_draws_message_in_text_color() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let capture = RasterCapture::new(AssetStore::new(assets.path()), Some(font));

    let mut state = card("MERRY");
    state.set_font_size(28);
    state.set_text_color(&TEXT_COLORS[0]);
    let bitmap = capture.capture(&state, EXPORT_SCALE).unwrap();

    let white = bitmap.pixels().filter(|p| p.0 == [255, 255, 255, 255]).count();
    assert!(white > 0, "message pixels should be drawn in white");
}

#[test]
fn test_export_now_saves_into_directory() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let capture = RasterCapture::new(AssetStore::new(assets.path()), Some(font));
    let sink = DirectoryDownloads::new(out.path().join("Downloads"));

    let mut state = card("Happy Holidays");
    let path = export_now(&mut state, &capture, &sink).unwrap().unwrap();

    assert!(!state.export_in_progress());
    assert!(path.starts_with(out.path().join("Downloads")));
    assert_eq!(exported_cards(&out.path().join("Downloads")), vec![path]);
}

#[test]
fn test_export_now_rejects_empty_message() {
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let capture = RasterCapture::new(AssetStore::new(assets.path()), None);
    let sink = DirectoryDownloads::new(out.path());

    let mut state = CompositionState::new();
    assert!(export_now(&mut state, &capture, &sink).unwrap().is_none());
    assert!(exported_cards(out.path()).is_empty());
}

#[test]
fn test_export_now_missing_font_is_capture_failure() {
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let capture = RasterCapture::new(
        AssetStore::new(assets.path()),
        Some(PathBuf::from("/no/such/font.ttf")),
    );
    let sink = DirectoryDownloads::new(out.path());

    let mut state = card("Hello");
    let err = export_now(&mut state, &capture, &sink).unwrap_err();

    assert!(matches!(err, ExportFailure::Capture(_)));
    assert!(!state.export_in_progress());
    assert!(state.can_export());
    assert!(exported_cards(out.path()).is_empty());
}

#[test]
fn test_background_job_with_unwritable_output() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    // A file where the download directory should be
    let blocked = out.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();

    let capture = RasterCapture::new(AssetStore::new(assets.path()), Some(font));
    let mut job = ExportJob::new(
        Arc::new(capture),
        Arc::new(DirectoryDownloads::new(&blocked)),
    );
    let mut state = card("Hello");

    assert!(job.start(&mut state));
    assert!(state.export_in_progress());

    let deadline = Instant::now() + Duration::from_secs(30);
    let outcome = loop {
        if let Some(outcome) = job.poll(&mut state) {
            break outcome;
        }
        assert!(Instant::now() < deadline, "export did not finish");
        std::thread::sleep(Duration::from_millis(10));
    };

    match outcome {
        Err(ExportFailure::Save { file_name, .. }) => {
            assert!(file_name.starts_with("christmas-card-"));
            assert!(file_name.ends_with(".png"));
        }
        other => panic!("expected a save failure, got {other:?}"),
    }
    assert!(!state.export_in_progress());
}
