//! End-to-end tests for `christmas-card render`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the christmas-card binary
fn card_bin() -> &'static str {
    env!("CARGO_BIN_EXE_christmas-card")
}

#[test]
fn test_render_writes_timestamped_png() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let (config_path, config_temp) = empty_config();

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            "Merry Christmas!",
            "--template",
            "gift",
            "--color",
            "Gold",
            "--font-size",
            "24",
            "--position",
            "30",
            "--assets",
            assets.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
            "--font",
            font.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Render should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let cards = exported_cards(out.path());
    assert_eq!(cards.len(), 1, "Expected exactly one exported card");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(cards[0].file_name().unwrap().to_str().unwrap()));
    assert!(stdout.contains("Share it with friends and family!"));

    // 3x oversampling of the template's natural size
    let card = image::open(&cards[0]).unwrap();
    assert_eq!(card.width(), ASSET_SIZE.0 * 3);
    assert_eq!(card.height(), ASSET_SIZE.1 * 3);
}

#[test]
fn test_render_empty_message_fails() {
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let (config_path, config_temp) = empty_config();

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            "",
            "--assets",
            assets.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Please enter a message"), "{stderr}");
    assert!(exported_cards(out.path()).is_empty());
}

#[test]
fn test_render_message_too_long_fails() {
    let (config_path, config_temp) = empty_config();
    let message = "x".repeat(51);

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            &message,
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("too long"));
}

#[test]
fn test_render_rejects_out_of_range_values() {
    for args in [
        ["--font-size", "13"],
        ["--font-size", "29"],
        ["--position", "5"],
        ["--position", "95"],
        ["--template", "reindeer"],
        ["--color", "purple"],
    ] {
        let output = Command::new(card_bin())
            .args(["render", "--message", "Hi"])
            .args(args)
            .output()
            .expect("Failed to execute command");

        // clap usage errors
        assert_eq!(output.status.code(), Some(2), "{args:?} should be rejected");
    }
}

#[test]
fn test_render_missing_asset_reports_download_failure() {
    let empty_assets = tempfile::TempDir::new().unwrap();
    let out = tempfile::TempDir::new().unwrap();
    let (config_path, config_temp) = empty_config();

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            "Hello",
            "--assets",
            empty_assets.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Download failed."), "{stderr}");
    assert!(stderr.contains("1-test.jpg"), "{stderr}");
    assert!(exported_cards(out.path()).is_empty());
}

#[test]
fn test_render_uses_configured_paths() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();

    let mut config = christmas_card::config::Config::default();
    config.paths.assets_dir = assets.path().to_path_buf();
    config.paths.output_dir = out.path().to_path_buf();
    config.paths.font = Some(font);
    let (config_path, config_temp) = temp_config(&config);

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            "To my family\nHappy Holidays",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(exported_cards(out.path()).len(), 1);
}

#[test]
fn test_render_font_flag_overrides_stale_config_font() {
    let Some(font) = system_font() else {
        eprintln!("Skipping test: no system font available");
        return;
    };
    let assets = temp_assets();
    let out = tempfile::TempDir::new().unwrap();
    let (config_path, config_temp) = empty_config();
    std::fs::write(&config_path, "[paths]\nfont = \"/gone/font.ttf\"\n").unwrap();

    let output = Command::new(card_bin())
        .args([
            "render",
            "--config",
            config_path.to_str().unwrap(),
            "--message",
            "Joy",
            "--assets",
            assets.path().to_str().unwrap(),
            "--output",
            out.path().to_str().unwrap(),
            "--font",
            font.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(exported_cards(out.path()).len(), 1);
}
