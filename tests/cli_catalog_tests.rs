//! End-to-end tests for `christmas-card templates` and `christmas-card colors`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the christmas-card binary
fn card_bin() -> &'static str {
    env!("CARGO_BIN_EXE_christmas-card")
}

#[test]
fn test_templates_lists_catalog_in_order() {
    let assets = temp_assets();

    let output = Command::new(card_bin())
        .args(["templates", "--assets", assets.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);

    for (line, id) in lines.iter().zip(["snowman", "postbox", "rudolph", "gift", "tree"]) {
        assert!(line.contains(id), "{line} should mention {id}");
        assert!(!line.contains("(missing)"), "{line}");
    }
    assert!(lines[2].contains("3-test.PNG"));
}

#[test]
fn test_templates_marks_missing_images() {
    let empty = tempfile::TempDir::new().unwrap();

    let output = Command::new(card_bin())
        .args(["templates", "--assets", empty.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("(missing)").count(), 5);
}

#[test]
fn test_templates_uses_configured_assets() {
    let assets = temp_assets();
    let mut config = christmas_card::config::Config::default();
    config.paths.assets_dir = assets.path().to_path_buf();
    let (config_path, config_temp) = temp_config(&config);

    let output = Command::new(card_bin())
        .args(["templates", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("(missing)"));
}

#[test]
fn test_colors_lists_palette() {
    let output = Command::new(card_bin())
        .arg("colors")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = [
        ("White", "#FFFFFF"),
        ("Cream", "#F5F0E6"),
        ("Gold", "#D4A574"),
        ("Red", "#C41E3A"),
        ("Green", "#2D5A3F"),
        ("Navy", "#1A2744"),
    ];
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), expected.len());
    for (line, (name, hex)) in lines.iter().zip(expected) {
        assert!(line.starts_with(name), "{line}");
        assert!(line.ends_with(hex), "{line}");
    }
}
