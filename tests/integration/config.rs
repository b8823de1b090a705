use democal::config::Config;
use std::fs;

use crate::common::{make_temp_dir, normalized_lines, run, write_valid_config};

#[test]
fn config_command_prints_every_key() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run(&dir, &["config"]);
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "CONFIG"));
    for key in ["DISPLAY_HOURS", "SNAP_MINUTES", "CONFLICT_DEBOUNCE_MS", "FILE_LOGGING_ENABLED"] {
        assert!(lines.iter().any(|l| l.starts_with(key)), "missing {key}");
    }
}

#[test]
fn config_set_persists_to_disk() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run(&dir, &["config", "SNAP_MINUTES", "30"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(normalized_lines(&output.stdout), vec!["SNAP_MINUTES: 15 -> 30"]);

    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.snap_minutes(), 30);
}

#[test]
fn invalid_config_value_leaves_file_untouched() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);
    let before = fs::read_to_string(dir.join("config.json")).unwrap();

    let output = run(&dir, &["config", "SNAP_MINUTES", "7"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not set SNAP_MINUTES"), "{stderr}");
    assert_eq!(fs::read_to_string(dir.join("config.json")).unwrap(), before);
}

#[test]
fn main_fails_when_config_missing() {
    let dir = make_temp_dir("config");

    let output = run(&dir, &["config"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn main_fails_when_config_is_malformed() {
    let dir = make_temp_dir("config");
    fs::write(dir.join("config.json"), "{ not json").unwrap();

    let output = run(&dir, &["config"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON"), "{stderr}");
}

#[test]
fn alternate_config_path_is_honoured() {
    let dir = make_temp_dir("config");
    let custom = dir.join("custom");
    fs::create_dir_all(&custom).unwrap();
    write_valid_config(&custom);

    let output = run(&dir, &["config", "--config", "custom/config.json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}
