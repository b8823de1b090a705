use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_democal"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "democal-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_valid_config(dir: &Path) {
    let cfg = r#"{
      "display_hours": { "value": "6:00AM-10:00PM", "description": "Grid hours" },
      "pixels_per_hour": { "value": 60.0, "description": "Row height" },
      "snap_minutes": { "value": 15, "description": "Snap" },
      "suggest_increment_minutes": { "value": 30, "description": "Suggest step" },
      "conflict_debounce_ms": { "value": 500, "description": "Debounce" },
      "default_duration_minutes": { "value": 30, "description": "Duration" },
      "file_logging_enabled": { "value": "True", "description": "file logging" }
    }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn demo_json(id: &str, lead_name: &str, scheduled_at: &str, status: &str) -> String {
    format!(
        r#"{{"id":"{id}","leadId":"lead-{id}","leadName":"{lead_name}","scheduledAt":"{scheduled_at}","durationMinutes":30,"status":"{status}","demoType":"online"}}"#
    )
}

/// Two demos on Wednesday 2099-01-07, written as a bare array.
pub fn write_demos(dir: &Path) -> PathBuf {
    let path = dir.join("demos.json");
    let body = format!(
        "[{},{}]",
        demo_json("d2", "Bo", "2099-01-07T11:00:00Z", "confirmed"),
        demo_json("d1", "Ana", "2099-01-07T10:00:00Z", "scheduled"),
    );
    fs::write(&path, body).unwrap();
    path
}

pub fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if matches!(chars.peek(), Some('[')) {
                let _ = chars.next();
                for nc in chars.by_ref() {
                    if nc.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }
    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| strip_ansi_and_control(l).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
