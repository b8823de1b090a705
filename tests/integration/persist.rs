use std::fs;

use crate::common::{
    demo_json, make_temp_dir, normalized_lines, read_log_contents, run, write_demos,
    write_valid_config,
};

#[test]
fn paged_list_response_is_accepted() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    let body = format!(
        r#"{{"data":[{}],"total":1,"page":1,"limit":20}}"#,
        demo_json("p1", "Paged", "2099-01-07T15:00:00Z", "scheduled")
    );
    fs::write(dir.join("page.json"), body).unwrap();

    let output = run(&dir, &["agenda", "page.json", "--now", "2099-01-07T08:00:00Z"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l.starts_with("p1 ") && l.contains("Paged")));
}

#[test]
fn malformed_demo_file_fails() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    fs::write(dir.join("demos.json"), r#"{"data":"nope"}"#).unwrap();

    let output = run(&dir, &["agenda", "demos.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JSON error"), "{stderr}");
}

#[test]
fn loading_demos_is_logged_to_file() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(&dir, &["agenda", "demos.json", "--now", "2099-01-07T08:00:00Z"]);
    assert!(output.status.success());
    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Loaded 2 demo(s) from demos.json"), "{log}");
}
