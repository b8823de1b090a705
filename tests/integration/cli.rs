use crate::common::{make_temp_dir, normalized_lines, run, write_demos, write_valid_config};

fn line_starting<'a>(lines: &'a [String], prefix: &str) -> &'a str {
    lines
        .iter()
        .find(|l| l.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starting with {prefix:?} in {lines:?}"))
}

#[test]
fn agenda_lists_demos_in_start_order_with_state() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(&dir, &["agenda", "demos.json", "--now", "2099-01-07T09:50:00Z"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "AGENDA AT 2099-01-07 09:50"));
    let first = lines.iter().position(|l| l.starts_with("d1 ")).unwrap();
    let second = lines.iter().position(|l| l.starts_with("d2 ")).unwrap();
    assert!(first < second);

    let d1 = line_starting(&lines, "d1 ");
    assert!(d1.contains("imminent"), "{d1}");
    assert!(d1.ends_with("yes"), "{d1}");
    let d2 = line_starting(&lines, "d2 ");
    assert!(d2.contains("confirmed"), "{d2}");
    assert!(d2.ends_with("no"), "{d2}");
}

#[test]
fn agenda_marks_missed_start_as_overdue() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(&dir, &["agenda", "demos.json", "--now", "2099-01-07T10:45:00Z"]);
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    let d1 = line_starting(&lines, "d1 ");
    assert!(d1.contains("overdue"), "{d1}");
    assert!(d1.ends_with("no"), "{d1}");
}

#[test]
fn week_shows_every_day_from_monday() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(
        &dir,
        &["week", "demos.json", "--date", "2099-01-07", "--now", "2099-01-01T08:00:00Z"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "WEEK OF 2099-01-05"));
    assert!(lines.iter().any(|l| l == "MON 2099-01-05"));
    assert!(lines.iter().any(|l| l == "SUN 2099-01-11"));
    assert!(line_starting(&lines, "d1 ").contains("10:00-10:30"));
    assert!(line_starting(&lines, "d2 ").contains("11:00-11:30"));
}

#[test]
fn conflicts_report_overlap_and_suggest_free_slot() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(&dir, &["conflicts", "demos.json", "2099-01-07T10:10:00Z", "30"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = normalized_lines(&output.stdout);
    let d1 = line_starting(&lines, "d1 ");
    assert!(d1.ends_with("20 min"), "{d1}");
    assert!(!lines.iter().any(|l| l.starts_with("d2 ")));
    assert!(lines.iter().any(|l| l == "Next slot: 2099-01-07 10:40"));
    assert!(lines.iter().any(|l| l == "First free slot: 2099-01-07 11:40"));
}

#[test]
fn conflicts_skip_the_excluded_demo() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(
        &dir,
        &["conflicts", "demos.json", "2099-01-07 10:00", "30", "--exclude", "d1"],
    );
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "No conflicts."));
    assert!(!lines.iter().any(|l| l.starts_with("Next slot")));
}

#[test]
fn back_to_back_demos_do_not_conflict() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    write_demos(&dir);

    let output = run(&dir, &["conflicts", "demos.json", "2099-01-07T10:30:00Z", "30"]);
    assert!(output.status.success());
    assert!(normalized_lines(&output.stdout).iter().any(|l| l == "No conflicts."));
}

#[test]
fn slot_snaps_pixel_offset_to_grid() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);

    let output = run(&dir, &["slot", "75", "--date", "2099-01-07"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let lines = normalized_lines(&output.stdout);
    assert_eq!(lines, vec!["y=75 -> 07:15 (2099-01-07T07:15:00+00:00)"]);

    let output = run(&dir, &["slot", "0"]);
    assert_eq!(normalized_lines(&output.stdout), vec!["y=0 -> 06:00"]);
}

#[test]
fn unknown_command_fails() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);

    let output = run(&dir, &["launch"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command: launch"), "{stderr}");
}

#[test]
fn stray_flag_is_rejected() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);

    let output = run(&dir, &["slot", "60", "--now", "2099-01-07T09:00:00Z"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'slot' does not take --now."), "{stderr}");
}

#[test]
fn missing_demo_file_is_reported() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);

    let output = run(&dir, &["agenda", "nowhere.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load demos from nowhere.json"), "{stderr}");
}
