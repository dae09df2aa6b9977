//! Tests for the `timefill` commands
//!
//! A blank template is generated with `timefill template` and then filled.
//! Every failing fill must exit 1 and leave no output file behind.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};
use timefill_core::{CellValue, Sheet};
use timefill_xlsx::XlsxSheet;

fn timefill() -> Command {
    Command::new(env!("CARGO_BIN_EXE_timefill"))
}

/// Temp dir holding a blank 2025 template
fn template_dir() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template.xlsx");
    let output = timefill()
        .args(["template", "--year", "2025", "-o"])
        .arg(&template)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "template should be created");
    (dir, template)
}

fn fill(template: &Path, out: &Path, args: &[&str]) -> Output {
    timefill()
        .arg("fill")
        .arg(template)
        .args(["--name", "Mario", "--surname", "Rossi", "-o"])
        .arg(out)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn template_refuses_overwrite() {
    let (_dir, template) = template_dir();

    let output = timefill()
        .args(["template", "--year", "2025", "-o"])
        .arg(&template)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}

#[test]
fn fill_writes_output_workbook() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "40",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-28",
            "--absence",
            "2025-02-10/F",
            "--seed",
            "17",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Filled:"));
    assert!(stdout.contains("Absence:  10/2 F (L13)"));

    let sheet = XlsxSheet::load(&out).unwrap();
    assert_eq!(sheet.value("B4".parse().unwrap()), CellValue::Text("Mario Rossi".into()));
    assert_eq!(sheet.value("L85".parse().unwrap()), CellValue::Text("F".into()));

    // Template itself is untouched
    let blank = XlsxSheet::load(&template).unwrap();
    assert_eq!(blank.value("B4".parse().unwrap()), CellValue::Empty);
}

#[test]
fn fill_json_summary_totals_hours() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "25",
            "--max-per-day",
            "5",
            "--start",
            "2025-06-02",
            "--end",
            "2025-06-09",
            "--format",
            "json",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_hours"], 25);
    assert_eq!(json["days_in_range"], 5);
    let sum: u64 = json["hours"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["hours"].as_u64().unwrap())
        .sum();
    assert_eq!(sum, 25);
}

#[test]
fn fill_defaults_output_next_to_template() {
    let (dir, template) = template_dir();

    let output = timefill()
        .arg("fill")
        .arg(&template)
        .args([
            "--name",
            "Anna",
            "--surname",
            "Bianchi",
            "--total-hours",
            "4",
            "--max-per-day",
            "4",
            "--start",
            "2025-01-02",
            "--end",
            "2025-01-03",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir
        .path()
        .join("Foglio di presenza Anna_Bianchi R&S compilato.xlsx")
        .exists());
}

#[test]
fn too_many_hours_exits_1_without_output() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    // 3..7 February 2025 leaves 4 weekdays: at most 16 hours
    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "17",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-07",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("17 hours do not fit"), "stderr: {stderr}");
    assert!(stderr.contains("hint:"));
    assert!(!out.exists(), "no file may be written on failure");
}

#[test]
fn weekend_start_exits_1_without_output() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    // 1 February 2025 is a Saturday
    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "4",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-01",
            "--end",
            "2025-02-07",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1/2 is not a selectable day"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn weekend_absence_exits_1_without_output() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "4",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-07",
            "--absence",
            "2025-02-09/M",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Absence date 9/2"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn repeated_identical_absence_is_accepted_once() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "8",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-07",
            "--absence",
            "2025-02-04/F",
            "--absence",
            "2025-02-04/F",
            "--format",
            "json",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["absences"].as_array().unwrap().len(), 1);
    assert_eq!(json["days_in_range"], 3);
}

#[test]
fn same_day_with_two_codes_exits_1_without_output() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "4",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-07",
            "--absence",
            "2025-02-04/F",
            "--absence",
            "2025-02-04/M",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Absence date 4/2"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn bad_absence_code_is_rejected_by_argument_parsing() {
    let (dir, template) = template_dir();
    let out = dir.path().join("filled.xlsx");

    let output = fill(
        &template,
        &out,
        &[
            "--total-hours",
            "4",
            "--max-per-day",
            "4",
            "--start",
            "2025-02-03",
            "--end",
            "2025-02-07",
            "--absence",
            "2025-02-04/X",
        ],
    );

    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn days_lists_weekdays_as_json() {
    let (_dir, template) = template_dir();

    let output = timefill()
        .arg("days")
        .arg(&template)
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let days = json.as_array().unwrap();
    assert_eq!(days.len(), 261);
    // 1 January 2025 was a Wednesday
    assert_eq!(days[0]["date"], "1/1");
    assert_eq!(days[0]["cell"], "C9");
}

#[test]
fn layout_prints_default_toml() {
    let output = timefill().arg("layout").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("start_column = \"C\""));
    assert!(stdout.contains("mirror_row = 225"));
}

#[test]
fn invalid_layout_file_fails() {
    let dir = tempdir().unwrap();
    let layout = dir.path().join("layout.toml");
    std::fs::write(&layout, "start_column = \"AG\"\nend_column = \"C\"\n").unwrap();

    let output = timefill()
        .arg("layout")
        .arg("--layout")
        .arg(&layout)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot load layout"), "stderr: {stderr}");
}
