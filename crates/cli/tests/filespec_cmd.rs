//! CLI tests for `dms filespec` and `dms inpfil`.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::cargo;

fn dms_cmd() -> Command {
    Command::new(cargo::cargo_bin!("dms"))
}

const ASSAYS: &str = "GRADE,NAME\n1.2,A\n3.4,BB\n";

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

#[test]
fn filespec_json_lists_records() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "assays.csv", ASSAYS);

    let output = dms_cmd()
        .args(["filespec", &csv, "--output", "json"])
        .output()
        .expect("run filespec");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    let records = json.as_array().expect("array of records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Field Name"], "GRADE");
    assert_eq!(records[0]["Field Type"], "N");
    assert_eq!(records[0]["Length"], "");
    assert_eq!(records[1]["Field Name"], "NAME");
    assert_eq!(records[1]["Field Type"], "A");
    assert_eq!(records[1]["Length"], "4");
    assert_eq!(records[1]["Keep"], "Y");
}

#[test]
fn filespec_pretty_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "assays.csv", ASSAYS);

    let output = dms_cmd()
        .args(["filespec", &csv, "--output", "pretty"])
        .output()
        .expect("run filespec");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Field Name"), "{stdout}");
    assert!(lines[2].starts_with("NAME"), "{stdout}");
}

#[test]
fn filespec_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.csv");

    let output = dms_cmd()
        .args(["filespec", &missing.to_string_lossy()])
        .output()
        .expect("run filespec");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.csv"), "stderr: {stderr}");
}

#[test]
fn inpfil_infers_specification() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "assays.csv", ASSAYS);

    let output = dms_cmd()
        .args(["inpfil", &csv, "--out", "ASSAYS", "--output", "pretty"])
        .output()
        .expect("run inpfil");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let expected = format!(
        "INPFIL &OUT=ASSAYS 'csvfile' 'GRADE' 'N' '' 'Y' '' 'NAME' 'A' '4' 'Y' '' '!' 'Y' '{csv}'"
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
}

#[test]
fn inpfil_uses_json_definition_and_profile_description() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "assays.csv", ASSAYS);
    let spec = write(
        dir.path(),
        "spec.json",
        r#"[
            { "Field Name": "GRADE", "Field Type": "N", "Length": null, "Keep": "Y", "Default": -1 },
            { "Field Name": "NAME", "Field Type": "A", "Length": 8, "Keep": "N", "Default": "" }
        ]"#,
    );
    let profile = write(dir.path(), "profile.json", r#"{ "import_description": "assays" }"#);

    let output = dms_cmd()
        .args([
            "--profile", &profile, "inpfil", &csv, "--out", "ASSAYS", "--spec", &spec,
            "--output", "json",
        ])
        .output()
        .expect("run inpfil");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    let expected = format!(
        "INPFIL &OUT=ASSAYS 'assays' 'GRADE' 'N' '' 'Y' '-1' 'NAME' 'A' '8' 'N' '' '!' 'Y' '{csv}'"
    );
    assert_eq!(json["command"], expected);
}

#[test]
fn inpfil_rejects_bad_definition() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write(dir.path(), "assays.csv", ASSAYS);
    let spec = write(
        dir.path(),
        "spec.csv",
        "Field Name,Field Type,Length,Keep,Default\nGRADE,X,,Y,\n",
    );

    let output = dms_cmd()
        .args(["inpfil", &csv, "--out", "ASSAYS", "--spec", &spec])
        .output()
        .expect("run inpfil");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GRADE"), "stderr: {stderr}");
}
