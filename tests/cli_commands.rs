//! Integration tests for the non-interactive commands.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_command(data: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    // Tests must not depend on the user's config or history.
    let config = data.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").expect("write empty config");
    }

    let mut child = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .arg("--config")
        .arg(&config)
        .arg("--data-dir")
        .arg(data.join("data"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    {
        let mut pipe = child.stdin.take().expect("stdin");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("write stdin");
        }
    }

    let output = child.wait_with_output().expect("wait for command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_calc_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_command(dir.path(), &["calc"], Some("1,1,2\n,,\n3,x,3\n"));
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "Row 1: [1, 1, 2] -> Mode: 1\nRow 3: [3, 3] -> Mode: 3"
    );
}

#[test]
fn test_calc_records_history() {
    let dir = tempfile::tempdir().unwrap();
    run_command(dir.path(), &["calc"], Some("1,2,2,3,3\n"));
    run_command(dir.path(), &["calc"], Some("4,4,5\n"));

    let (stdout, _, code) = run_command(dir.path(), &["history", "list"], None);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. Calculation 2"));
    assert!(lines[1].starts_with("2. Calculation 1"));

    let (stdout, _, _) = run_command(dir.path(), &["history", "show", "2"], None);
    assert!(stdout.contains("Row 1: [1, 2, 2, 3, 3] -> Mode: 2"));
}

#[test]
fn test_calc_no_save() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_command(dir.path(), &["calc", "--no-save"], Some("7\n"));
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Row 1: [7] -> Mode: 7");

    let (stdout, _, _) = run_command(dir.path(), &["history", "list"], None);
    assert_eq!(stdout.trim(), "No calculations yet.");
}

#[test]
fn test_calc_prints_results_when_history_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data"), "").unwrap();

    let (stdout, stderr, code) = run_command(dir.path(), &["calc"], Some("4,4,5\n"));
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Row 1: [4, 4, 5] -> Mode: 4");
    assert!(stderr.contains("Warning: Results not saved to history"));
}

#[test]
fn test_calc_export_quotes_header_labels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.csv");
    std::fs::write(&input, "\"a,b\",c\n1,1\n").unwrap();
    let out = dir.path().join("out");

    let (_, _, code) = run_command(
        dir.path(),
        &[
            "calc",
            input.to_str().unwrap(),
            "--headers",
            "--export",
            out.to_str().unwrap(),
        ],
        None,
    );
    assert_eq!(code, 0);
    let exported = std::fs::read_dir(&out).unwrap().next().unwrap().unwrap().path();
    assert_eq!(
        std::fs::read_to_string(exported).unwrap(),
        "\"a,b\",c,Mode\n1,1,1\n"
    );
}

#[test]
fn test_calc_without_numbers_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_command(dir.path(), &["calc"], Some("a,b\n,\n"));
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter some numbers first"));
}

#[test]
fn test_calc_export_with_headers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.csv");
    std::fs::write(&input, "Mon,Tue,Wed\n4,4,5\n").unwrap();
    let out = dir.path().join("out");

    let (stdout, _, code) = run_command(
        dir.path(),
        &[
            "calc",
            input.to_str().unwrap(),
            "--headers",
            "--export",
            out.to_str().unwrap(),
        ],
        None,
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Exported to"));

    let files: Vec<_> = std::fs::read_dir(&out).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("modematrix_") && name.ends_with(".csv"));
    assert_eq!(
        std::fs::read_to_string(&files[0]).unwrap(),
        "Mon,Tue,Wed,Mode\n4,4,5,4\n"
    );
}

#[test]
fn test_history_export_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    run_command(dir.path(), &["calc"], Some("1,2\n"));
    let out = dir.path().join("exports");

    let (stdout, _, code) = run_command(
        dir.path(),
        &["history", "export", "1", "--out", out.to_str().unwrap()],
        None,
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("modematrix_history_"));
    let files: Vec<_> = std::fs::read_dir(&out).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(
        std::fs::read_to_string(&files[0]).unwrap(),
        "Values,Mode\n\"[1, 2]\",1\n"
    );

    let (_, stderr, code) = run_command(dir.path(), &["history", "export", "5"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"));

    let (stdout, _, code) = run_command(dir.path(), &["history", "clear"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "History cleared");
    let (stdout, _, _) = run_command(dir.path(), &["history", "list"], None);
    assert_eq!(stdout.trim(), "No calculations yet.");
}

#[test]
fn test_corrupt_history_is_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join("history"), "{broken").unwrap();

    let (stdout, _, code) = run_command(dir.path(), &["history", "list"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "No calculations yet.");
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, _) = run_command(dir.path(), &["theme"], None);
    assert_eq!(stdout.trim(), "light");
    let (stdout, _, _) = run_command(dir.path(), &["theme", "toggle"], None);
    assert_eq!(stdout.trim(), "dark");
    let (stdout, _, _) = run_command(dir.path(), &["theme"], None);
    assert_eq!(stdout.trim(), "dark");
}
