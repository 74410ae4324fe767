//! Integration tests for the command line binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{list_dir, temp_fixture, write_archive};

/// Command for the binary with an isolated working directory and config.
fn enex2html(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("enex2html").expect("Failed to locate enex2html binary");
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(cwd.join("absent.toml"));
    cmd
}

/// The single run folder created below `root`.
fn only_run_folder(root: &Path) -> std::path::PathBuf {
    let stamps = list_dir(root);
    assert_eq!(stamps.len(), 1, "expected one run folder, found {:?}", stamps);
    root.join(&stamps[0])
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_exits_0_and_shows_usage() {
    let temp = TempDir::new().unwrap();
    enex2html(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENEX_FILE"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn missing_argument_shows_error() {
    let temp = TempDir::new().unwrap();
    enex2html(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENEX_FILE"));
}

#[test]
fn completions_print_script() {
    let temp = TempDir::new().unwrap();
    enex2html(temp.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enex2html"));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn converts_into_default_output_folder() {
    let (temp, archive) = temp_fixture("meeting.enex");

    enex2html(temp.path())
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Processing input file: {}, writing output to folder 'output'.",
            archive.display()
        )))
        .stdout(predicate::str::contains("Wrote 1 note(s) and 1 attachment(s)"));

    let run = only_run_folder(&temp.path().join("output")).join("meeting");
    assert!(run.join("Meeting_Notes.html").is_file());
    assert!(run.join("Meeting_Notes_attachments/noname.png").is_file());
}

#[test]
fn output_flag_overrides_root() {
    let (temp, archive) = temp_fixture("drafts.enex");
    let out = temp.path().join("exports");

    enex2html(temp.path())
        .arg(&archive)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let run = only_run_folder(&out).join("drafts");
    assert_eq!(
        list_dir(&run),
        vec!["Draft.html", "Draft_1.html", "Draft_1_attachments"]
    );
    assert!(!temp.path().join("output").exists());
}

#[test]
fn config_file_sets_rewrite_passes() {
    let (temp, archive) = temp_fixture("mixed.enex");
    let config = temp.path().join("enex2html.toml");
    fs::write(&config, "[rewrite]\ntables = true\n").unwrap();

    Command::cargo_bin("enex2html")
        .unwrap()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&config)
        .arg(&archive)
        .assert()
        .success();

    let run = only_run_folder(&temp.path().join("output")).join("mixed");
    let html = fs::read_to_string(run.join("Shopping__Errands.html")).unwrap();
    assert!(html.contains("<td>cell</td>"));
    assert!(html.contains("<span style="));
}

#[test]
fn skipped_attachments_are_reported() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(
        temp.path(),
        "broken.enex",
        r#"<en-export><note><title>Broken</title>
        <content><![CDATA[<en-note><en-media hash="902fbdd2b1df0c4f70b4a5d23525e932"/></en-note>]]></content>
        <resource><data>@@@</data><mime>image/png</mime></resource>
        </note></en-export>"#,
    );

    enex2html(temp.path())
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 attachment(s) skipped, 1 note(s) with unresolved attachment references",
        ))
        .stderr(predicate::str::contains("Error processing attachment"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn nonexistent_archive_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    enex2html(temp.path())
        .arg("nope.enex")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read archive nope.enex"));
    assert!(!temp.path().join("output").exists());
}

#[test]
fn malformed_config_exits_nonzero() {
    let (temp, archive) = temp_fixture("meeting.enex");
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[naming\nmax_length = ").unwrap();

    Command::cargo_bin("enex2html")
        .unwrap()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&config)
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn quiet_suppresses_warnings() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(
        temp.path(),
        "plain.enex",
        "<en-export><note><title>Plain</title><content>no wrapper</content></note></en-export>",
    );

    enex2html(temp.path())
        .arg(&archive)
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
