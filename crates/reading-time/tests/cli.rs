//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("READING_TIME_WPM")
        .env_remove("READING_TIME_ROUNDING")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `name` inside a fresh temp dir.
fn fixture(name: &str, contents: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    (tmp, path)
}

fn article(words: usize, images: usize) -> String {
    let body = "word ".repeat(words);
    let imgs = "<img src=\"a.png\" alt=\"a\">".repeat(images);
    format!("<html><head><title></title></head><body><p>{body}</p>{imgs}</body></html>")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("estimate"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("READING_TIME_WPM"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// =============================================================================
// Estimate Command
// =============================================================================

#[test]
fn estimate_prints_summary_sentence() {
    let (tmp, path) = fixture("post.html", &article(450, 2));
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "It will take 3 minutes to read 450 words and 2 images at 200 words per minute.\n",
        ));
}

#[test]
fn estimate_short_text_is_one_minute() {
    let (tmp, path) = fixture("note.txt", "just a few words");
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 minute to read 4 words"));
}

#[test]
fn estimate_empty_file_is_one_minute() {
    let (tmp, path) = fixture("empty.html", "");
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 minute to read 0 words and 0 images"));
}

#[test]
fn estimate_flags_override_defaults() {
    let (tmp, path) = fixture("post.html", &article(600, 0));
    cmd()
        .current_dir(tmp.path())
        .args([
            "estimate",
            path.to_str().unwrap(),
            "--wpm",
            "300",
            "--plural",
            "min read",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "It will take 2 min read 600 words and 0 images at 300 words per minute.",
        ));
}

#[test]
fn estimate_image_time_adds_minutes() {
    let (tmp, path) = fixture("gallery.html", &article(0, 10));
    // 12 + 11 + ... + 3 = 75 seconds of images
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap(), "--image-time"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 minutes to read 0 words and 10 images"));
}

#[test]
fn estimate_rounding_down() {
    let (tmp, path) = fixture("post.html", &article(390, 0));
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap(), "--rounding", "down"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 minute to read 390 words"));
}

#[test]
fn estimate_json_output() {
    let (tmp, path) = fixture("post.html", &article(450, 1));
    let output = cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["words"], 450);
    assert_eq!(json["images"], 1);
    assert_eq!(json["minutes"], 3);
    assert_eq!(json["formatted"], "3 minutes to read");
    assert_eq!(json["wpm"], 200);
}

#[test]
fn estimate_zero_wpm_fails() {
    let (tmp, path) = fixture("post.html", "some words");
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap(), "--wpm", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("words per minute"));
}

#[test]
fn estimate_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", "nope.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be read or found"))
        .stderr(predicate::str::contains("nope.html"));
}

#[test]
fn estimate_ignores_scripts_and_comments() {
    let html = "<p>one two three</p><script>var a = 1; var b = 2;</script><!-- four five -->";
    let (tmp, path) = fixture("post.html", html);
    cmd()
        .current_dir(tmp.path())
        .args(["estimate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 words"));
}

// =============================================================================
// Words & Images Commands
// =============================================================================

#[test]
fn words_prints_count() {
    let (tmp, path) = fixture("post.html", "<h1>Title</h1><p>Hello <b>bold</b> world</p>");
    cmd()
        .current_dir(tmp.path())
        .args(["words", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

#[test]
fn images_prints_count() {
    let (tmp, path) = fixture("post.html", &article(5, 3));
    cmd()
        .current_dir(tmp.path())
        .args(["images", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));
}

#[test]
fn words_json_output() {
    let (tmp, path) = fixture("post.txt", "alpha beta gamma");
    cmd()
        .current_dir(tmp.path())
        .args(["words", path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"words\": 3"));
}

#[test]
fn input_limit_from_config_is_enforced() {
    let (tmp, path) = fixture("post.txt", &"word ".repeat(100));
    fs::write(tmp.path().join(".reading-time.toml"), "max_input_bytes = 10").unwrap();
    cmd()
        .current_dir(tmp.path())
        .args(["words", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    cmd()
        .current_dir(tmp.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Words per minute"));
}

#[test]
fn chdir_to_missing_directory_fails() {
    cmd()
        .args(["-C", "/definitely/not/here", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}

#[test]
fn quiet_and_verbose_flags_are_accepted() {
    let (tmp, path) = fixture("post.txt", "one two");
    cmd()
        .current_dir(tmp.path())
        .args(["-q", "words", path.to_str().unwrap()])
        .assert()
        .success();
    cmd()
        .current_dir(tmp.path())
        .args(["-vv", "words", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn log_dir_env_writes_jsonl() {
    let (tmp, path) = fixture("post.txt", "one two");
    let logs = tmp.path().join("logs");
    cmd()
        .current_dir(tmp.path())
        .env("READING_TIME_LOG_DIR", &logs)
        .args(["-v", "words", path.to_str().unwrap()])
        .assert()
        .success();
    assert!(logs.join("reading-time.jsonl").exists());
}
