//! Integration tests for the `agnotestic` CLI binary.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Command isolated from the caller's environment and working directory.
fn agnotestic_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agnotestic"));
    cmd.current_dir(cwd)
        .env_remove("AGNOTESTIC_ROOT")
        .env_remove("AGNOTESTIC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn seed_notes(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    write_file(
        &root.join("alpha.md"),
        "# Alpha Note\n\nReference [[beta]] and #rust.\n",
    )?;
    write_file(
        &root.join("sub/beta.md"),
        "# Beta Knowledge\n\nBack to [alpha](../alpha.md). #python\n",
    )?;
    write_file(&root.join("sub/ignored.txt"), "# Not a note\n")?;
    Ok(())
}

fn stdout_lines(stdout: &[u8]) -> Result<BTreeSet<String>, Box<dyn std::error::Error>> {
    Ok(String::from_utf8(stdout.to_vec())?
        .lines()
        .map(ToString::to_string)
        .collect())
}

#[test]
fn test_scan_prints_one_path_per_note() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path()).arg("--root").arg(".").output()?;
    assert!(
        output.status.success(),
        "agnotestic scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let expected: BTreeSet<String> = ["./alpha.md", "./sub/beta.md"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(stdout_lines(&output.stdout)?, expected);
    Ok(())
}

#[test]
fn test_scan_subcommand_reads_root_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path())
        .env("AGNOTESTIC_ROOT", tmp.path())
        .arg("scan")
        .arg("--sort")
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            tmp.path().join("alpha.md").display().to_string(),
            tmp.path().join("sub/beta.md").display().to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_scan_reads_root_from_default_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(&tmp.path().join("wiki"))?;
    write_file(&tmp.path().join("config.toml"), "wiki-location = \"wiki\"\n")?;

    let output = agnotestic_cmd(tmp.path()).output()?;
    assert!(
        output.status.success(),
        "agnotestic failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_lines(&output.stdout)?.len(), 2);
    Ok(())
}

#[test]
fn test_empty_root_succeeds_with_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let output = agnotestic_cmd(tmp.path()).arg("--root").arg(tmp.path()).output()?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_missing_root_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let output = agnotestic_cmd(tmp.path())
        .arg("--root")
        .arg(tmp.path().join("nope"))
        .output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("not found"), "unexpected stderr: {stderr}");
    Ok(())
}

#[test]
fn test_no_root_configured_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let output = agnotestic_cmd(tmp.path()).output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("no notes root configured"), "unexpected stderr: {stderr}");
    Ok(())
}

#[test]
fn test_tags_query_plain_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path())
        .arg("--root")
        .arg(".")
        .arg("tags")
        .arg("rust")
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, "1 results\nTitle,Path\nAlpha Note,./alpha.md\n");
    Ok(())
}

#[test]
fn test_links_query_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path())
        .arg("--root")
        .arg(".")
        .arg("--format")
        .arg("json")
        .arg("links")
        .arg("alpha")
        .output()?;
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    let rows = payload.as_array().ok_or("expected array")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("title").and_then(Value::as_str), Some("Beta Knowledge"));
    Ok(())
}

#[test]
fn test_full_text_query_alfred_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path())
        .arg("--root")
        .arg(".")
        .arg("full-text")
        .arg("REFERENCE")
        .arg("-f")
        .arg("alfred")
        .output()?;
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .ok_or("missing items")?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("title").and_then(Value::as_str), Some("Alpha Note"));
    assert_eq!(items[0].get("type").and_then(Value::as_str), Some("file"));
    Ok(())
}

#[test]
fn test_notes_command_emits_references() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    let output = agnotestic_cmd(tmp.path())
        .arg("--root")
        .arg(".")
        .arg("notes")
        .output()?;
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    let notes = payload.as_array().ok_or("expected array")?;
    assert_eq!(notes.len(), 2);
    let alpha = notes
        .iter()
        .find(|n| n.get("title").and_then(Value::as_str) == Some("Alpha Note"))
        .ok_or("missing alpha")?;
    assert_eq!(alpha["tags"][0], "#rust");
    assert_eq!(alpha["links"][0]["target"], "beta");
    assert_eq!(alpha["links"][0]["kind"], "wiki");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_skip_unreadable_continues_past_traversal_errors() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(&tmp.path().join("real.md"), "# Real\n")?;
    fs::create_dir_all(tmp.path().join("d"))?;
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("d/loop"))?;

    let failed = agnotestic_cmd(tmp.path())
        .args(["--root", ".", "--follow-links"])
        .output()?;
    assert!(!failed.status.success());
    let stderr = String::from_utf8(failed.stderr)?;
    assert!(stderr.contains("failed to traverse"), "unexpected stderr: {stderr}");

    let output = agnotestic_cmd(tmp.path())
        .args(["--root", ".", "--follow-links", "--skip-unreadable"])
        .output()?;
    assert!(
        output.status.success(),
        "agnotestic failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8(output.stdout)?, "./real.md\n");
    Ok(())
}

#[test]
fn test_format_is_rejected_outside_queries() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    seed_notes(tmp.path())?;

    for command in ["scan", "notes"] {
        let output = agnotestic_cmd(tmp.path())
            .args(["--root", ".", "--format", "json", command])
            .output()?;
        assert!(!output.status.success(), "{command} accepted --format");
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr)?;
        assert!(stderr.contains("--format applies only"), "unexpected stderr: {stderr}");
    }
    Ok(())
}
