//! End-to-end tests of the treecompare binary

use super::test_utils::{build_tree, scenario};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn treecompare(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_treecompare"))
        .args(args)
        .env_remove("TREECOMPARE_LOG")
        .output()
        .unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_no_mode_prints_usage_and_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("specify either --unique, --duplicate or --purge"));
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_modes_are_mutually_exclusive() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right), "--unique", "--purge"]);
    assert!(!output.status.success());
    assert!(left.join("b.txt").exists());
}

#[test]
fn test_unique_relative_output() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right), "--unique", "--relative"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = Path::new("x").join("a.txt").display().to_string();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec![expected.as_str()]);
    assert!(output.stderr.is_empty());
}

#[test]
fn test_duplicate_full_output() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right), "--duplicate"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(Path::new(lines[0]).is_absolute());
    assert!(lines[0].ends_with("b.txt"));
}

#[test]
fn test_purge_deletes_and_lists() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right), "--purge", "--relative"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim_end(), "b.txt");
    assert!(!left.join("b.txt").exists());
    assert!(left.join("x").join("a.txt").exists());
    assert!(right.join("b.txt").exists());
}

#[test]
fn test_same_directory_message() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("f", b"f")]);

    let output = treecompare(&[arg(&root), arg(&root), "--purge"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim_end(),
        "DIR1 and DIR2 cannot be the same!"
    );
    assert!(root.join("f").exists());
}

#[test]
fn test_missing_directory_message() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("f", b"f")]);
    let missing = temp_dir.path().join("missing");

    let output = treecompare(&[arg(&root), arg(&missing), "--unique"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim_end(),
        "one of the specified dirs does not exist!"
    );
}

#[test]
fn test_file_root_message() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("f", b"f")]);

    let output = treecompare(&[arg(&root.join("f")), arg(&root), "--duplicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim_end(),
        "one of the specified dirs is not a directory!"
    );
}

#[test]
fn test_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let output = treecompare(&[arg(&left), arg(&right), "--unique", "--format", "json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(value["kind"], "unique");
    assert_eq!(value["reason"], "content_differs");
}

#[test]
fn test_config_file_applies() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);
    let config = temp_dir.path().join("treecompare.toml");
    std::fs::write(&config, "[compare]\nblock_size = 0\n").unwrap();

    let output = treecompare(&[arg(&left), arg(&right), "--purge", "--config", arg(&config)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("block_size"));
    assert!(left.join("b.txt").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);
    let config = temp_dir.path().join("absent.toml");

    let output = treecompare(&[arg(&left), arg(&right), "--unique", "--config", arg(&config)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config file"));
}

#[cfg(unix)]
fn non_utf8_pair(temp_dir: &TempDir) -> Option<(std::path::PathBuf, std::path::PathBuf)> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (left, right) = scenario(temp_dir);
    let name = OsStr::from_bytes(b"bad\xffname");
    // Some filesystems only accept UTF-8 names.
    std::fs::write(left.join(name), "dup").ok()?;
    std::fs::write(right.join(name), "dup").ok()?;
    std::fs::write(left.join("zz-own.txt"), "own").unwrap();
    Some((left, right))
}

#[cfg(unix)]
#[test]
fn test_purge_json_with_non_utf8_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let Some((left, right)) = non_utf8_pair(&temp_dir) else {
        return;
    };

    let output = treecompare(&[arg(&left), arg(&right), "--purge", "--format", "json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let relatives: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["kind"], "deleted");
            value["relative"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(relatives.len(), 2);
    assert!(relatives.contains(&"bad\u{fffd}name".to_string()));
    assert!(relatives.contains(&"b.txt".to_string()));

    assert!(!left.join(OsStr::from_bytes(b"bad\xffname")).exists());
    assert!(!left.join("b.txt").exists());
    assert!(left.join("zz-own.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_text_listing_keeps_raw_name_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let Some((left, right)) = non_utf8_pair(&temp_dir) else {
        return;
    };

    let output = treecompare(&[arg(&left), arg(&right), "--duplicate", "--relative"]);
    assert!(output.status.success());
    let mut lines: Vec<&[u8]> = output
        .stdout
        .split(|byte| *byte == b'\n')
        .filter(|line| !line.is_empty())
        .collect();
    lines.sort();
    assert_eq!(lines, vec![&b"b.txt"[..], &b"bad\xffname"[..]]);
}
