//! Shared test utilities for integration tests
//!
//! Builds small directory trees inside a temp dir so each test owns its own
//! pair of roots.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `files` (relative path, contents) under `root`, creating parents
pub fn build_tree(root: &Path, files: &[(&str, &[u8])]) {
    fs::create_dir_all(root).unwrap();
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Two sibling roots `a` and `b` populated with the given files
pub fn tree_pair(
    temp_dir: &TempDir,
    left: &[(&str, &[u8])],
    right: &[(&str, &[u8])],
) -> (PathBuf, PathBuf) {
    let left_root = temp_dir.path().join("a");
    let right_root = temp_dir.path().join("b");
    build_tree(&left_root, left);
    build_tree(&right_root, right);
    (left_root, right_root)
}

/// The scenario used across tests:
/// a = {x/a.txt="hi", b.txt="same"}, b = {x/a.txt="bye", b.txt="same", c.txt="new"}
pub fn scenario(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    tree_pair(
        temp_dir,
        &[("x/a.txt", b"hi"), ("b.txt", b"same")],
        &[("x/a.txt", b"bye"), ("b.txt", b"same"), ("c.txt", b"new")],
    )
}
