//! Integration tests for name reconciliation and root validation

use super::test_utils::{build_tree, scenario, tree_pair};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use treecompare::tree::reconcile::{
    PathShape, ReconcileOptions, ReconcileStrategy, Reconciled, Reconciler,
};
use treecompare::{enumerate, reconcile, Result, TreeCompareError};

fn by_relative(records: Vec<Reconciled>) -> BTreeMap<PathBuf, (bool, bool)> {
    records
        .into_iter()
        .map(|record| {
            let (left, right) = record.into_pair();
            let relative = left.clone().or(right.clone()).unwrap();
            (relative, (left.is_some(), right.is_some()))
        })
        .collect()
}

#[test]
fn test_scenario_reconcile_relative() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    let records: Vec<_> = reconcile(&left, &right, false)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    let map = by_relative(records);

    assert_eq!(map.len(), 3);
    assert_eq!(map[&PathBuf::from("x").join("a.txt")], (true, true));
    assert_eq!(map[&PathBuf::from("b.txt")], (true, true));
    assert_eq!(map[&PathBuf::from("c.txt")], (false, true));
}

#[test]
fn test_full_shape_joins_roots() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = scenario(&temp_dir);

    for record in reconcile(&left, &right, true).unwrap() {
        let record = record.unwrap();
        if let Some(path) = record.left() {
            assert!(path.is_absolute());
            assert!(path.exists());
        }
        if let Some(path) = record.right() {
            assert!(path.is_absolute());
            assert!(path.exists());
        }
    }
}

#[test]
fn test_strategies_produce_same_records() {
    let temp_dir = TempDir::new().unwrap();
    let (left, right) = tree_pair(
        &temp_dir,
        &[("a", b""), ("a.b", b""), ("a-b/c", b""), ("m/b", b""), ("only-left", b"")],
        &[("a/c", b""), ("a.b", b""), ("a-b/c", b""), ("m/b", b""), ("only-right", b"")],
    );

    let collect = |strategy| {
        let options = ReconcileOptions {
            strategy,
            shape: PathShape::Relative,
            follow_symlinks: false,
        };
        let records: Vec<_> = Reconciler::with_options(&left, &right, options)
            .unwrap()
            .records()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        by_relative(records)
    };

    let hashed = collect(ReconcileStrategy::Hashed);
    assert_eq!(hashed, collect(ReconcileStrategy::SortedMerge));
    assert_eq!(hashed.len(), 7);
    assert_eq!(hashed[&PathBuf::from("a")], (true, false));
    assert_eq!(hashed[&PathBuf::from("a").join("c")], (false, true));
}

#[test]
fn test_enumerate_excludes_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("a/b/c.txt", b"c"), ("d.txt", b"d")]);
    fs::create_dir_all(root.join("empty")).unwrap();

    let mut paths: Vec<_> = enumerate(&root)
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap();
    paths.sort();
    assert_eq!(
        paths,
        vec![PathBuf::from("a").join("b").join("c.txt"), PathBuf::from("d.txt")]
    );
}

#[test]
fn test_same_directory_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("f", b"f")]);
    let spelled_differently = root.join("sub").join("..");

    let err = reconcile(&root, &spelled_differently, false).err().unwrap();
    assert!(matches!(err, TreeCompareError::SameDirectory(_)));
}

#[test]
fn test_missing_and_file_roots_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    build_tree(&root, &[("f", b"f")]);

    let err = reconcile(&root, &temp_dir.path().join("missing"), false)
        .err()
        .unwrap();
    assert!(matches!(err, TreeCompareError::NotFound(_)));

    let err = reconcile(&root, &root.join("f"), false).err().unwrap();
    assert!(matches!(err, TreeCompareError::NotADirectory(_)));
}
