//! Duplicate and unique listings over a reconciliation pass
//!
//! Both listings look at the left tree only. A left path is a duplicate when
//! the right tree holds a byte-identical file at the same relative path; it is
//! unique when the right tree has no such path or holds different content.

use crate::content::{Comparison, ContentComparator};
use crate::error::Result;
use crate::tree::path;
use crate::tree::reconcile::{PathShape, ReconcileOptions, Reconciled, Reconciler, Records};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A left file with an identical twin in the right tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    #[serde(serialize_with = "path::serialize_lossy")]
    pub relative: PathBuf,
    #[serde(serialize_with = "path::serialize_lossy")]
    pub left: PathBuf,
    #[serde(serialize_with = "path::serialize_lossy")]
    pub right: PathBuf,
}

/// Why a left file is unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueReason {
    /// No file at this relative path in the right tree
    LeftOnly,
    /// The right tree's file differs (sizes, bytes, or both empty)
    ContentDiffers,
}

/// A left file without an identical twin in the right tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unique {
    #[serde(serialize_with = "path::serialize_lossy")]
    pub relative: PathBuf,
    #[serde(serialize_with = "path::serialize_lossy")]
    pub left: PathBuf,
    pub reason: UniqueReason,
}

/// Combines reconciliation with content comparison
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    reconciler: Reconciler,
    comparator: ContentComparator,
}

impl DuplicateFinder {
    /// Create a finder with default reconciliation and block size
    pub fn new(left_root: &Path, right_root: &Path) -> Result<Self> {
        Self::with_options(
            left_root,
            right_root,
            ReconcileOptions::default(),
            ContentComparator::default(),
        )
    }

    /// Create a finder; the requested path shape is ignored
    pub fn with_options(
        left_root: &Path,
        right_root: &Path,
        options: ReconcileOptions,
        comparator: ContentComparator,
    ) -> Result<Self> {
        let options = ReconcileOptions {
            shape: PathShape::Relative,
            ..options
        };
        Ok(Self {
            reconciler: Reconciler::with_options(left_root, right_root, options)?,
            comparator,
        })
    }

    pub fn left_root(&self) -> &Path {
        self.reconciler.left_root()
    }

    pub fn right_root(&self) -> &Path {
        self.reconciler.right_root()
    }

    /// Lazily yield left files with identical content at the same path on the right
    pub fn duplicates(&self) -> Result<Duplicates> {
        Ok(Duplicates {
            inner: self.left_side()?,
        })
    }

    /// Lazily yield left files that have no identical twin on the right
    pub fn uniques(&self) -> Result<Uniques> {
        Ok(Uniques {
            inner: self.left_side()?,
        })
    }

    fn left_side(&self) -> Result<LeftSide> {
        Ok(LeftSide {
            records: self.reconciler.records()?,
            comparator: self.comparator,
            left_root: self.left_root().to_path_buf(),
            right_root: self.right_root().to_path_buf(),
        })
    }
}

/// Left-side records, with a comparison for those present in both trees
struct LeftSide {
    records: Records,
    comparator: ContentComparator,
    left_root: PathBuf,
    right_root: PathBuf,
}

struct LeftEntry {
    relative: PathBuf,
    left: PathBuf,
    right: Option<PathBuf>,
    comparison: Option<Comparison>,
}

impl Iterator for LeftSide {
    type Item = Result<LeftEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            let entry = match record {
                Reconciled::RightOnly(_) => continue,
                Reconciled::LeftOnly(relative) => LeftEntry {
                    left: self.left_root.join(&relative),
                    relative,
                    right: None,
                    comparison: None,
                },
                Reconciled::Both(relative, _) => {
                    let left = self.left_root.join(&relative);
                    let right = self.right_root.join(&relative);
                    let comparison = match self.comparator.compare(&left, &right) {
                        Ok(comparison) => comparison,
                        Err(e) => return Some(Err(e)),
                    };
                    LeftEntry {
                        relative,
                        left,
                        right: Some(right),
                        comparison: Some(comparison),
                    }
                }
            };
            return Some(Ok(entry));
        }
    }
}

/// Lazy sequence of duplicates, in reconciliation order
pub struct Duplicates {
    inner: LeftSide,
}

impl Iterator for Duplicates {
    type Item = Result<Duplicate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            match (entry.comparison, entry.right) {
                (Some(Comparison::Identical), Some(right)) => {
                    return Some(Ok(Duplicate {
                        relative: entry.relative,
                        left: entry.left,
                        right,
                    }))
                }
                _ => continue,
            }
        }
    }
}

/// Lazy sequence of unique left files, in reconciliation order
pub struct Uniques {
    inner: LeftSide,
}

impl Iterator for Uniques {
    type Item = Result<Unique>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            let reason = match entry.comparison {
                None => UniqueReason::LeftOnly,
                Some(comparison) if comparison.is_identical() => continue,
                Some(_) => UniqueReason::ContentDiffers,
            };
            return Some(Ok(Unique {
                relative: entry.relative,
                left: entry.left,
                reason,
            }));
        }
    }
}
