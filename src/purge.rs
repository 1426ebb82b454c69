//! Purging left-tree files that are duplicated in the right tree
//!
//! Deletion is irreversible and happens one file at a time in duplicate
//! order. The first failure stops the purge; files not yet reached stay in
//! place. Every target is checked to lie strictly inside the left root before
//! it is unlinked.

use crate::content::ContentComparator;
use crate::duplicates::{DuplicateFinder, Duplicates};
use crate::error::{Result, TreeCompareError};
use crate::tree::path;
use crate::tree::reconcile::ReconcileOptions;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// A file removed by a purge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    #[serde(serialize_with = "path::serialize_lossy")]
    pub relative: PathBuf,
    #[serde(serialize_with = "path::serialize_lossy")]
    pub path: PathBuf,
    pub size: u64,
}

/// Totals for a completed purge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurgeSummary {
    pub deleted: usize,
    pub bytes_freed: u64,
}

/// Deletes left files that have identical twins in the right tree
#[derive(Debug, Clone)]
pub struct Purger {
    finder: DuplicateFinder,
}

impl Purger {
    pub fn new(left_root: &Path, right_root: &Path) -> Result<Self> {
        Ok(Self::from_finder(DuplicateFinder::new(left_root, right_root)?))
    }

    pub fn with_options(
        left_root: &Path,
        right_root: &Path,
        options: ReconcileOptions,
        comparator: ContentComparator,
    ) -> Result<Self> {
        Ok(Self::from_finder(DuplicateFinder::with_options(
            left_root, right_root, options, comparator,
        )?))
    }

    pub fn from_finder(finder: DuplicateFinder) -> Self {
        Self { finder }
    }

    pub fn left_root(&self) -> &Path {
        self.finder.left_root()
    }

    /// Lazily delete duplicates, yielding each removed file
    ///
    /// Stopping iteration early stops deleting.
    pub fn deletions(&self) -> Result<Purge> {
        Ok(Purge {
            duplicates: self.finder.duplicates()?,
            root: self.left_root().to_path_buf(),
            halted: false,
        })
    }

    /// Delete every duplicate and report totals
    pub fn purge(&self) -> Result<PurgeSummary> {
        let mut summary = PurgeSummary::default();
        for deleted in self.deletions()? {
            let deleted = deleted?;
            summary.deleted += 1;
            summary.bytes_freed += deleted.size;
        }
        info!(
            root = %self.left_root().display(),
            deleted = summary.deleted,
            bytes_freed = summary.bytes_freed,
            "Purge complete"
        );
        Ok(summary)
    }
}

/// Lazy purge in progress
///
/// Yields nothing more after the first error.
pub struct Purge {
    duplicates: Duplicates,
    root: PathBuf,
    halted: bool,
}

impl Iterator for Purge {
    type Item = Result<Deleted>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let result = self.duplicates.next()?.and_then(|duplicate| {
            delete_within(&self.root, &duplicate.relative).map(|(path, size)| Deleted {
                relative: duplicate.relative,
                path,
                size,
            })
        });
        self.halted = result.is_err();
        Some(result)
    }
}

/// Join `relative` onto `root`, refusing any result outside the root
pub fn guarded_target(root: &Path, relative: &Path) -> Result<PathBuf> {
    let target = path::normalize_lexically(&root.join(relative));
    if !path::is_strictly_within(root, &target) {
        error!(
            root = %root.display(),
            target = %target.display(),
            "Deletion target escapes root"
        );
        return Err(TreeCompareError::InternalConsistency {
            root: root.to_path_buf(),
            target,
        });
    }
    Ok(target)
}

/// Delete one file under `root`, returning its path and size
pub fn delete_within(root: &Path, relative: &Path) -> Result<(PathBuf, u64)> {
    let target = guarded_target(root, relative)?;
    let size = std::fs::symlink_metadata(&target)
        .map(|metadata| metadata.len())
        .map_err(|e| TreeCompareError::io(&target, e))?;
    std::fs::remove_file(&target).map_err(|e| TreeCompareError::io(&target, e))?;
    info!(path = %target.display(), size, "Deleted duplicate");
    Ok((target, size))
}
