//! Entry operations
//!
//! Free functions cover the individual operations with default settings.
//! [`TreeCompare`] binds two roots to a configuration and dispatches the
//! three listing modes onto the same reconcile and compare primitives.

use crate::config::TreeCompareConfig;
use crate::content::ContentComparator;
use crate::duplicates::{Duplicate, DuplicateFinder, Duplicates, Unique, Uniques};
use crate::error::Result;
use crate::purge::{Deleted, Purge, Purger, PurgeSummary};
use crate::tree::reconcile::{PathShape, ReconcileOptions, Reconciler, Records};
use crate::tree::walker::{RelativePaths, Walker};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Lazily list the files under `root`, relative to it
pub fn enumerate(root: &Path) -> Result<RelativePaths> {
    Ok(Walker::new(root)?.relative_paths())
}

/// Lazily reconcile two trees by relative path
pub fn reconcile(left_root: &Path, right_root: &Path, full_path: bool) -> Result<Records> {
    let options = ReconcileOptions {
        shape: PathShape::from_full_path(full_path),
        ..Default::default()
    };
    Reconciler::with_options(left_root, right_root, options)?.records()
}

/// True if two distinct files hold the same non-empty bytes
pub fn contents_equal(left: &Path, right: &Path) -> Result<bool> {
    ContentComparator::default().contents_equal(left, right)
}

/// Lazily list left files with an identical twin on the right
pub fn find_duplicates(left_root: &Path, right_root: &Path) -> Result<Duplicates> {
    DuplicateFinder::new(left_root, right_root)?.duplicates()
}

/// Lazily list left files without an identical twin on the right
pub fn find_unique(left_root: &Path, right_root: &Path) -> Result<Uniques> {
    DuplicateFinder::new(left_root, right_root)?.uniques()
}

/// Delete every left file that has an identical twin on the right
pub fn purge(left_root: &Path, right_root: &Path) -> Result<PurgeSummary> {
    Purger::new(left_root, right_root)?.purge()
}

/// Listing mode selected by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Unique,
    Duplicate,
    Purge,
}

impl FromStr for ComparisonMode {
    type Err = crate::error::TreeCompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unique" => Ok(ComparisonMode::Unique),
            "duplicate" => Ok(ComparisonMode::Duplicate),
            "purge" => Ok(ComparisonMode::Purge),
            other => Err(crate::error::TreeCompareError::Config(format!(
                "Unknown mode: {}",
                other
            ))),
        }
    }
}

/// One result of a mode run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeItem {
    Unique(Unique),
    Duplicate(Duplicate),
    Deleted(Deleted),
}

impl ModeItem {
    /// Path relative to the left root
    pub fn relative(&self) -> &Path {
        match self {
            ModeItem::Unique(item) => &item.relative,
            ModeItem::Duplicate(item) => &item.relative,
            ModeItem::Deleted(item) => &item.relative,
        }
    }

    /// Absolute path under the left root
    pub fn path(&self) -> &Path {
        match self {
            ModeItem::Unique(item) => &item.left,
            ModeItem::Duplicate(item) => &item.left,
            ModeItem::Deleted(item) => &item.path,
        }
    }
}

/// Lazy results of a mode run
pub enum ModeResults {
    Unique(Uniques),
    Duplicate(Duplicates),
    Purge(Purge),
}

impl Iterator for ModeResults {
    type Item = Result<ModeItem>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ModeResults::Unique(inner) => inner.next().map(|r| r.map(ModeItem::Unique)),
            ModeResults::Duplicate(inner) => inner.next().map(|r| r.map(ModeItem::Duplicate)),
            ModeResults::Purge(inner) => inner.next().map(|r| r.map(ModeItem::Deleted)),
        }
    }
}

/// Two roots bound to a configuration
#[derive(Debug, Clone)]
pub struct TreeCompare {
    left_root: PathBuf,
    right_root: PathBuf,
    config: TreeCompareConfig,
}

impl TreeCompare {
    pub fn new(left_root: &Path, right_root: &Path, config: TreeCompareConfig) -> Self {
        Self {
            left_root: left_root.to_path_buf(),
            right_root: right_root.to_path_buf(),
            config,
        }
    }

    pub fn config(&self) -> &TreeCompareConfig {
        &self.config
    }

    /// Reconcile with the configured strategy
    pub fn reconcile(&self, shape: PathShape) -> Result<Records> {
        Reconciler::with_options(
            &self.left_root,
            &self.right_root,
            self.config.reconcile_options(shape),
        )?
        .records()
    }

    fn finder(&self) -> Result<DuplicateFinder> {
        self.config.validate()?;
        DuplicateFinder::with_options(
            &self.left_root,
            &self.right_root,
            self.config.reconcile_options(PathShape::Relative),
            self.config.comparator()?,
        )
    }

    /// Start a lazy run of `mode`; purge deletes as results are pulled
    pub fn run(&self, mode: ComparisonMode) -> Result<ModeResults> {
        let finder = self.finder()?;
        Ok(match mode {
            ComparisonMode::Unique => ModeResults::Unique(finder.uniques()?),
            ComparisonMode::Duplicate => ModeResults::Duplicate(finder.duplicates()?),
            ComparisonMode::Purge => ModeResults::Purge(Purger::from_finder(finder).deletions()?),
        })
    }
}
