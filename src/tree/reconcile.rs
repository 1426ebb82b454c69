//! Name reconciliation between two trees
//!
//! Every relative path found under either root is reported exactly once, as
//! left-only, right-only, or present in both. Two strategies are available:
//!
//! - [`ReconcileStrategy::Hashed`] materializes the left tree into a set and
//!   streams the right tree against it. Matches are discovered while the right
//!   tree is walked; left-only paths follow once it is exhausted, in lexical
//!   order.
//! - [`ReconcileStrategy::SortedMerge`] walks both trees in sorted order and
//!   merge-joins them, keeping memory bounded on both sides.

use crate::error::{Result, TreeCompareError};
use crate::tree::path;
use crate::tree::walker::{RelativePaths, Walker, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// One reconciliation record; a record never lacks both sides
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reconciled {
    LeftOnly(PathBuf),
    RightOnly(PathBuf),
    Both(PathBuf, PathBuf),
}

impl Reconciled {
    /// Path on the left side, if present
    pub fn left(&self) -> Option<&Path> {
        match self {
            Reconciled::LeftOnly(left) | Reconciled::Both(left, _) => Some(left),
            Reconciled::RightOnly(_) => None,
        }
    }

    /// Path on the right side, if present
    pub fn right(&self) -> Option<&Path> {
        match self {
            Reconciled::RightOnly(right) | Reconciled::Both(_, right) => Some(right),
            Reconciled::LeftOnly(_) => None,
        }
    }

    pub fn is_both(&self) -> bool {
        matches!(self, Reconciled::Both(..))
    }

    /// Split into the `(left, right)` pair form
    pub fn into_pair(self) -> (Option<PathBuf>, Option<PathBuf>) {
        match self {
            Reconciled::LeftOnly(left) => (Some(left), None),
            Reconciled::RightOnly(right) => (None, Some(right)),
            Reconciled::Both(left, right) => (Some(left), Some(right)),
        }
    }
}

/// Shape of the paths carried by emitted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathShape {
    /// Joined onto the owning root
    #[default]
    Full,
    /// Relative to the owning root
    Relative,
}

impl PathShape {
    pub fn from_full_path(full_path: bool) -> Self {
        if full_path {
            PathShape::Full
        } else {
            PathShape::Relative
        }
    }
}

/// How the two path streams are matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileStrategy {
    #[default]
    Hashed,
    SortedMerge,
}

impl FromStr for ReconcileStrategy {
    type Err = TreeCompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hashed" => Ok(ReconcileStrategy::Hashed),
            "sorted-merge" => Ok(ReconcileStrategy::SortedMerge),
            other => Err(TreeCompareError::Config(format!(
                "Invalid reconcile strategy: {} (must be 'hashed' or 'sorted-merge')",
                other
            ))),
        }
    }
}

/// Reconciler options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    pub strategy: ReconcileStrategy,
    pub shape: PathShape,
    pub follow_symlinks: bool,
}

/// Matches the files of two distinct roots by relative path
#[derive(Debug, Clone)]
pub struct Reconciler {
    left: Walker,
    right: Walker,
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler with default options
    pub fn new(left_root: &Path, right_root: &Path) -> Result<Self> {
        Self::with_options(left_root, right_root, ReconcileOptions::default())
    }

    /// Create a reconciler; fails if the roots are the same directory
    pub fn with_options(
        left_root: &Path,
        right_root: &Path,
        options: ReconcileOptions,
    ) -> Result<Self> {
        let (left_root, right_root) = path::resolve_distinct_roots(left_root, right_root)?;
        let walker_config = WalkerConfig {
            follow_symlinks: options.follow_symlinks,
            sorted: options.strategy == ReconcileStrategy::SortedMerge,
        };
        Ok(Self {
            left: Walker::with_config(&left_root, walker_config.clone())?,
            right: Walker::with_config(&right_root, walker_config)?,
            options,
        })
    }

    pub fn left_root(&self) -> &Path {
        self.left.root()
    }

    pub fn right_root(&self) -> &Path {
        self.right.root()
    }

    /// Start a reconciliation pass
    ///
    /// With the hashed strategy the left tree is enumerated in full before
    /// this returns.
    pub fn records(&self) -> Result<Records> {
        let inner = match self.options.strategy {
            ReconcileStrategy::Hashed => {
                let remaining = self
                    .left
                    .relative_paths()
                    .collect::<Result<HashSet<_>>>()?;
                debug!(
                    root = %self.left_root().display(),
                    files = remaining.len(),
                    "Materialized left tree"
                );
                RecordSource::Hashed(HashedRecords {
                    remaining,
                    right: self.right.relative_paths(),
                    leftovers: None,
                })
            }
            ReconcileStrategy::SortedMerge => RecordSource::Merge(MergeRecords {
                left: self.left.relative_paths().peekable(),
                right: self.right.relative_paths().peekable(),
            }),
        };
        Ok(Records {
            inner,
            shape: self.options.shape,
            left_root: self.left_root().to_path_buf(),
            right_root: self.right_root().to_path_buf(),
        })
    }
}

/// Lazy sequence of reconciliation records
pub struct Records {
    inner: RecordSource,
    shape: PathShape,
    left_root: PathBuf,
    right_root: PathBuf,
}

enum RecordSource {
    Hashed(HashedRecords),
    Merge(MergeRecords),
}

impl Records {
    fn shaped(&self, record: Reconciled) -> Reconciled {
        if self.shape == PathShape::Relative {
            return record;
        }
        match record {
            Reconciled::LeftOnly(left) => Reconciled::LeftOnly(self.left_root.join(left)),
            Reconciled::RightOnly(right) => Reconciled::RightOnly(self.right_root.join(right)),
            Reconciled::Both(left, right) => {
                Reconciled::Both(self.left_root.join(left), self.right_root.join(right))
            }
        }
    }
}

impl Iterator for Records {
    type Item = Result<Reconciled>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match &mut self.inner {
            RecordSource::Hashed(source) => source.next()?,
            RecordSource::Merge(source) => source.next()?,
        };
        Some(record.map(|record| {
            debug!(record = ?record, "Reconciled path");
            self.shaped(record)
        }))
    }
}

struct HashedRecords {
    remaining: HashSet<PathBuf>,
    right: RelativePaths,
    leftovers: Option<std::vec::IntoIter<PathBuf>>,
}

impl Iterator for HashedRecords {
    type Item = Result<Reconciled>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.leftovers.is_none() {
            match self.right.next() {
                Some(Ok(path)) => {
                    let record = if self.remaining.remove(&path) {
                        Reconciled::Both(path.clone(), path)
                    } else {
                        Reconciled::RightOnly(path)
                    };
                    return Some(Ok(record));
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    let mut rest: Vec<PathBuf> = self.remaining.drain().collect();
                    rest.sort();
                    self.leftovers = Some(rest.into_iter());
                }
            }
        }
        self.leftovers
            .as_mut()?
            .next()
            .map(|path| Ok(Reconciled::LeftOnly(path)))
    }
}

struct MergeRecords {
    left: Peekable<RelativePaths>,
    right: Peekable<RelativePaths>,
}

enum MergeStep {
    Left,
    Right,
    Both,
}

impl Iterator for MergeRecords {
    type Item = Result<Reconciled>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(Err(_)), _) | (Some(Ok(_)), None) => MergeStep::Left,
            (_, Some(Err(_))) | (None, Some(Ok(_))) => MergeStep::Right,
            (Some(Ok(left)), Some(Ok(right))) => match left.cmp(right) {
                Ordering::Less => MergeStep::Left,
                Ordering::Greater => MergeStep::Right,
                Ordering::Equal => MergeStep::Both,
            },
        };
        match step {
            MergeStep::Left => self.left.next().map(|r| r.map(Reconciled::LeftOnly)),
            MergeStep::Right => self.right.next().map(|r| r.map(Reconciled::RightOnly)),
            MergeStep::Both => {
                self.right.next();
                self.left
                    .next()
                    .map(|r| r.map(|path| Reconciled::Both(path.clone(), path)))
            }
        }
    }
}
