//! Filesystem walker yielding root-relative file paths

use crate::error::{Result, TreeCompareError};
use crate::tree::path;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to descend through symbolic links to directories
    pub follow_symlinks: bool,
    /// Visit directory entries in file-name order
    ///
    /// Sorted walks yield relative paths in component-wise order, which the
    /// merge reconciler depends on.
    pub sorted: bool,
}

/// Recursive file enumerator for one root
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker for `root`, which must exist and be a directory
    pub fn new(root: &Path) -> Result<Self> {
        Self::with_config(root, WalkerConfig::default())
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: &Path, config: WalkerConfig) -> Result<Self> {
        let root = path::resolve_root(root)?;
        Ok(Self { root, config })
    }

    /// Absolute root this walker enumerates
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily enumerate every non-directory entry below the root
    pub fn relative_paths(&self) -> RelativePaths {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);
        if self.config.sorted {
            walker = walker.sort_by_file_name();
        }
        RelativePaths {
            root: self.root.clone(),
            inner: walker.into_iter(),
        }
    }
}

/// Iterator over root-relative file paths
///
/// Order is directory-walk order unless the walker was configured as sorted.
pub struct RelativePaths {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl RelativePaths {
    fn relative(&self, entry: &DirEntry) -> Result<PathBuf> {
        entry
            .path()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| TreeCompareError::InternalConsistency {
                root: self.root.clone(),
                target: entry.path().to_path_buf(),
            })
    }
}

impl Iterator for RelativePaths {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if is_directory_like(&entry) {
                continue;
            }
            return Some(self.relative(&entry));
        }
    }
}

/// Directories, and unfollowed links pointing at directories, are not files
fn is_directory_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}
