//! Root resolution and lexical path utilities
//!
//! Roots are resolved the way a shell user expects: a leading `~` expands to
//! the home directory and relative paths are anchored at the current
//! directory. Resolution is purely lexical; symlinks are not followed, so two
//! roots are "the same" only when their absolute spellings match.

use crate::error::{Result, TreeCompareError};
use directories::BaseDirs;
use serde::Serializer;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` component to the user's home directory
///
/// Only the current user's home is known; `~name` forms are returned as
/// given and then resolve relative to the current directory.
pub fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let Some(dirs) = BaseDirs::new() else {
                return path.to_path_buf();
            };
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                dirs.home_dir().to_path_buf()
            } else {
                dirs.home_dir().join(rest)
            }
        }
        _ => path.to_path_buf(),
    }
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` directly under the root collapses into the root. Leading `..`
/// components of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Expand, anchor and normalize a path into its absolute spelling
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_user(path);
    let anchored = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir().map_err(|e| TreeCompareError::io(&expanded, e))?;
        cwd.join(expanded)
    };
    Ok(dunce::simplified(&normalize_lexically(&anchored)).to_path_buf())
}

/// Resolve a root directory, failing if it is missing or not a directory
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = absolutize(path)?;
    match std::fs::metadata(&root) {
        Ok(metadata) if metadata.is_dir() => Ok(root),
        Ok(_) => Err(TreeCompareError::NotADirectory(root)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TreeCompareError::NotFound(root))
        }
        Err(e) => Err(TreeCompareError::io(root, e)),
    }
}

/// Resolve two roots and reject them if they name the same directory
pub fn resolve_distinct_roots(left: &Path, right: &Path) -> Result<(PathBuf, PathBuf)> {
    let left = absolutize(left)?;
    let right = absolutize(right)?;
    if left == right {
        return Err(TreeCompareError::SameDirectory(left));
    }
    Ok((resolve_root(&left)?, resolve_root(&right)?))
}

/// True if `candidate`, once normalized, lies strictly below `root`
///
/// The check is component-wise, so `/data/a` does not contain `/data/ab`,
/// and a root never contains itself.
pub fn is_strictly_within(root: &Path, candidate: &Path) -> bool {
    let root = normalize_lexically(root);
    let candidate = normalize_lexically(candidate);
    candidate != root && candidate.starts_with(&root)
}

/// Serialize a path as a string, replacing bytes that are not valid UTF-8
pub fn serialize_lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}
