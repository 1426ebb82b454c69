//! Treecompare: compare two directory trees
//!
//! Matches files of two trees by relative path, compares matched files byte
//! for byte, and can purge files from the first tree that are duplicated at
//! the same relative path in the second.

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod purge;
pub mod tree;

pub use api::{
    contents_equal, enumerate, find_duplicates, find_unique, purge, reconcile, ComparisonMode,
    ModeItem, TreeCompare,
};
pub use error::{Result, TreeCompareError};
