//! CLI parse: clap types for treecompare. No behavior beyond mode selection.

use crate::api::ComparisonMode;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// treecompare - a simple tool to compare two directories
#[derive(Parser, Debug)]
#[command(name = "treecompare")]
#[command(about = "treecompare - a simple tool to compare two directories")]
#[command(
    after_help = "Example usage:\n  treecompare --unique dir1 dir2\n  treecompare --purge dir1 dir2"
)]
#[command(group(ArgGroup::new("mode").args(["unique", "duplicate", "purge"])))]
pub struct Cli {
    /// First directory
    #[arg(value_name = "DIR1")]
    pub dir1: PathBuf,

    /// Second directory
    #[arg(value_name = "DIR2")]
    pub dir2: PathBuf,

    /// List files that only exist in DIR1 (or differ from DIR2)
    #[arg(long)]
    pub unique: bool,

    /// List files in DIR1 that have a duplicate in DIR2 at same path
    #[arg(long)]
    pub duplicate: bool,

    /// Remove files from DIR1 that have duplicate in DIR2 at same path
    #[arg(long)]
    pub purge: bool,

    /// Print paths relative to DIR1 instead of absolute paths
    #[arg(long)]
    pub relative: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Comparison block size in bytes
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Reconcile strategy (hashed or sorted-merge)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Descend into symbolic links to directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ask for confirmation before purging
    #[arg(long)]
    pub interactive: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Selected mode, if any flag was given
    pub fn mode(&self) -> Option<ComparisonMode> {
        if self.unique {
            Some(ComparisonMode::Unique)
        } else if self.duplicate {
            Some(ComparisonMode::Duplicate)
        } else if self.purge {
            Some(ComparisonMode::Purge)
        } else {
            None
        }
    }
}
