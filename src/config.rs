//! Configuration System
//!
//! Settings for comparison, reconciliation, walking and logging. Built-in
//! defaults are layered under an optional, explicitly named TOML file; CLI
//! flags override both. Nothing is discovered implicitly.

use crate::content::{ContentComparator, DEFAULT_BLOCK_SIZE};
use crate::error::{Result, TreeCompareError};
use crate::logging::LoggingConfig;
use crate::tree::reconcile::{PathShape, ReconcileOptions, ReconcileStrategy};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeCompareConfig {
    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub reconcile: ReconcileConfig,

    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Content comparison settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Bytes read from each file per comparison step
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
        }
    }
}

/// Name reconciliation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub strategy: ReconcileStrategy,
}

/// Tree walking settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl TreeCompareConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.compare.block_size == 0 {
            return Err(TreeCompareError::Config(
                "compare.block_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Comparator built from the compare section
    pub fn comparator(&self) -> Result<ContentComparator> {
        ContentComparator::new(self.compare.block_size)
    }

    /// Reconciler options for the given output shape
    pub fn reconcile_options(&self, shape: PathShape) -> ReconcileOptions {
        ReconcileOptions {
            strategy: self.reconcile.strategy,
            shape,
            follow_symlinks: self.walk.follow_symlinks,
        }
    }
}
