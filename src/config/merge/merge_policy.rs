//! Merge rules: built-in defaults applied beneath every other source.

use crate::content::DEFAULT_BLOCK_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("compare.block_size", DEFAULT_BLOCK_SIZE as u64)?
        .set_default("reconcile.strategy", "hashed")?
        .set_default("walk.follow_symlinks", false)
}
