//! ConfigLoader facade: defaults, then an optional explicit file.

use super::merge::merge_policy;
use super::sources::explicit_file;
use super::TreeCompareConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, layering `path` over the built-in defaults.
    /// No file is searched for implicitly.
    pub fn load(path: Option<&Path>) -> Result<TreeCompareConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = match path {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TreeCompareConfig, ConfigError> {
        Self::load(Some(path))
    }
}
