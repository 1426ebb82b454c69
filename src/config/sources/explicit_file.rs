//! Explicit config file source: the path given with `--config`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Add the file at `path` to the builder. The file must exist; its format is
/// inferred from the extension.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).required(true)))
}
