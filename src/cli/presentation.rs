//! Presentation: render mode results as text lines or JSON lines.

use crate::api::ModeItem;
use crate::error::{Result, TreeCompareError};
use crate::tree::reconcile::PathShape;
use std::path::Path;
use std::str::FromStr;

/// Output format for results on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TreeCompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(TreeCompareError::Config(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Render one result as a single line (without the trailing newline)
///
/// Text lines carry the path's raw bytes where the platform has them, so a
/// listed name can be fed back to the shell. JSON replaces invalid UTF-8.
pub fn format_item(item: &ModeItem, shape: PathShape, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_vec(item)?),
        OutputFormat::Text => {
            let path = match shape {
                PathShape::Full => item.path(),
                PathShape::Relative => item.relative(),
            };
            Ok(path_bytes(path))
        }
    }
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.display().to_string().into_bytes()
}
