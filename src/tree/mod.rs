//! Directory trees
//!
//! Root resolution, recursive file enumeration, and reconciliation of two
//! trees by relative path.

pub mod path;
pub mod reconcile;
pub mod walker;
