//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::TreeCompareError;

/// Exit status for user errors and ordinary failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for internal consistency faults (EX_SOFTWARE)
pub const EXIT_INTERNAL: i32 = 70;

/// Map domain errors to the one-line message shown to the user.
pub fn map_error(e: &TreeCompareError) -> String {
    match e {
        TreeCompareError::SameDirectory(_) => "DIR1 and DIR2 cannot be the same!".to_string(),
        TreeCompareError::NotFound(_) => "one of the specified dirs does not exist!".to_string(),
        TreeCompareError::NotADirectory(_) => {
            "one of the specified dirs is not a directory!".to_string()
        }
        TreeCompareError::InternalConsistency { .. } => {
            format!("internal error, aborting: {}", e)
        }
        other => other.to_string(),
    }
}

/// Process exit status for an error
pub fn exit_code(e: &TreeCompareError) -> i32 {
    if e.is_internal() {
        EXIT_INTERNAL
    } else {
        EXIT_FAILURE
    }
}
