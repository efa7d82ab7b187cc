//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::LocateError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &LocateError) -> String {
    match e {
        LocateError::Aborted { context, .. } => format!(
            "{}\nhint: context '{}' could not be resolved; rerun without --fail-fast to skip it",
            e, context
        ),
        _ => e.to_string(),
    }
}
