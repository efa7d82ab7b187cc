//! CLI presentation: text and json formatters per command.

mod contexts;
mod resolution;
mod validate;

pub use contexts::{format_contexts_json, format_contexts_text};
pub use resolution::{format_resolution_json, format_resolution_text};
pub use validate::format_validate_result_text;

use crate::error::LocateError;

fn to_pretty_json(value: &serde_json::Value) -> Result<String, LocateError> {
    serde_json::to_string_pretty(value).map_err(|e| LocateError::Runtime(e.to_string()))
}
