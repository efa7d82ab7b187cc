//! Contexts presentation.

use super::to_pretty_json;
use crate::context::ContextSet;
use crate::error::LocateError;
use serde_json::json;

pub fn format_contexts_text(contexts: &ContextSet) -> String {
    if contexts.is_empty() {
        return "No contexts.".to_string();
    }
    let mut lines: Vec<String> = contexts
        .iter()
        .enumerate()
        .map(|(i, context)| format!("  {}. {}", i + 1, context))
        .collect();
    lines.insert(0, "Contexts (most specific first):".to_string());
    lines.join("\n")
}

pub fn format_contexts_json(contexts: &ContextSet) -> Result<String, LocateError> {
    to_pretty_json(&json!({ "contexts": contexts.to_vec() }))
}
