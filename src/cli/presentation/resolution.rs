//! Resolution presentation: effective properties with their originating context.

use super::to_pretty_json;
use crate::error::LocateError;
use crate::property::render_value;
use crate::resolver::{Resolution, ResolutionStatus};
use comfy_table::Table;
use serde_json::json;

pub fn format_resolution_text(resolution: &Resolution) -> String {
    let composite = resolution.composite();
    let mut out = format!(
        "{}: {} of {} context(s) resolved",
        composite.name(),
        composite.len(),
        resolution.contexts().len()
    );

    let names = composite.property_names();
    if names.is_empty() {
        out.push_str("\n\nNo properties.");
    } else {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Property", "Value", "Source"]);
        for name in names {
            let value = composite.get(name).map(render_value).unwrap_or_default();
            let source = composite
                .source_of(name)
                .map(|s| s.name().to_string())
                .unwrap_or_default();
            table.add_row(vec![name.to_string(), value, source]);
        }
        out.push_str("\n\n");
        out.push_str(&table.to_string());
    }

    if resolution.status() == ResolutionStatus::Partial {
        out.push_str(&format!("\n\nSkipped ({}):", resolution.skipped().len()));
        for skipped in resolution.skipped() {
            out.push_str(&format!("\n  - {}: {}", skipped.context, skipped.error));
        }
    }
    out
}

pub fn format_resolution_json(resolution: &Resolution) -> Result<String, LocateError> {
    let composite = resolution.composite();
    let sources: Vec<_> = composite
        .property_sources()
        .iter()
        .map(|source| json!({ "name": source.name(), "properties": source.len() }))
        .collect();
    let skipped: Vec<_> = resolution
        .skipped()
        .iter()
        .map(|s| json!({ "context": s.context, "error": s.error.to_string() }))
        .collect();
    let status = match resolution.status() {
        ResolutionStatus::Complete => "complete",
        ResolutionStatus::Partial => "partial",
    };

    to_pretty_json(&json!({
        "name": composite.name(),
        "status": status,
        "contexts": resolution.contexts(),
        "sources": sources,
        "skipped": skipped,
        "properties": composite.effective_properties(),
    }))
}
