//! Settings validation presentation.

use crate::config::{StoreKind, StrataConfig, ValidationError};

pub fn format_validate_result_text(
    config: &StrataConfig,
    result: &Result<(), Vec<ValidationError>>,
) -> String {
    match result {
        Ok(()) => {
            let mut s = "Validation passed:".to_string();
            for kind in [StoreKind::ParameterStore, StoreKind::SecretsManager] {
                let settings = config.settings(kind);
                s.push_str(&format!(
                    "\n  {}: prefix={} default_context={} separator={} fail_fast={} enabled={}",
                    kind.composite_name(),
                    settings.prefix,
                    settings.default_context,
                    settings.profile_separator,
                    settings.fail_fast,
                    settings.enabled
                ));
            }
            s
        }
        Err(errors) => {
            let mut s = format!("Validation failed ({}):", errors.len());
            for e in errors {
                s.push_str(&format!("\n  - {}", e));
            }
            s
        }
    }
}
