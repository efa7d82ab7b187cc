//! Merge rules: defaults, override order, conflict handling.

use crate::config::{StoreKind, DEFAULT_CONTEXT, DEFAULT_PROFILE_SEPARATOR};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with per-store defaults applied. Later sources
/// override these key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = Config::builder();
    for (section, kind) in [
        ("paramstore", StoreKind::ParameterStore),
        ("secretsmanager", StoreKind::SecretsManager),
    ] {
        builder = builder
            .set_default(format!("{}.prefix", section), kind.default_prefix())?
            .set_default(format!("{}.default_context", section), DEFAULT_CONTEXT)?
            .set_default(
                format!("{}.profile_separator", section),
                DEFAULT_PROFILE_SEPARATOR,
            )?
            .set_default(format!("{}.fail_fast", section), false)?
            .set_default(format!("{}.enabled", section), true)?;
    }
    Ok(builder)
}
