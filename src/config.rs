//! Configuration System
//!
//! Locator settings for each remote store, their validation, and loading of
//! the layered configuration file set. Settings can further be overridden per
//! call from the environment being configured (`aws.paramstore.*` and
//! `aws.secretsmanager.*` properties).

use crate::environment::ConfigurableEnvironment;
use crate::error::ConfigError;
use crate::fetch::NestedValuePolicy;
use crate::logging::LoggingConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

static PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/[a-zA-Z0-9.\-_]+)*$").expect("static prefix pattern"));
static SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.\-_/]+$").expect("static segment pattern"));

/// Remote store a locator reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    ParameterStore,
    SecretsManager,
}

impl StoreKind {
    pub fn default_prefix(self) -> &'static str {
        match self {
            StoreKind::ParameterStore => "/config",
            StoreKind::SecretsManager => "/secret",
        }
    }

    /// Name of the composite produced by a locator of this kind.
    pub fn composite_name(self) -> &'static str {
        match self {
            StoreKind::ParameterStore => "aws-parameter-store",
            StoreKind::SecretsManager => "aws-secrets-manager",
        }
    }

    /// Terminator of every context: parameter paths are hierarchies, secret ids are exact.
    pub fn context_suffix(self) -> &'static str {
        match self {
            StoreKind::ParameterStore => "/",
            StoreKind::SecretsManager => "",
        }
    }

    /// Namespace of environment override properties.
    pub fn property_namespace(self) -> &'static str {
        match self {
            StoreKind::ParameterStore => "aws.paramstore",
            StoreKind::SecretsManager => "aws.secretsmanager",
        }
    }
}

pub const DEFAULT_CONTEXT: &str = "application";
pub const DEFAULT_PROFILE_SEPARATOR: &str = "_";

/// Settings of one locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorSettings {
    /// Application name; falls back to the environment's `application.name`.
    #[serde(default)]
    pub name: Option<String>,

    pub prefix: String,

    pub default_context: String,

    pub profile_separator: String,

    /// Abort on the first context that cannot be fetched.
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Handling of nested document values (document stores only).
    #[serde(default)]
    pub nested: NestedValuePolicy,
}

fn default_true() -> bool {
    true
}

impl LocatorSettings {
    pub fn for_kind(kind: StoreKind) -> Self {
        Self {
            name: None,
            prefix: kind.default_prefix().to_string(),
            default_context: DEFAULT_CONTEXT.to_string(),
            profile_separator: DEFAULT_PROFILE_SEPARATOR.to_string(),
            fail_fast: false,
            enabled: true,
            nested: NestedValuePolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(invalid("prefix", "must not be empty"));
        }
        if !self.prefix.starts_with('/') {
            return Err(invalid(
                "prefix",
                format!("'{}' must start with '/'", self.prefix),
            ));
        }
        if !PREFIX_PATTERN.is_match(&self.prefix) {
            return Err(invalid(
                "prefix",
                format!(
                    "'{}' must consist of '/'-separated segments of [a-zA-Z0-9.-_]",
                    self.prefix
                ),
            ));
        }

        if self.default_context.trim().is_empty() {
            return Err(invalid("default_context", "must not be empty"));
        }
        if !SEGMENT_PATTERN.is_match(&self.default_context) {
            return Err(invalid(
                "default_context",
                format!("'{}' contains invalid characters", self.default_context),
            ));
        }

        if self.profile_separator.is_empty() {
            return Err(invalid("profile_separator", "must not be empty"));
        }
        if !SEGMENT_PATTERN.is_match(&self.profile_separator) {
            return Err(invalid(
                "profile_separator",
                format!("'{}' contains invalid characters", self.profile_separator),
            ));
        }

        Ok(())
    }

    /// Apply `<namespace>.*` overrides found in `env`. Both camelCase and
    /// snake_case property names are accepted.
    pub fn with_overrides(
        &self,
        env: &dyn ConfigurableEnvironment,
        kind: StoreKind,
    ) -> Result<Self, ConfigError> {
        let namespace = kind.property_namespace();
        let lookup = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| env.property(&format!("{}.{}", namespace, name)))
        };

        let mut settings = self.clone();
        if let Some(name) = lookup(&["name"]) {
            settings.name = Some(name);
        }
        if let Some(prefix) = lookup(&["prefix"]) {
            settings.prefix = prefix;
        }
        if let Some(default_context) = lookup(&["defaultContext", "default_context"]) {
            settings.default_context = default_context;
        }
        if let Some(separator) = lookup(&["profileSeparator", "profile_separator"]) {
            settings.profile_separator = separator;
        }
        if let Some(fail_fast) = lookup(&["failFast", "fail_fast"]) {
            settings.fail_fast = parse_bool("fail_fast", &fail_fast)?;
        }
        if let Some(enabled) = lookup(&["enabled"]) {
            settings.enabled = parse_bool("enabled", &enabled)?;
        }
        if let Some(nested) = lookup(&["nested"]) {
            settings.nested = match nested.trim().to_ascii_lowercase().as_str() {
                "flatten" => NestedValuePolicy::Flatten,
                "reject" => NestedValuePolicy::Reject,
                other => {
                    return Err(invalid(
                        "nested",
                        format!("'{}' (must be 'flatten' or 'reject')", other),
                    ))
                }
            };
        }
        Ok(settings)
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

fn parse_bool(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(invalid(field, format!("'{}' is not a boolean", other))),
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default = "default_paramstore")]
    pub paramstore: LocatorSettings,

    #[serde(default = "default_secretsmanager")]
    pub secretsmanager: LocatorSettings,

    /// AWS region override for live stores
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_paramstore() -> LocatorSettings {
    LocatorSettings::for_kind(StoreKind::ParameterStore)
}

fn default_secretsmanager() -> LocatorSettings {
    LocatorSettings::for_kind(StoreKind::SecretsManager)
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            paramstore: default_paramstore(),
            secretsmanager: default_secretsmanager(),
            region: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub error: ConfigError,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.section, self.error)
    }
}

impl std::error::Error for ValidationError {}

impl StrataConfig {
    pub fn settings(&self, kind: StoreKind) -> &LocatorSettings {
        match kind {
            StoreKind::ParameterStore => &self.paramstore,
            StoreKind::SecretsManager => &self.secretsmanager,
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            ("paramstore", &self.paramstore),
            ("secretsmanager", &self.secretsmanager),
        ]
        .into_iter()
        .filter_map(|(section, settings)| {
            settings
                .validate()
                .err()
                .map(|error| ValidationError { section, error })
        })
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
