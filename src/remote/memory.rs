//! In-process store backing both capabilities, loadable from a JSON snapshot.

use crate::error::{ConfigError, StoreError};
use crate::remote::{DocumentStore, KeyListingStore};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Failure injected for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    NotFound,
    AccessDenied,
    Transport,
}

impl FailureKind {
    fn to_error(self, path: &str) -> StoreError {
        match self {
            FailureKind::NotFound => StoreError::NotFound(path.to_string()),
            FailureKind::AccessDenied => StoreError::AccessDenied(path.to_string()),
            FailureKind::Transport => {
                StoreError::Transport(format!("connection reset while reading {}", path))
            }
        }
    }
}

/// On-disk snapshot format.
///
/// ```json
/// {
///   "parameters": { "/config/app/db/url": "jdbc:postgresql://db/app" },
///   "documents": { "/secret/app": { "password": "s3cr3t" } },
///   "failures": { "/config/application/": "access-denied" }
/// }
/// ```
///
/// Document values may be JSON objects or raw strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub parameters: IndexMap<String, String>,
    #[serde(default)]
    pub documents: IndexMap<String, Value>,
    #[serde(default)]
    pub failures: IndexMap<String, FailureKind>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    parameters: IndexMap<String, String>,
    documents: IndexMap<String, String>,
    failures: IndexMap<String, FailureKind>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_document(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(path.into(), body.into());
        self
    }

    /// Make every lookup of exactly `path` fail with `kind`.
    pub fn with_failure(mut self, path: impl Into<String>, kind: FailureKind) -> Self {
        self.failures.insert(path.into(), kind);
        self
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let documents = snapshot
            .documents
            .into_iter()
            .map(|(path, value)| {
                let body = match value {
                    Value::String(raw) => raw,
                    other => other.to_string(),
                };
                (path, body)
            })
            .collect();

        Self {
            parameters: snapshot.parameters,
            documents,
            failures: snapshot.failures,
        }
    }

    /// Load a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Load(format!("Failed to read snapshot {}: {}", path.display(), e))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::Load(format!("Failed to parse snapshot {}: {}", path.display(), e))
        })?;
        Ok(Self::from_snapshot(snapshot))
    }

    fn check_failure(&self, path: &str) -> Result<(), StoreError> {
        match self.failures.get(path) {
            Some(kind) => Err(kind.to_error(path)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KeyListingStore for MemoryStore {
    async fn list_under_prefix(&self, prefix: &str) -> Result<IndexMap<String, String>, StoreError> {
        self.check_failure(prefix)?;
        Ok(self
            .parameters
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, path: &str) -> Result<String, StoreError> {
        self.check_failure(path)?;
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}
