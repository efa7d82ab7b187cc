//! Shared test utilities for integration tests
//!
//! Environment isolation for configuration loading, and a store wrapper that
//! records the order in which contexts are requested.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex};
use strata::error::StoreError;
use strata::remote::{DocumentStore, KeyListingStore, MemoryStore};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TRACKED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "STRATA_ENV",
    "STRATA_PARAMSTORE__PREFIX",
    "STRATA_PARAMSTORE__FAIL_FAST",
    "STRATA_SECRETSMANAGER__DEFAULT_CONTEXT",
];

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and the
/// given extra variables set. The original environment is restored afterwards.
///
/// The user config file lives at `<test_dir>/strata/config.toml`.
pub fn with_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = TRACKED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    for name in TRACKED_VARS {
        std::env::remove_var(name);
    }
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    result
}

/// Store wrapper that records every requested path, in call order.
#[derive(Clone)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, path: &str) {
        self.calls.lock().unwrap().push(path.to_string());
    }
}

#[async_trait]
impl KeyListingStore for RecordingStore {
    async fn list_under_prefix(&self, prefix: &str) -> Result<IndexMap<String, String>, StoreError> {
        self.record(prefix);
        self.inner.list_under_prefix(prefix).await
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get_document(&self, path: &str) -> Result<String, StoreError> {
        self.record(path);
        self.inner.get_document(path).await
    }
}
