//! Remote store capabilities
//!
//! The resolver never talks to a cloud API directly. It asks one of two
//! capabilities for data: a hierarchical key listing (Parameter Store shape)
//! or a single document fetch (Secrets Manager shape). Implementations own
//! their transport, credentials, retries and timeouts.

use crate::error::StoreError;
use async_trait::async_trait;
use indexmap::IndexMap;

#[cfg(feature = "aws")]
pub mod aws;
pub mod memory;

pub use memory::{FailureKind, MemoryStore, StoreSnapshot};

/// Store that lists every key under a path prefix.
#[async_trait]
pub trait KeyListingStore: Send + Sync {
    /// Return full key paths and their values for every key under `prefix`.
    /// An empty map means nothing is stored there.
    async fn list_under_prefix(&self, prefix: &str) -> Result<IndexMap<String, String>, StoreError>;
}

/// Store that returns one raw document per exact path.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return the raw document stored at `path`.
    async fn get_document(&self, path: &str) -> Result<String, StoreError>;
}
