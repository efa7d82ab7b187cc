//! Property Source Fetcher
//!
//! Turns one context into one [`PropertySource`] by querying the configured
//! remote store. Two backend shapes are supported:
//!
//! - key listing: every key under the context becomes a property; the context
//!   is stripped from the key and `/` becomes `.` (`/config/app/db/url` under
//!   `/config/app/` is `db.url`)
//! - document: the JSON object stored at the context supplies the properties;
//!   nested values are flattened or rejected according to [`NestedValuePolicy`]

use crate::error::FetchError;
use crate::property::PropertySource;
use crate::remote::{DocumentStore, KeyListingStore};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// How nested objects and arrays in a document are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedValuePolicy {
    /// `{"db": {"url": ..}}` becomes `db.url`; arrays become `key[0]`, `key[1]`.
    #[default]
    Flatten,
    /// Any nested object or array makes the document malformed.
    Reject,
}

#[derive(Clone)]
pub enum PropertySourceFetcher {
    KeyListing(Arc<dyn KeyListingStore>),
    Document {
        store: Arc<dyn DocumentStore>,
        nested: NestedValuePolicy,
    },
}

impl fmt::Debug for PropertySourceFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertySourceFetcher::KeyListing(_) => f.write_str("KeyListing"),
            PropertySourceFetcher::Document { nested, .. } => {
                f.debug_struct("Document").field("nested", nested).finish()
            }
        }
    }
}

impl PropertySourceFetcher {
    pub fn key_listing(store: Arc<dyn KeyListingStore>) -> Self {
        PropertySourceFetcher::KeyListing(store)
    }

    pub fn document(store: Arc<dyn DocumentStore>, nested: NestedValuePolicy) -> Self {
        PropertySourceFetcher::Document { store, nested }
    }

    /// Fetch the property source for `context`. The source is named after the context.
    pub async fn fetch(&self, context: &str) -> Result<PropertySource, FetchError> {
        let properties = match self {
            PropertySourceFetcher::KeyListing(store) => {
                let listed = store
                    .list_under_prefix(context)
                    .await
                    .map_err(|source| FetchError::Store {
                        context: context.to_string(),
                        source,
                    })?;
                properties_from_listing(context, listed)
            }
            PropertySourceFetcher::Document { store, nested } => {
                let raw = store
                    .get_document(context)
                    .await
                    .map_err(|source| FetchError::Store {
                        context: context.to_string(),
                        source,
                    })?;
                properties_from_document(context, &raw, *nested)?
            }
        };

        debug!(context, properties = properties.len(), "Fetched property source");
        Ok(PropertySource::with_properties(context, properties))
    }
}

/// Convert a listed key to a property name relative to `context`.
pub fn property_name(context: &str, key: &str) -> String {
    let relative = key.strip_prefix(context).unwrap_or(key);
    relative.trim_start_matches('/').replace('/', ".")
}

fn properties_from_listing(
    context: &str,
    listed: IndexMap<String, String>,
) -> IndexMap<String, Value> {
    listed
        .into_iter()
        .map(|(key, value)| (property_name(context, &key), Value::String(value)))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

fn properties_from_document(
    context: &str,
    raw: &str,
    nested: NestedValuePolicy,
) -> Result<IndexMap<String, Value>, FetchError> {
    let malformed = |reason: String| FetchError::MalformedDocument {
        context: context.to_string(),
        reason,
    };

    let document: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(fields) = document else {
        return Err(malformed("document is not a JSON object".to_string()));
    };

    let mut properties = IndexMap::new();
    for (key, value) in fields {
        match (value, nested) {
            (value @ (Value::Object(_) | Value::Array(_)), NestedValuePolicy::Reject) => {
                let kind = if value.is_object() { "object" } else { "array" };
                return Err(malformed(format!("nested {} under key '{}'", kind, key)));
            }
            (value, NestedValuePolicy::Flatten) => {
                flatten_into(&mut properties, key, value).map_err(&malformed)?
            }
            (value, NestedValuePolicy::Reject) => {
                properties.insert(key, value);
            }
        }
    }
    Ok(properties)
}

/// Flatten `value` under `key`. A flattened name that is already taken is an
/// error, whichever of the two came first in the document.
fn flatten_into(
    properties: &mut IndexMap<String, Value>,
    key: String,
    value: Value,
) -> Result<(), String> {
    match value {
        Value::Object(fields) => {
            for (child, child_value) in fields {
                flatten_into(properties, format!("{}.{}", key, child), child_value)?;
            }
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                flatten_into(properties, format!("{}[{}]", key, index), item)?;
            }
        }
        scalar => {
            if properties.contains_key(&key) {
                return Err(format!("duplicate key '{}' after flattening", key));
            }
            properties.insert(key, scalar);
        }
    }
    Ok(())
}
