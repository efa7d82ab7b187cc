//! Property sources
//!
//! A [`PropertySource`] is a named, ordered key/value mapping fetched from one
//! context. A [`CompositePropertySource`] stacks several of them; lookups scan
//! the stack in order and return the first hit.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named, ordered mapping from property name to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySource {
    name: String,
    properties: IndexMap<String, Value>,
}

impl PropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_properties(name: impl Into<String>, properties: IndexMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a property, replacing any previous value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Ordered stack of property sources with first-match-wins lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositePropertySource {
    name: String,
    sources: Vec<PropertySource>,
}

impl CompositePropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a source with lower precedence than everything already present.
    pub fn add_property_source(&mut self, source: PropertySource) {
        self.sources.push(source);
    }

    /// Insert a source ahead of everything already present.
    pub fn add_first_property_source(&mut self, source: PropertySource) {
        self.sources.insert(0, source);
    }

    pub fn property_sources(&self) -> &[PropertySource] {
        &self.sources
    }

    /// Find the source a key resolves from.
    pub fn source_of(&self, key: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|source| source.contains(key))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    /// Value rendered as a string. Strings come back unquoted; other scalars
    /// use their JSON form.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(render_value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.source_of(key).is_some()
    }

    /// Union of property names across sources, in first-seen order.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names = IndexSet::new();
        for source in &self.sources {
            for name in source.property_names() {
                names.insert(name);
            }
        }
        names.into_iter().collect()
    }

    /// Effective key/value view after precedence is applied.
    pub fn effective_properties(&self) -> IndexMap<String, Value> {
        let mut effective = IndexMap::new();
        for source in &self.sources {
            for (key, value) in source.iter() {
                effective
                    .entry(key.to_string())
                    .or_insert_with(|| value.clone());
            }
        }
        effective
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
