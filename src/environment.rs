//! Environment surface consumed by the locator.
//!
//! Locators read the application name, active profiles and override
//! properties from a [`ConfigurableEnvironment`], and the located composite is
//! merged back with the highest precedence.

use crate::property::{render_value, CompositePropertySource};
use indexmap::IndexMap;

/// Property holding the application name when none is configured on the locator.
pub const APPLICATION_NAME_PROPERTY: &str = "application.name";

/// Any environment handed to a locator.
pub trait Environment {
    /// The configurable view, or `None` if this environment cannot be configured.
    fn as_configurable(&self) -> Option<&dyn ConfigurableEnvironment>;
}

pub trait ConfigurableEnvironment {
    fn property(&self, key: &str) -> Option<String>;

    /// Active profiles in activation order.
    fn active_profiles(&self) -> Vec<String>;
}

/// Plain properties plus a stack of located composites.
#[derive(Debug, Clone, Default)]
pub struct StandardEnvironment {
    properties: IndexMap<String, String>,
    active_profiles: Vec<String>,
    located: Vec<CompositePropertySource>,
}

impl StandardEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn with_active_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_active_profiles(profiles);
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn set_active_profiles<I, S>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_profiles = profiles.into_iter().map(Into::into).collect();
    }

    /// Merge a located composite ahead of everything already present.
    pub fn add_first(&mut self, composite: CompositePropertySource) {
        self.located.insert(0, composite);
    }

    pub fn located(&self) -> &[CompositePropertySource] {
        &self.located
    }
}

impl Environment for StandardEnvironment {
    fn as_configurable(&self) -> Option<&dyn ConfigurableEnvironment> {
        Some(self)
    }
}

impl ConfigurableEnvironment for StandardEnvironment {
    fn property(&self, key: &str) -> Option<String> {
        self.located
            .iter()
            .find_map(|composite| composite.get(key).map(render_value))
            .or_else(|| self.properties.get(key).cloned())
    }

    fn active_profiles(&self) -> Vec<String> {
        self.active_profiles.clone()
    }
}
