//! PropertySourceLocator
//!
//! Entry point tying the pieces together: reads the application name, active
//! profiles and overrides from the environment, builds the contexts for this
//! call and resolves them against the configured store.

use crate::config::{LocatorSettings, StoreKind};
use crate::context::{build_contexts, ContextRequest, ContextSet};
use crate::environment::{
    ConfigurableEnvironment, Environment, StandardEnvironment, APPLICATION_NAME_PROPERTY,
};
use crate::error::LocateError;
use crate::fetch::PropertySourceFetcher;
use crate::remote::{DocumentStore, KeyListingStore};
use crate::resolver::{resolve, Resolution};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PropertySourceLocator {
    kind: StoreKind,
    settings: LocatorSettings,
    fetcher: PropertySourceFetcher,
}

impl PropertySourceLocator {
    /// Locator over a hierarchical key store such as AWS Parameter Store.
    pub fn parameter_store(store: Arc<dyn KeyListingStore>, settings: LocatorSettings) -> Self {
        Self {
            kind: StoreKind::ParameterStore,
            settings,
            fetcher: PropertySourceFetcher::key_listing(store),
        }
    }

    /// Locator over a document store such as AWS Secrets Manager.
    pub fn secrets_manager(store: Arc<dyn DocumentStore>, settings: LocatorSettings) -> Self {
        let nested = settings.nested;
        Self {
            kind: StoreKind::SecretsManager,
            settings,
            fetcher: PropertySourceFetcher::document(store, nested),
        }
    }

    /// Settings after environment overrides, validated.
    pub fn effective_settings(
        &self,
        env: &dyn ConfigurableEnvironment,
    ) -> Result<LocatorSettings, LocateError> {
        let settings = self.settings.with_overrides(env, self.kind)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Contexts this locator would query for `env`, most specific first.
    pub fn contexts(&self, env: &dyn ConfigurableEnvironment) -> Result<ContextSet, LocateError> {
        let settings = self.effective_settings(env)?;
        Ok(self.contexts_for(&settings, env))
    }

    fn contexts_for(
        &self,
        settings: &LocatorSettings,
        env: &dyn ConfigurableEnvironment,
    ) -> ContextSet {
        let app_name = settings
            .name
            .clone()
            .or_else(|| env.property(APPLICATION_NAME_PROPERTY));
        let request = ContextRequest {
            app_name,
            default_context: settings.default_context.clone(),
            prefix: settings.prefix.clone(),
            profile_separator: settings.profile_separator.clone(),
            suffix: self.kind.context_suffix().to_string(),
        };
        build_contexts(&request, &env.active_profiles())
    }

    /// Resolve configuration for `environment`.
    ///
    /// Returns `Ok(None)` when the environment is not configurable or the
    /// locator is disabled. Contexts are computed fresh on every call.
    pub async fn locate(
        &self,
        environment: &dyn Environment,
    ) -> Result<Option<Resolution>, LocateError> {
        let Some(env) = environment.as_configurable() else {
            debug!(kind = ?self.kind, "Environment is not configurable, nothing to locate");
            return Ok(None);
        };

        let settings = self.effective_settings(env)?;
        if !settings.enabled {
            info!(kind = ?self.kind, "Locator disabled");
            return Ok(None);
        }

        let contexts = self.contexts_for(&settings, env);
        debug!(kind = ?self.kind, contexts = ?contexts.to_vec(), "Built contexts");

        // Overrides may change the nested policy of a document fetcher.
        let fetcher = match &self.fetcher {
            PropertySourceFetcher::Document { store, nested } if *nested != settings.nested => {
                PropertySourceFetcher::document(Arc::clone(store), settings.nested)
            }
            other => other.clone(),
        };

        resolve(
            self.kind.composite_name(),
            &contexts,
            &fetcher,
            settings.fail_fast,
        )
        .await
        .map(Some)
    }

    /// Locate and merge the composite into `env` with the highest precedence.
    pub async fn locate_into(
        &self,
        env: &mut StandardEnvironment,
    ) -> Result<Option<Resolution>, LocateError> {
        let resolution = self.locate(&*env).await?;
        if let Some(ref resolution) = resolution {
            env.add_first(resolution.composite().clone());
        }
        Ok(resolution)
    }
}
