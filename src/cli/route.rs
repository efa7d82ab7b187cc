//! CLI route: single route table and run context. Dispatches to the locator and presentation.

use crate::cli::command_name;
use crate::cli::parse::{Commands, SourceArgs, TargetArgs};
use crate::cli::presentation::{
    format_contexts_json, format_contexts_text, format_resolution_json, format_resolution_text,
    format_validate_result_text,
};
use crate::config::{ConfigLoader, LocatorSettings, StoreKind, StrataConfig};
use crate::environment::StandardEnvironment;
use crate::error::{ConfigError, LocateError};
use crate::locator::PropertySourceLocator;
use crate::remote::{DocumentStore, KeyListingStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: StrataConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, LocateError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn from_config(workspace_root: PathBuf, config: StrataConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, LocateError> {
        info!(
            command = command_name(command),
            workspace = %self.workspace_root.display(),
            "Executing command"
        );
        match command {
            Commands::Contexts { target, format } => {
                let env = build_environment(target, false)?;
                // Contexts never touch the store.
                let locator = self.locator(target, Arc::new(MemoryStore::new()));
                let contexts = locator.contexts(&env)?;
                if format == "json" {
                    format_contexts_json(&contexts)
                } else {
                    Ok(format_contexts_text(&contexts))
                }
            }
            Commands::Locate {
                target,
                source,
                fail_fast,
                require_complete,
                format,
            } => {
                let env = build_environment(target, *fail_fast)?;
                let runtime = tokio::runtime::Runtime::new()
                    .map_err(|e| LocateError::Runtime(format!("Failed to create runtime: {}", e)))?;
                let resolution = runtime.block_on(async {
                    let locator = self.live_locator(target, source).await?;
                    locator.locate(&env).await
                })?;

                let Some(resolution) = resolution else {
                    return Ok(format!(
                        "{} is disabled",
                        StoreKind::from(target.store).composite_name()
                    ));
                };
                let output = if format == "json" {
                    format_resolution_json(&resolution)?
                } else {
                    format_resolution_text(&resolution)
                };
                if *require_complete {
                    resolution.ensure_complete()?;
                }
                Ok(output)
            }
            Commands::Validate => {
                let result = self.config.validate();
                let text = format_validate_result_text(&self.config, &result);
                match result {
                    Ok(()) => Ok(text),
                    Err(_) => Err(ConfigError::Validation(text).into()),
                }
            }
        }
    }

    /// Configured settings for the target store with `--name` applied.
    fn settings_for(&self, target: &TargetArgs) -> LocatorSettings {
        let mut settings = self.config.settings(target.store.into()).clone();
        if target.name.is_some() {
            settings.name = target.name.clone();
        }
        settings
    }

    fn locator<S>(&self, target: &TargetArgs, store: Arc<S>) -> PropertySourceLocator
    where
        S: KeyListingStore + DocumentStore + 'static,
    {
        let settings = self.settings_for(target);
        match StoreKind::from(target.store) {
            StoreKind::ParameterStore => PropertySourceLocator::parameter_store(store, settings),
            StoreKind::SecretsManager => PropertySourceLocator::secrets_manager(store, settings),
        }
    }

    async fn live_locator(
        &self,
        target: &TargetArgs,
        source: &SourceArgs,
    ) -> Result<PropertySourceLocator, LocateError> {
        if let Some(ref snapshot) = source.snapshot {
            let store = Arc::new(MemoryStore::load(snapshot)?);
            return Ok(self.locator(target, store));
        }
        if source.aws {
            return self.aws_locator(target, source).await;
        }
        Err(ConfigError::Load("either --snapshot <FILE> or --aws is required".to_string()).into())
    }

    #[cfg(feature = "aws")]
    async fn aws_locator(
        &self,
        target: &TargetArgs,
        source: &SourceArgs,
    ) -> Result<PropertySourceLocator, LocateError> {
        use crate::remote::aws::{load_sdk_config, ParameterStoreClient, SecretsManagerStore};

        let kind = StoreKind::from(target.store);
        let region = source.region.as_deref().or(self.config.region.as_deref());
        let shared = load_sdk_config(region).await;
        let endpoint = source.endpoint.as_deref();
        let settings = self.settings_for(target);

        Ok(match kind {
            StoreKind::ParameterStore => PropertySourceLocator::parameter_store(
                Arc::new(ParameterStoreClient::from_sdk_config(&shared, endpoint)),
                settings,
            ),
            StoreKind::SecretsManager => PropertySourceLocator::secrets_manager(
                Arc::new(SecretsManagerStore::from_sdk_config(&shared, endpoint)),
                settings,
            ),
        })
    }

    #[cfg(not(feature = "aws"))]
    async fn aws_locator(
        &self,
        _target: &TargetArgs,
        _source: &SourceArgs,
    ) -> Result<PropertySourceLocator, LocateError> {
        Err(ConfigError::Load("strata was built without the `aws` feature".to_string()).into())
    }
}

/// Environment for one command: active profiles, `--set` entries, then
/// `--fail-fast` as `<namespace>.failFast=true`. The flag is applied last so
/// it wins over any `--set` for the same setting.
fn build_environment(target: &TargetArgs, fail_fast: bool) -> Result<StandardEnvironment, LocateError> {
    let mut env = StandardEnvironment::new().with_active_profiles(target.profiles.iter().cloned());
    for entry in &target.properties {
        let (key, value) = entry.split_once('=').ok_or_else(|| ConfigError::Invalid {
            field: "set",
            message: format!("'{}' (expected KEY=VALUE)", entry),
        })?;
        env.set_property(key.trim(), value.trim());
    }
    if fail_fast {
        let namespace = StoreKind::from(target.store).property_namespace();
        // failFast is looked up before fail_fast.
        env.set_property(format!("{}.failFast", namespace), "true");
    }
    Ok(env)
}
