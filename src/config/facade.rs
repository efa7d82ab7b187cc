//! Config loading facade: one entry point over the layered sources.

use super::merge::merge_policy;
use super::sources::{env_vars, global_file, workspace_file};
use super::StrataConfig;
use crate::error::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest first): `STRATA_*` environment variables,
    /// `config/{STRATA_ENV}.toml`, `config/config.toml`, the user file, defaults.
    pub fn load(workspace_root: &Path) -> Result<StrataConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env_vars::add_to_builder(builder);

        let config: StrataConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file. Environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<StrataConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = env_vars::add_to_builder(builder);

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Location of the user configuration file, if one can be determined.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
