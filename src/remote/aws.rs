//! AWS adapters: Parameter Store as a key listing, Secrets Manager as a document store.

use crate::error::StoreError;
use crate::remote::{DocumentStore, KeyListingStore};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::Client as SsmClient;
use aws_types::app_name::AppName;
use aws_types::region::Region;
use aws_types::SdkConfig;
use indexmap::IndexMap;
use tracing::debug;

const APP_NAME: &str = "strata";

/// Load shared SDK configuration. Credentials and retry policy come from the
/// SDK default chain.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region.filter(|r| !r.trim().is_empty()) {
        loader = loader.region(Region::new(region.to_string()));
    }
    if let Ok(app_name) = AppName::new(APP_NAME) {
        loader = loader.app_name(app_name);
    }
    loader.load().await
}

#[derive(Clone)]
pub struct ParameterStoreClient {
    client: SsmClient,
}

impl ParameterStoreClient {
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(shared: &SdkConfig, endpoint: Option<&str>) -> Self {
        let mut builder = aws_sdk_ssm::config::Builder::from(shared);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(SsmClient::from_conf(builder.build()))
    }
}

#[async_trait]
impl KeyListingStore for ParameterStoreClient {
    async fn list_under_prefix(&self, prefix: &str) -> Result<IndexMap<String, String>, StoreError> {
        let mut collected = IndexMap::new();
        let mut token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get_parameters_by_path()
                .path(prefix)
                .recursive(true)
                .with_decryption(true);
            if let Some(ref next) = token {
                request = request.next_token(next);
            }

            let response = request
                .send()
                .await
                .map_err(|err| map_sdk_error(prefix, err))?;

            for parameter in response.parameters() {
                if let (Some(name), Some(value)) = (parameter.name(), parameter.value()) {
                    collected.insert(name.to_string(), value.to_string());
                }
            }

            match response.next_token() {
                Some(next) if !next.is_empty() => token = Some(next.to_string()),
                _ => break,
            }
        }

        debug!(prefix, count = collected.len(), "Listed parameters");
        Ok(collected)
    }
}

#[derive(Clone)]
pub struct SecretsManagerStore {
    client: SecretsManagerClient,
}

impl SecretsManagerStore {
    pub fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(shared: &SdkConfig, endpoint: Option<&str>) -> Self {
        let mut builder = aws_sdk_secretsmanager::config::Builder::from(shared);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(SecretsManagerClient::from_conf(builder.build()))
    }
}

#[async_trait]
impl DocumentStore for SecretsManagerStore {
    async fn get_document(&self, path: &str) -> Result<String, StoreError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(path)
            .send()
            .await
            .map_err(|err| map_sdk_error(path, err))?;

        // Binary secrets carry no key/value document.
        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| StoreError::Service(format!("Secret {} has no string value", path)))
    }
}

fn map_sdk_error<E, R>(path: &str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.code() {
        Some("ResourceNotFoundException") | Some("ParameterNotFound") => {
            return StoreError::NotFound(path.to_string())
        }
        Some("AccessDeniedException") | Some("AccessDenied") => {
            return StoreError::AccessDenied(format!("{}: {}", path, err.message().unwrap_or("")))
        }
        _ => {}
    }

    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            StoreError::Transport(format!("{}: {}", path, DisplayErrorContext(&err)))
        }
        other => StoreError::Service(format!("{}: {}", path, DisplayErrorContext(&other))),
    }
}
