//! Strata: Hierarchical Configuration Resolution
//!
//! Resolves layered application configuration from remote key/value stores
//! (AWS Parameter Store, AWS Secrets Manager). For an application name, a
//! default context and the active profiles, an ordered set of lookup contexts
//! is built, each context is fetched from the store, and the results are
//! stacked into a composite view where more specific contexts win.

pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod logging;
pub mod property;
pub mod remote;
pub mod resolver;

pub use config::{LocatorSettings, StoreKind, StrataConfig};
pub use context::{build_contexts, ContextRequest, ContextSet};
pub use environment::{ConfigurableEnvironment, Environment, StandardEnvironment};
pub use error::{ConfigError, FetchError, LocateError, StoreError};
pub use fetch::{NestedValuePolicy, PropertySourceFetcher};
pub use locator::PropertySourceLocator;
pub use property::{CompositePropertySource, PropertySource};
pub use resolver::{resolve, Resolution, ResolutionStatus, SkippedContext};
