//! Composite Resolver
//!
//! Fetches each context in priority order and stacks the results into a
//! [`CompositePropertySource`]. Fetch failures either abort the call
//! (fail-fast) or are recorded and skipped (fail-soft).

use crate::context::ContextSet;
use crate::error::{FetchError, LocateError};
use crate::fetch::PropertySourceFetcher;
use crate::property::CompositePropertySource;
use tracing::{debug, error, info, warn};

/// A context that was skipped during fail-soft resolution.
#[derive(Debug)]
pub struct SkippedContext {
    pub context: String,
    pub error: FetchError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// Every context was fetched.
    Complete,
    /// At least one context was skipped.
    Partial,
}

/// Outcome of a resolution call that was not aborted.
#[derive(Debug)]
pub struct Resolution {
    composite: CompositePropertySource,
    contexts: Vec<String>,
    skipped: Vec<SkippedContext>,
}

impl Resolution {
    pub fn status(&self) -> ResolutionStatus {
        if self.skipped.is_empty() {
            ResolutionStatus::Complete
        } else {
            ResolutionStatus::Partial
        }
    }

    pub fn composite(&self) -> &CompositePropertySource {
        &self.composite
    }

    /// Contexts attempted, in priority order.
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    pub fn skipped(&self) -> &[SkippedContext] {
        &self.skipped
    }

    /// `LocateError::Incomplete` naming every skipped context, if any.
    pub fn ensure_complete(&self) -> Result<(), LocateError> {
        if self.skipped.is_empty() {
            Ok(())
        } else {
            Err(LocateError::Incomplete {
                skipped: self.skipped.iter().map(|s| s.context.clone()).collect(),
            })
        }
    }

    /// Treat a partial resolution as an error.
    pub fn into_complete(self) -> Result<CompositePropertySource, LocateError> {
        self.ensure_complete()?;
        Ok(self.composite)
    }
}

/// Resolve `contexts` into a composite named `name`.
///
/// Contexts are fetched sequentially so that with `fail_fast` the reported
/// error is always the first failing context in priority order.
pub async fn resolve(
    name: &str,
    contexts: &ContextSet,
    fetcher: &PropertySourceFetcher,
    fail_fast: bool,
) -> Result<Resolution, LocateError> {
    let mut composite = CompositePropertySource::new(name);
    let mut skipped = Vec::new();

    for context in contexts.iter() {
        debug!(composite = name, context, "Resolving context");
        match fetcher.fetch(context).await {
            Ok(source) => composite.add_property_source(source),
            Err(err) if fail_fast => {
                error!(
                    composite = name,
                    context,
                    error = %err,
                    "Fail fast is set and there was an error reading configuration"
                );
                return Err(LocateError::Aborted {
                    context: context.to_string(),
                    source: err,
                });
            }
            Err(err) => {
                warn!(composite = name, context, error = %err, "Unable to load configuration, skipping context");
                skipped.push(SkippedContext {
                    context: context.to_string(),
                    error: err,
                });
            }
        }
    }

    info!(
        composite = name,
        resolved = composite.len(),
        skipped = skipped.len(),
        "Resolved property sources"
    );

    Ok(Resolution {
        composite,
        contexts: contexts.to_vec(),
        skipped,
    })
}
