//! Integration tests for resolution against a hierarchical key store

use super::test_utils::RecordingStore;
use std::sync::Arc;
use strata::config::{LocatorSettings, StoreKind};
use strata::environment::APPLICATION_NAME_PROPERTY;
use strata::error::LocateError;
use strata::remote::{FailureKind, MemoryStore};
use strata::{PropertySourceLocator, ResolutionStatus, StandardEnvironment};

fn billing_store() -> MemoryStore {
    MemoryStore::new()
        .with_parameter("/config/billing_prod/db/url", "jdbc:postgresql://prod/billing")
        .with_parameter("/config/billing/db/url", "jdbc:postgresql://dev/billing")
        .with_parameter("/config/billing/db/pool", "10")
        .with_parameter("/config/application_prod/feature/audit", "true")
        .with_parameter("/config/application/db/pool", "4")
        .with_parameter("/config/application/region", "eu-west-1")
        .with_parameter("/config/other/db/url", "jdbc:postgresql://other")
}

fn billing_env() -> StandardEnvironment {
    StandardEnvironment::new()
        .with_property(APPLICATION_NAME_PROPERTY, "billing")
        .with_active_profiles(["prod"])
}

#[tokio::test]
async fn test_most_specific_context_wins() {
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(billing_store()),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );

    let resolution = locator.locate(&billing_env()).await.unwrap().unwrap();
    let composite = resolution.composite();

    assert_eq!(resolution.status(), ResolutionStatus::Complete);
    assert_eq!(composite.name(), "aws-parameter-store");
    assert_eq!(
        composite.get_str("db.url").as_deref(),
        Some("jdbc:postgresql://prod/billing")
    );
    assert_eq!(composite.get_str("db.pool").as_deref(), Some("10"));
    assert_eq!(composite.get_str("feature.audit").as_deref(), Some("true"));
    assert_eq!(composite.get_str("region").as_deref(), Some("eu-west-1"));
    assert_eq!(
        composite.source_of("region").map(|source| source.name()),
        Some("/config/application/")
    );
    assert_eq!(composite.property_names().len(), 4);
}

#[tokio::test]
async fn test_contexts_fetched_in_priority_order() {
    let store = RecordingStore::new(billing_store());
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(store.clone()),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );

    locator.locate(&billing_env()).await.unwrap();

    assert_eq!(
        store.calls(),
        vec![
            "/config/billing_prod/",
            "/config/billing/",
            "/config/application_prod/",
            "/config/application/",
        ]
    );
}

#[tokio::test]
async fn test_sibling_application_keys_are_not_leaked() {
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(billing_store()),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );

    let resolution = locator.locate(&billing_env()).await.unwrap().unwrap();
    let composite = resolution.composite();
    for name in composite.property_names() {
        assert_ne!(composite.get_str(name).as_deref(), Some("jdbc:postgresql://other"));
    }
}

#[tokio::test]
async fn test_fail_soft_skips_denied_context() {
    let store = billing_store().with_failure("/config/billing/", FailureKind::AccessDenied);
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(store),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );

    let resolution = locator.locate(&billing_env()).await.unwrap().unwrap();

    assert_eq!(resolution.status(), ResolutionStatus::Partial);
    assert_eq!(resolution.skipped().len(), 1);
    assert_eq!(resolution.skipped()[0].context, "/config/billing/");
    assert_eq!(resolution.composite().get_str("db.pool").as_deref(), Some("4"));
    assert_eq!(resolution.composite().property_sources().len(), 3);

    let err = resolution.into_complete().unwrap_err();
    assert!(matches!(err, LocateError::Incomplete { ref skipped } if skipped == &["/config/billing/"]));
}

#[tokio::test]
async fn test_fail_fast_stops_at_first_failure() {
    let inner = billing_store().with_failure("/config/billing/", FailureKind::Transport);
    let store = RecordingStore::new(inner);
    let mut settings = LocatorSettings::for_kind(StoreKind::ParameterStore);
    settings.fail_fast = true;
    let locator = PropertySourceLocator::parameter_store(Arc::new(store.clone()), settings);

    let err = locator.locate(&billing_env()).await.unwrap_err();

    assert!(matches!(err, LocateError::Aborted { ref context, .. } if context == "/config/billing/"));
    assert_eq!(store.calls(), vec!["/config/billing_prod/", "/config/billing/"]);
}

#[tokio::test]
async fn test_fail_fast_enabled_through_environment() {
    let store = billing_store().with_failure("/config/application/", FailureKind::AccessDenied);
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(store),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );
    let env = billing_env().with_property("aws.paramstore.fail_fast", "true");

    let err = locator.locate(&env).await.unwrap_err();
    assert!(matches!(err, LocateError::Aborted { .. }));
}

#[tokio::test]
async fn test_prefix_override_from_environment() {
    let store = MemoryStore::new().with_parameter("/settings/application/timeout", "30");
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(store),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );
    let env = StandardEnvironment::new().with_property("aws.paramstore.prefix", "/settings");

    let resolution = locator.locate(&env).await.unwrap().unwrap();
    assert_eq!(resolution.contexts(), &["/settings/application/"]);
    assert_eq!(resolution.composite().get_str("timeout").as_deref(), Some("30"));
}

#[tokio::test]
async fn test_empty_store_resolves_to_empty_sources() {
    let locator = PropertySourceLocator::parameter_store(
        Arc::new(MemoryStore::new()),
        LocatorSettings::for_kind(StoreKind::ParameterStore),
    );

    let resolution = locator.locate(&billing_env()).await.unwrap().unwrap();
    assert_eq!(resolution.status(), ResolutionStatus::Complete);
    assert_eq!(resolution.composite().property_sources().len(), 4);
    assert!(resolution.composite().property_names().is_empty());
}
