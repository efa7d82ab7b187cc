//! Property-based tests for context ordering guarantees

use proptest::prelude::*;
use std::collections::HashSet;
use strata::{build_contexts, ContextRequest};

fn request(app: &str, suffix: &str) -> ContextRequest {
    ContextRequest {
        app_name: Some(app.to_string()),
        default_context: "application".to_string(),
        prefix: "/config".to_string(),
        profile_separator: "_".to_string(),
        suffix: suffix.to_string(),
    }
}

fn strategy() -> impl Strategy<Value = (String, Vec<String>, bool)> {
    (
        "[a-z]{1,8}",
        prop::collection::vec("[a-z0-9]{1,6}", 0..5),
        any::<bool>(),
    )
}

/// Contexts are unique and their count follows from the distinct profiles
#[test]
fn test_context_count_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&strategy(), |(app, profiles, key_listing)| {
            prop_assume!(app != "application");
            let suffix = if key_listing { "/" } else { "" };
            let contexts = build_contexts(&request(&app, suffix), &profiles);

            let distinct: HashSet<&String> = profiles.iter().collect();
            prop_assert_eq!(contexts.len(), 2 * (distinct.len() + 1));

            let unique: HashSet<&str> = contexts.iter().collect();
            prop_assert_eq!(unique.len(), contexts.len());

            for context in contexts.iter() {
                prop_assert!(context.starts_with("/config/"));
                prop_assert!(context.ends_with(suffix));
            }

            Ok(())
        })
        .unwrap();
}

/// Application contexts precede default contexts, profiled before plain
#[test]
fn test_context_priority_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&strategy(), |(app, profiles, _)| {
            prop_assume!(app != "application");
            let contexts = build_contexts(&request(&app, "/"), &profiles).to_vec();
            let half = contexts.len() / 2;

            let app_plain = format!("/config/{}/", app);
            prop_assert_eq!(&contexts[half - 1], &app_plain);
            prop_assert_eq!(contexts.last().unwrap(), "/config/application/");

            let app_prefix = format!("/config/{}_", app);
            for context in &contexts[..half - 1] {
                prop_assert!(context.starts_with(&app_prefix));
            }
            for context in &contexts[half..contexts.len() - 1] {
                prop_assert!(context.starts_with("/config/application_"));
            }

            Ok(())
        })
        .unwrap();
}

/// Same inputs always give the same contexts in the same order
#[test]
fn test_context_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&strategy(), |(app, profiles, key_listing)| {
            let suffix = if key_listing { "/" } else { "" };
            let first = build_contexts(&request(&app, suffix), &profiles);
            let second = build_contexts(&request(&app, suffix), &profiles);
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

/// When the application is the default context only the default contexts remain
#[test]
fn test_app_equal_to_default_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec("[a-z0-9]{1,6}", 0..5), |profiles| {
            let contexts = build_contexts(&request("application", "/"), &profiles);
            let distinct: HashSet<&String> = profiles.iter().collect();
            prop_assert_eq!(contexts.len(), distinct.len() + 1);
            Ok(())
        })
        .unwrap();
}
