//! Tests for the sequential resolver

use super::*;
use crate::observe::testing::RecordingObserver;
use crate::prefix::Prefix;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

fn never_found() -> LookupFunction<String> {
    LookupFunction::plain(|_| None)
}

fn key_as_value() -> LookupFunction<String> {
    LookupFunction::plain(|key| Some(key.to_string()))
}

#[test]
fn test_found_empty_value_is_success() {
    let resolver =
        SequentialResolver::try_new(Registry::new().with(Prefix::slash("default"), key_as_value()))
            .unwrap();

    assert_eq!(resolver.resolve(&["default/X"]).unwrap(), "X");
    assert_eq!(resolver.resolve(&["default/"]).unwrap(), "");
}

#[test]
fn test_later_key_wins_when_earlier_is_missing() {
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(Prefix::slash("env"), never_found())
            .with(Prefix::slash("default"), key_as_value()),
    )
    .unwrap();

    assert_eq!(resolver.resolve(&["env/FOO", "default/FOO"]).unwrap(), "FOO");
}

#[test]
fn test_first_key_wins() {
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(
                Prefix::dot("env"),
                LookupFunction::plain(|key| Some(format!("env:{key}"))),
            )
            .with(Prefix::dot("default"), key_as_value()),
    )
    .unwrap();

    assert_eq!(resolver.resolve(&["env.FOO", "default.BAR"]).unwrap(), "env:FOO");
    assert_eq!(resolver.resolve(&["default.BAR", "env.FOO"]).unwrap(), "BAR");
}

#[test]
fn test_error_short_circuits_later_keys() {
    let later_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&later_calls);
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(
                Prefix::slash("vault"),
                LookupFunction::fallible(|_| {
                    Err::<Option<String>, _>(io::Error::new(io::ErrorKind::Other, "vault sealed"))
                }),
            )
            .with(
                Prefix::slash("default"),
                LookupFunction::plain(move |key| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some(key.to_string())
                }),
            ),
    )
    .unwrap();

    let err = resolver.resolve(&["vault/token", "default/x"]).unwrap_err();
    match err {
        ResolutionError::Lookup { key, source } => {
            assert_eq!(key, "vault/token");
            assert_eq!(source.to_string(), "vault sealed");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fallible_success_and_miss() {
    let resolver = SequentialResolver::try_new(Registry::new().with(
        Prefix::slash("opt"),
        LookupFunction::fallible(|key| {
            Ok::<_, io::Error>(if key == "set" {
                Some("yes".to_string())
            } else {
                None
            })
        }),
    ))
    .unwrap();

    assert_eq!(resolver.resolve(&["opt/unset", "opt/set"]).unwrap(), "yes");
    assert!(resolver.resolve(&["opt/unset"]).unwrap_err().is_not_found());
}

#[test]
fn test_not_found_lists_keys_and_all_prefixes() {
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(Prefix::slash("env"), never_found())
            .with(Prefix::dot("secret"), never_found())
            .with(Prefix::slash("unused"), key_as_value()),
    )
    .unwrap();

    let err = resolver.resolve(&["env/A", "secret.B", "plain"]).unwrap_err();
    match err {
        ResolutionError::NotFound {
            attempted_keys,
            registered_prefixes,
        } => {
            assert_eq!(attempted_keys, vec!["env/A", "secret.B", "plain"]);
            assert_eq!(registered_prefixes, vec!["env", "secret", "unused"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_overlapping_prefixes_use_registration_order() {
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(Prefix::slash("a"), never_found())
            .with(
                Prefix::slash("a"),
                LookupFunction::plain(|_| Some("second".to_string())),
            )
            .with(
                Prefix::slash("a"),
                LookupFunction::plain(|_| Some("third".to_string())),
            ),
    )
    .unwrap();

    assert_eq!(resolver.resolve(&["a/k"]).unwrap(), "second");
}

#[test]
fn test_no_candidate_keys_is_not_found() {
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(Prefix::slash("env"), never_found())
            .with(Prefix::dot("default"), key_as_value()),
    )
    .unwrap()
    .with_fallback(FallbackPolicy::LiteralLastKey);
    let keys: [&str; 0] = [];

    match resolver.resolve(&keys) {
        Err(ResolutionError::NotFound {
            attempted_keys,
            registered_prefixes,
        }) => {
            assert!(attempted_keys.is_empty());
            assert_eq!(registered_prefixes, vec!["env", "default"]);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_try_new_rejects_invalid_registries() {
    assert_eq!(
        SequentialResolver::<String>::try_new(Registry::new()).unwrap_err(),
        ConfigError::EmptyRegistry
    );

    let err = SequentialResolver::try_new(Registry::<String>::new().with(
        Prefix::dot("secret"),
        LookupFunction::contextual(|_, _| async { Some("XXXXXXXX".to_string()) }),
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::IncompatibleFunctionShape { ref prefix, .. } if prefix == "secret"
    ));
}

#[test]
fn test_validate_is_repeatable() {
    let resolver =
        SequentialResolver::try_new(Registry::new().with(Prefix::slash("default"), key_as_value()))
            .unwrap();
    assert!(resolver.validate().is_ok());
    assert!(resolver.validate().is_ok());
}

#[test]
fn test_literal_fallback_returns_last_key() {
    let resolver = SequentialResolver::try_new(Registry::new().with(Prefix::slash("env"), never_found()))
        .unwrap()
        .with_fallback(FallbackPolicy::LiteralLastKey);

    assert_eq!(
        resolver.resolve(&["env/PORT", "8080"]).unwrap(),
        "8080"
    );
}

#[test]
fn test_literal_fallback_does_not_mask_errors() {
    let resolver = SequentialResolver::try_new(Registry::new().with(
        Prefix::slash("broken"),
        LookupFunction::fallible(|_| Err::<Option<String>, _>("backend unavailable")),
    ))
    .unwrap()
    .with_fallback(FallbackPolicy::LiteralLastKey);

    assert!(matches!(
        resolver.resolve(&["broken/x", "literal"]),
        Err(ResolutionError::Lookup { .. })
    ));
}

#[test]
fn test_observer_receives_events() {
    let observer = Arc::new(RecordingObserver::default());
    let resolver = SequentialResolver::try_new(
        Registry::new()
            .with(Prefix::slash("env"), never_found())
            .with(Prefix::slash("default"), key_as_value()),
    )
    .unwrap()
    .with_observer(observer.clone());

    resolver.resolve(&["env/FOO", "default/FOO"]).unwrap();
    assert_eq!(
        observer.snapshot(),
        vec![
            "started env/FOO",
            "settled env/FOO Missing",
            "started default/FOO",
            "settled default/FOO Found",
        ]
    );
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(Registry::new().with(Prefix::slash("default"), key_as_value()));
    let resolver = SequentialResolver::try_new(Arc::clone(&registry)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = resolver.clone();
            std::thread::spawn(move || resolver.resolve(&[format!("default/{i}")]).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
    assert_eq!(Arc::strong_count(&registry), 2);
}
