use super::*;
use std::io;

#[test]
fn test_incompatible_shape_mentions_prefix_and_hint() {
    let err = ConfigError::incompatible_shape("sequential resolver", "secret", "contextual_fallible");
    let message = err.to_string();
    assert!(message.contains("'secret'"));
    assert!(message.contains("contextual_fallible"));
    assert!(message.contains("consider binding a cancellation context"));

    let err = ConfigError::incompatible_shape("sequential resolver", "env", "plain");
    assert!(!err.to_string().contains("consider"));
}

#[test]
fn test_not_found_lists_keys_and_prefixes() {
    let err = ResolutionError::not_found(&["env/FOO", "default/FOO"], vec!["env".into()]);
    assert!(err.is_not_found());
    match err {
        ResolutionError::NotFound {
            attempted_keys,
            registered_prefixes,
        } => {
            assert_eq!(attempted_keys, vec!["env/FOO", "default/FOO"]);
            assert_eq!(registered_prefixes, vec!["env"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lookup_error_keeps_source() {
    let err = ResolutionError::lookup(
        "secret/db",
        io::Error::new(io::ErrorKind::PermissionDenied, "vault sealed"),
    );
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "lookup for 'secret/db' failed: vault sealed");

    let source = std::error::Error::source(&err).expect("source is preserved");
    let io_err = source.downcast_ref::<io::Error>().expect("source is an io::Error");
    assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn test_umbrella_conversions() {
    let err: Error = ConfigError::EmptyRegistry.into();
    assert!(matches!(err, Error::Config(ConfigError::EmptyRegistry)));
    assert_eq!(err.to_string(), "no lookup function registered");

    let err: Error = ResolutionError::task_aborted("remote/x").into();
    assert!(matches!(err, Error::Resolution(ResolutionError::TaskAborted { .. })));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_result_context() {
    let result: std::result::Result<(), ConfigError> = Err(ConfigError::missing_context("concurrent resolver"));
    let err = result.context("building resolver").unwrap_err();
    assert_eq!(
        err.to_string(),
        "building resolver: concurrent resolver requires a bound cancellation context"
    );
}
