//! Integration tests for the config lifecycle: defaults, key-scoped updates,
//! backend switching and provider resolution from persisted state.

mod common;

use std::fs;

use gitcm::{Backend, Config, ConfigError, ConfigStore, ProviderError, resolve};

use common::temp_store;

#[test]
fn test_missing_file_loads_defaults() {
    let (_dir, store) = temp_store();

    let config = store.load().unwrap();

    assert_eq!(config.active_provider, "openai");
    assert_eq!(config.model("openai"), Some("gpt-4o"));
    assert_eq!(config.model("claude"), Some("claude-3-sonnet-20240229"));
    assert!(config.api_keys.values().all(String::is_empty));
}

#[test]
fn test_defaults_fail_resolution_with_key_not_configured() {
    let (_dir, store) = temp_store();

    let config = store.load().unwrap();
    let err = resolve(&config).unwrap_err();

    assert!(matches!(err, ProviderError::KeyNotConfigured { ref backend } if backend == "openai"));
    assert!(err.to_string().contains("gitcm config set-openai-key"));
}

#[test]
fn test_set_api_key_changes_only_that_key() {
    let (_dir, store) = temp_store();
    store.set_api_key(Backend::OpenAi, "sk-openai").unwrap();
    let before = store.load().unwrap();

    store.set_api_key(Backend::Claude, "sk-ant-123").unwrap();
    let after = store.load().unwrap();

    assert_eq!(after.api_key("claude"), Some("sk-ant-123"));

    let mut expected = before;
    expected
        .api_keys
        .insert("claude".to_string(), "sk-ant-123".to_string());
    assert_eq!(after, expected);
}

#[test]
fn test_set_api_key_overwrites_previous_value() {
    let (_dir, store) = temp_store();
    store.set_api_key(Backend::Claude, "old").unwrap();
    store.set_api_key(Backend::Claude, "new").unwrap();

    assert_eq!(store.load().unwrap().api_key("claude"), Some("new"));
}

#[test]
fn test_switch_backend_keeps_stored_keys() {
    let (_dir, store) = temp_store();
    store.set_api_key(Backend::OpenAi, "sk-openai").unwrap();
    store.set_api_key(Backend::Claude, "sk-ant").unwrap();

    store.set_active_backend(Backend::Claude).unwrap();
    let config = store.load().unwrap();

    assert_eq!(config.active_provider, "claude");
    assert_eq!(config.api_key("openai"), Some("sk-openai"));
    assert_eq!(config.api_key("claude"), Some("sk-ant"));
}

#[test]
fn test_switch_backend_without_key_is_allowed_until_resolution() {
    let (_dir, store) = temp_store();
    store.set_active_backend(Backend::Claude).unwrap();

    let config = store.load().unwrap();
    assert_eq!(config.active_provider, "claude");
    assert!(matches!(
        resolve(&config),
        Err(ProviderError::KeyNotConfigured { backend }) if backend == "claude"
    ));
}

#[test]
fn test_setting_a_key_alone_makes_backend_usable() {
    let (_dir, store) = temp_store();
    store.set_api_key(Backend::OpenAi, "sk-openai").unwrap();

    let provider = resolve(&store.load().unwrap()).unwrap();
    assert_eq!(provider.backend(), Backend::OpenAi);
    assert_eq!(provider.model(), "gpt-4o");
}

#[test]
fn test_preserves_hand_edited_fields() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{
  "active_provider": "claude",
  "api_keys": {"claude": "", "openai": "sk-openai"},
  "models": {"claude": "claude-sonnet-4-20250514", "openai": "gpt-4o-mini"}
}"#,
    )
    .unwrap();

    store.set_api_key(Backend::Claude, "sk-ant").unwrap();
    let config = store.load().unwrap();

    assert_eq!(config.active_provider, "claude");
    assert_eq!(config.model("claude"), Some("claude-sonnet-4-20250514"));
    assert_eq!(config.model("openai"), Some("gpt-4o-mini"));
    assert_eq!(config.api_key("openai"), Some("sk-openai"));
}

#[test]
fn test_tampered_active_provider_is_unsupported_at_resolution() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{"active_provider": "mistral", "api_keys": {"mistral": "k"}, "models": {"mistral": "large"}}"#,
    )
    .unwrap();

    let config = store.load().unwrap();
    assert!(matches!(
        resolve(&config),
        Err(ProviderError::UnsupportedBackend(name)) if name == "mistral"
    ));
}

#[test]
fn test_missing_model_entry_is_model_not_configured() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{"active_provider": "claude", "api_keys": {"claude": "sk-ant"}, "models": {"openai": "gpt-4o"}}"#,
    )
    .unwrap();

    assert!(matches!(
        resolve(&store.load().unwrap()),
        Err(ProviderError::ModelNotConfigured { backend }) if backend == "claude"
    ));
}

#[test]
fn test_corrupt_file_fails_mutation_without_overwriting() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "[1, 2").unwrap();

    let result = store.set_api_key(Backend::OpenAi, "sk");

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "[1, 2");
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_read_error() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = temp_store();
    store.persist(&Config::default()).unwrap();
    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores file permissions, so only assert when the read really fails.
    if fs::read_to_string(store.path()).is_err() {
        assert!(matches!(store.load(), Err(ConfigError::Read { .. })));
    }

    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o600)).unwrap();
}

#[test]
fn test_explicit_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    assert_eq!(ConfigStore::at(&path).path(), path);
}

#[test]
fn test_null_maps_are_recovered_on_mutation() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{"active_provider": "claude", "api_keys": null, "models": null}"#,
    )
    .unwrap();

    store.set_api_key(Backend::Claude, "sk-ant").unwrap();
    let config = store.load().unwrap();

    assert_eq!(config.active_provider, "claude");
    assert_eq!(config.api_key("claude"), Some("sk-ant"));
    assert_eq!(config.model("claude"), Some("claude-3-sonnet-20240229"));
    assert_eq!(resolve(&config).unwrap().backend(), Backend::Claude);
}
