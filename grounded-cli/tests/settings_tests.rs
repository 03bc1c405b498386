//! Tests for environment settings.

use std::collections::HashMap;

use grounded_cli::Settings;
use grounded_cli::settings::{DEFAULT_COLLECTION, DEFAULT_DATABASE_URL, SettingsError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn api_key_is_required() {
    let result = Settings::from_lookup(lookup(&[]));
    assert_eq!(result, Err(SettingsError::Missing("OPENAI_API_KEY")));
}

#[test]
fn blank_api_key_counts_as_missing() {
    let result = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")]));
    assert_eq!(result, Err(SettingsError::Missing("OPENAI_API_KEY")));
}

#[test]
fn defaults_fill_optional_values() {
    let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
    assert_eq!(settings.openai_api_key, "sk-test");
    assert_eq!(settings.openai_base_url, None);
    assert_eq!(settings.chat_model, "gpt-4o-mini");
    assert_eq!(settings.embedding_model, "text-embedding-3-large");
    assert_eq!(settings.embedding_dimensions, None);
    assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(settings.collection, DEFAULT_COLLECTION);
}

#[test]
fn overrides_are_read() {
    let settings = Settings::from_lookup(lookup(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
        ("GROUNDED_CHAT_MODEL", "llama3"),
        ("GROUNDED_EMBEDDING_MODEL", "nomic-embed-text"),
        ("GROUNDED_EMBEDDING_DIMENSIONS", "768"),
        ("DATABASE_URL", "postgres://app:pw@db:5432/app"),
        ("GROUNDED_COLLECTION", "notes"),
    ]))
    .unwrap();
    assert_eq!(settings.openai_base_url.as_deref(), Some("http://localhost:11434/v1"));
    assert_eq!(settings.chat_model, "llama3");
    assert_eq!(settings.embedding_model, "nomic-embed-text");
    assert_eq!(settings.embedding_dimensions, Some(768));
    assert_eq!(settings.database_url, "postgres://app:pw@db:5432/app");
    assert_eq!(settings.collection, "notes");
}

#[test]
fn embedding_dimensions_must_be_a_positive_number() {
    for value in ["0", "large", "-1"] {
        let result = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("GROUNDED_EMBEDDING_DIMENSIONS", value),
        ]));
        assert!(
            matches!(
                result,
                Err(SettingsError::Invalid { name: "GROUNDED_EMBEDDING_DIMENSIONS", .. })
            ),
            "{value} was accepted"
        );
    }
}

#[test]
fn debug_output_hides_secrets() {
    let settings = Settings::from_lookup(lookup(&[
        ("OPENAI_API_KEY", "sk-very-secret"),
        ("DATABASE_URL", "postgres://app:hunter2@db:5432/app"),
    ]))
    .unwrap();
    let debug = format!("{settings:?}");
    assert!(!debug.contains("sk-very-secret"));
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("postgres://app:***@db:5432/app"));
}
