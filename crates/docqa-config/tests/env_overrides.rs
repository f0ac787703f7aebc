//! Integration tests for TOML and environment layering.
//!
//! Uses figment::Jail for sandboxed env var and file manipulation.

use docqa_config::{DocqaConfig, StorageBackend};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

fn layered() -> Figment {
    Figment::from(Serialized::defaults(DocqaConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("DOCQA_").split("__"))
}

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://qa.example.com/api/v1"
timeout_secs = 5

[storage]
backend = "file"
credentials_path = "/tmp/docqa-creds.json"
"#,
        )?;

        let config = DocqaConfig::from_figment(layered()).expect("config loads");
        assert_eq!(config.api.base_url, "https://qa.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.keyring_service, "docqa-cli");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[api]\nbase_url = \"https://toml.example.com\"\n")?;
        jail.set_env("DOCQA_API__BASE_URL", "https://env.example.com");
        jail.set_env("DOCQA_STORAGE__BACKEND", "memory");

        let config = DocqaConfig::from_figment(layered()).expect("config loads");
        assert_eq!(config.api.base_url, "https://env.example.com");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        Ok(())
    });
}

#[test]
fn invalid_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("DOCQA_API__BASE_URL", "ftp://nope");
        let result = DocqaConfig::from_figment(layered());
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn unknown_backend_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("DOCQA_STORAGE__BACKEND", "carrier_pigeon");
        let err = DocqaConfig::from_figment(layered()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}
