//! Token storage settings.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "docqa-cli".to_string()
}

/// Where the access/refresh token pair is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// OS keychain, falling back to the credentials file.
    #[default]
    Keyring,
    /// Credentials file only.
    File,
    /// Process memory; tokens do not survive a restart.
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyring => "keyring",
            Self::File => "file",
            Self::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Keychain service name. Override in tests to avoid touching real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Credentials file; defaults to `~/.docqa/credentials.json`.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            keyring_service: default_keyring_service(),
            credentials_path: None,
        }
    }
}

impl StorageConfig {
    /// The configured credentials file, or the default under the home directory.
    #[must_use]
    pub fn resolved_credentials_path(&self) -> Option<PathBuf> {
        self.credentials_path
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".docqa").join("credentials.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Keyring);
        assert_eq!(config.keyring_service, "docqa-cli");
        assert!(config.credentials_path.is_none());
    }

    #[test]
    fn explicit_path_wins() {
        let config = StorageConfig {
            credentials_path: Some(PathBuf::from("/tmp/creds.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_credentials_path(),
            Some(PathBuf::from("/tmp/creds.json"))
        );
    }
}
