use keyring::Entry;
use keyring::credential::{CredentialBuilder, CredentialBuilderApi, CredentialPersistence};

use super::{FilePort, PersistenceError, PersistencePort};

/// OS keychain storage, one entry per key under a shared service name.
///
/// The keychain is only used when its store outlives the process. Stores that
/// keep secrets per entry or per process (keyring's mock store, which is what
/// gets compiled in when the target has no native backend) count as
/// unavailable. Unavailable or failing keychains hand reads and writes to the
/// configured [`FilePort`].
#[derive(Debug)]
pub struct KeyringPort {
    service: String,
    store: Box<CredentialBuilder>,
    fallback: Option<FilePort>,
}

impl KeyringPort {
    /// A port over the platform's default credential store.
    pub fn new(service: impl Into<String>, fallback: Option<FilePort>) -> Self {
        Self::with_store(
            keyring::default::default_credential_builder(),
            service,
            fallback,
        )
    }

    /// A port over an explicit credential store.
    pub fn with_store(
        store: Box<CredentialBuilder>,
        service: impl Into<String>,
        fallback: Option<FilePort>,
    ) -> Self {
        let port = Self {
            service: service.into(),
            store,
            fallback,
        };
        if !port.keychain_persists() {
            tracing::debug!(
                service = %port.service,
                "credential store does not persist across runs; using credentials file"
            );
        }
        port
    }

    fn keychain_persists(&self) -> bool {
        !matches!(
            self.store.persistence(),
            CredentialPersistence::EntryOnly | CredentialPersistence::ProcessOnly
        )
    }

    /// The keychain entry for `key`; `None` when the store cannot persist.
    fn entry(&self, key: &str) -> Option<Result<Entry, keyring::Error>> {
        self.keychain_persists().then(|| {
            self.store
                .build(None, &self.service, key)
                .map(Entry::new_with_credential)
        })
    }

    fn fallback_or(&self, error: impl ToString) -> Result<&FilePort, PersistenceError> {
        self.fallback
            .as_ref()
            .ok_or_else(|| PersistenceError::Keyring(error.to_string()))
    }
}

impl PersistencePort for KeyringPort {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let keychain = match self.entry(key) {
            Some(entry) => entry.and_then(|entry| entry.get_password()),
            None => Err(keyring::Error::NoEntry),
        };
        match keychain {
            Ok(value) if !value.is_empty() => Ok(Some(value)),
            Ok(_) | Err(keyring::Error::NoEntry) => match &self.fallback {
                Some(file) => file.get(key),
                None => Ok(None),
            },
            Err(error) => {
                tracing::debug!(%error, key, "keyring read failed; trying file");
                self.fallback_or(error)?.get(key)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let Some(entry) = self.entry(key) else {
            let reason = format!("credential store for {} does not persist", self.service);
            return self.fallback_or(reason)?.set(key, value);
        };
        match entry.and_then(|entry| entry.set_password(value)) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, key, "keyring store failed; falling back to file");
                self.fallback_or(error)?.set(key, value)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        // Both tiers are cleared so a fallback copy cannot resurrect the key.
        let keychain = match self.entry(key) {
            None => Ok(()),
            Some(entry) => match entry.and_then(|entry| entry.delete_credential()) {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(error) => Err(error),
            },
        };
        match (&self.fallback, keychain) {
            (Some(file), Ok(())) => file.remove(key),
            (Some(file), Err(error)) => {
                tracing::warn!(%error, key, "keyring delete failed; clearing file copy only");
                file.remove(key)
            }
            (None, Ok(())) => Ok(()),
            (None, Err(error)) => Err(PersistenceError::Keyring(error.to_string())),
        }
    }
}
