//! The Persistence Port: durable key-value storage for the token pair.
//!
//! The session operations are the only callers. Implementations:
//! - [`MemoryPort`]: process memory (tests, `memory` backend)
//! - [`FilePort`]: JSON credentials file with owner-only permissions
//! - [`KeyringPort`]: OS keychain, falling back to a [`FilePort`]

mod file;
mod keyring;
mod memory;
pub(crate) mod tokens;

pub use file::FilePort;
pub use keyring::KeyringPort;
pub use memory::MemoryPort;

use thiserror::Error;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Errors raised by a [`PersistencePort`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("credentials file error ({path}): {message}")]
    File { path: String, message: String },

    #[error("corrupt credentials store: {0}")]
    Corrupt(String),
}

/// String-valued key-value storage that survives restarts.
pub trait PersistencePort: Send + Sync {
    /// Read a key. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Erase a key. Erasing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

impl<P: PersistencePort + ?Sized> PersistencePort for std::sync::Arc<P> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}

impl<P: PersistencePort + ?Sized> PersistencePort for Box<P> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
