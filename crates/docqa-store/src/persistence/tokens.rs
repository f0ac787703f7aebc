//! Token-pair helpers over a [`PersistencePort`].
//!
//! Both keys are written and erased together. A half-written pair is rolled
//! back to whatever was stored before the write started.

use docqa_core::responses::TokenPair;

use super::{ACCESS_TOKEN_KEY, PersistenceError, PersistencePort, REFRESH_TOKEN_KEY};

/// Load the stored pair.
///
/// A lone key (one token without the other) is treated as no session: it is
/// logged, erased, and `None` is returned. Read failures are logged and also
/// yield `None`.
pub(crate) fn load(port: &impl PersistencePort) -> Option<TokenPair> {
    let access = read(port, ACCESS_TOKEN_KEY);
    let refresh = read(port, REFRESH_TOKEN_KEY);
    match (access, refresh) {
        (Some(access), Some(refresh)) => Some(TokenPair { access, refresh }),
        (None, None) => None,
        (access, _) => {
            let present = if access.is_some() {
                ACCESS_TOKEN_KEY
            } else {
                REFRESH_TOKEN_KEY
            };
            tracing::warn!(present, "discarding incomplete stored token pair");
            if let Err(error) = erase(port) {
                tracing::warn!(%error, "failed to erase incomplete token pair");
            }
            None
        }
    }
}

/// Write both tokens, restoring the previous contents if either write fails.
pub(crate) fn save(port: &impl PersistencePort, pair: &TokenPair) -> Result<(), PersistenceError> {
    let previous_access = port.get(ACCESS_TOKEN_KEY)?;
    let previous_refresh = port.get(REFRESH_TOKEN_KEY)?;

    let written = port
        .set(ACCESS_TOKEN_KEY, &pair.access)
        .and_then(|()| port.set(REFRESH_TOKEN_KEY, &pair.refresh));

    if let Err(error) = written {
        restore(port, ACCESS_TOKEN_KEY, previous_access.as_deref());
        restore(port, REFRESH_TOKEN_KEY, previous_refresh.as_deref());
        return Err(error);
    }
    Ok(())
}

/// Erase both keys. Both removals are attempted; the first failure is returned.
pub(crate) fn erase(port: &impl PersistencePort) -> Result<(), PersistenceError> {
    let access = port.remove(ACCESS_TOKEN_KEY);
    let refresh = port.remove(REFRESH_TOKEN_KEY);
    access.and(refresh)
}

fn read(port: &impl PersistencePort, key: &str) -> Option<String> {
    match port.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(error) => {
            tracing::warn!(%error, key, "failed to read stored token");
            None
        }
    }
}

fn restore(port: &impl PersistencePort, key: &str, previous: Option<&str>) {
    let result = match previous {
        Some(value) => port.set(key, value),
        None => port.remove(key),
    };
    if let Err(error) = result {
        tracing::warn!(%error, key, "failed to roll back token write");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPort;
    use crate::test_support::FlakyPort;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_then_load() {
        let port = MemoryPort::new();
        save(&port, &TokenPair::new("T1", "R1")).unwrap();
        assert_eq!(load(&port), Some(TokenPair::new("T1", "R1")));
    }

    #[test]
    fn lone_access_token_is_discarded() {
        let port = MemoryPort::with_entries([(ACCESS_TOKEN_KEY, "T1")]);
        assert_eq!(load(&port), None);
        assert!(port.entries().is_empty());
    }

    #[test]
    fn lone_refresh_token_is_discarded() {
        let port = MemoryPort::with_entries([(REFRESH_TOKEN_KEY, "R1")]);
        assert_eq!(load(&port), None);
        assert!(port.entries().is_empty());
    }

    #[test]
    fn failed_save_restores_previous_pair() {
        let port = FlakyPort::new();
        save(&port, &TokenPair::new("T1", "R1")).unwrap();

        port.fail_writes_to(REFRESH_TOKEN_KEY);
        assert!(save(&port, &TokenPair::new("T2", "R2")).is_err());

        port.heal();
        assert_eq!(load(&port), Some(TokenPair::new("T1", "R1")));
    }

    #[test]
    fn failed_first_save_leaves_store_empty() {
        let port = FlakyPort::new();
        port.fail_writes_to(REFRESH_TOKEN_KEY);
        assert!(save(&port, &TokenPair::new("T1", "R1")).is_err());
        port.heal();
        assert_eq!(load(&port), None);
        assert!(port.inner().entries().is_empty());
    }

    #[test]
    fn erase_is_idempotent() {
        let port = MemoryPort::new();
        save(&port, &TokenPair::new("T1", "R1")).unwrap();
        erase(&port).unwrap();
        erase(&port).unwrap();
        assert!(port.entries().is_empty());
    }
}
