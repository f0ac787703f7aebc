use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::{PersistenceError, PersistencePort};

/// In-memory port. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryPort {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryPort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A port pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Copy of everything currently stored.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PersistencePort for MemoryPort {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_cycle() {
        let port = MemoryPort::new();
        assert_eq!(port.get("k").unwrap(), None);
        port.set("k", "v").unwrap();
        assert_eq!(port.get("k").unwrap().as_deref(), Some("v"));
        port.remove("k").unwrap();
        port.remove("k").unwrap();
        assert!(port.entries().is_empty());
    }
}
