//! Storage abstraction for client credentials.
//!
//! The client persists exactly two secrets: the access token and the refresh
//! token. Implementations decide where they live (memory, an encrypted file).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{Error, Result};

const SERVICE_PREFIX: &str = "tunicoin_";

/// Key of the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Namespaces a secret key so several apps can share one backing store.
pub fn format_service_id(service: &str) -> String {
    if service.starts_with(SERVICE_PREFIX) {
        service.to_string()
    } else {
        format!("{}{}", SERVICE_PREFIX, service)
    }
}

pub trait SecretStore: Send + Sync {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()>;
    fn get_secret(&self, service: &str) -> Result<Option<String>>;
    fn delete_secret(&self, service: &str) -> Result<()>;
}

/// Process-local store. Used by tests and by callers that never persist.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.secrets
            .lock()
            .map_err(|_| Error::Secret("Secret store lock poisoned".into()))
    }
}

impl SecretStore for MemorySecretStore {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
        self.locked()?
            .insert(format_service_id(service), secret.to_string());
        Ok(())
    }

    fn get_secret(&self, service: &str) -> Result<Option<String>> {
        Ok(self.locked()?.get(&format_service_id(service)).cloned())
    }

    fn delete_secret(&self, service: &str) -> Result<()> {
        self.locked()?.remove(&format_service_id(service));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_service_once() {
        assert_eq!(format_service_id("access_token"), "tunicoin_access_token");
        assert_eq!(
            format_service_id("tunicoin_access_token"),
            "tunicoin_access_token"
        );
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySecretStore::new();
        assert!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().is_none());

        store.set_secret(ACCESS_TOKEN_KEY, "abc").unwrap();
        assert_eq!(
            store.get_secret(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("abc")
        );

        store.delete_secret(ACCESS_TOKEN_KEY).unwrap();
        assert!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().is_none());
    }
}
