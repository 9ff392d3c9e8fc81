//! Explicit sign-in session backed by a [`SecretStore`].
//!
//! The session owns the two persisted tokens. It starts on login or sign-up,
//! can be restored at start-up from a stored access token, and ends on
//! logout or when a refresh fails. Observers follow it through a watch
//! channel instead of polling storage.

use log::{debug, info};
use std::sync::Arc;
use tokio::sync::watch;

use tunicoin_core::auth::TokenPair;
use tunicoin_core::errors::Result;
use tunicoin_core::secrets::{SecretStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedOut,
    SignedIn,
    /// Refresh failed; the user has to sign in again.
    Expired,
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SecretStore>,
    events: Arc<watch::Sender<SessionEvent>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A signed-out session over `store`. Stored tokens are left untouched.
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        let (tx, _rx) = watch::channel(SessionEvent::SignedOut);
        Self {
            store,
            events: Arc::new(tx),
        }
    }

    /// Resumes a previous session when an access token is stored.
    pub fn restore(store: Arc<dyn SecretStore>) -> Result<Self> {
        let session = Self::new(store);
        if session.access_token()?.is_some() {
            debug!("[Session] Restored stored session");
            session.events.send_replace(SessionEvent::SignedIn);
        }
        Ok(session)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> SessionEvent {
        *self.events.borrow()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state() == SessionEvent::SignedIn
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        self.store.get_secret(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        self.store.get_secret(REFRESH_TOKEN_KEY)
    }

    /// Persists a freshly issued token pair.
    pub fn begin(&self, tokens: &TokenPair) -> Result<()> {
        self.store.set_secret(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.store
            .set_secret(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
        info!("[Session] Signed in");
        self.events.send_replace(SessionEvent::SignedIn);
        Ok(())
    }

    pub(crate) fn rotate(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        self.store.set_secret(ACCESS_TOKEN_KEY, access_token)?;
        if let Some(refresh_token) = refresh_token {
            self.store.set_secret(REFRESH_TOKEN_KEY, refresh_token)?;
        }
        Ok(())
    }

    /// Removes both tokens and reports a sign-out.
    pub fn end(&self) -> Result<()> {
        self.clear_tokens()?;
        info!("[Session] Signed out");
        self.events.send_replace(SessionEvent::SignedOut);
        Ok(())
    }

    pub(crate) fn expire(&self) -> Result<()> {
        self.clear_tokens()?;
        info!("[Session] Session expired");
        self.events.send_replace(SessionEvent::Expired);
        Ok(())
    }

    fn clear_tokens(&self) -> Result<()> {
        // Attempt both deletes before reporting a failure.
        let access = self.store.delete_secret(ACCESS_TOKEN_KEY);
        let refresh = self.store.delete_secret(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunicoin_core::secrets::MemorySecretStore;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "bearer".to_string(),
            expires_in: None,
            user: None,
        }
    }

    #[test]
    fn begin_and_end() {
        let store = Arc::new(MemorySecretStore::new());
        let session = Session::new(store.clone());
        let rx = session.subscribe();
        assert_eq!(*rx.borrow(), SessionEvent::SignedOut);

        session.begin(&tokens()).unwrap();
        assert!(session.is_signed_in());
        assert_eq!(*rx.borrow(), SessionEvent::SignedIn);
        assert_eq!(session.access_token().unwrap().as_deref(), Some("access-1"));

        session.end().unwrap();
        assert_eq!(session.state(), SessionEvent::SignedOut);
        assert!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(store.get_secret(REFRESH_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn restore_depends_on_stored_access_token() {
        let store = Arc::new(MemorySecretStore::new());
        assert!(!Session::restore(store.clone()).unwrap().is_signed_in());

        store.set_secret(ACCESS_TOKEN_KEY, "stored").unwrap();
        assert!(Session::restore(store).unwrap().is_signed_in());
    }

    #[test]
    fn rotate_keeps_refresh_token_when_not_reissued() {
        let session = Session::new(Arc::new(MemorySecretStore::new()));
        session.begin(&tokens()).unwrap();

        session.rotate("access-2", None).unwrap();
        assert_eq!(session.access_token().unwrap().as_deref(), Some("access-2"));
        assert_eq!(session.refresh_token().unwrap().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn expire_clears_and_notifies() {
        let session = Session::new(Arc::new(MemorySecretStore::new()));
        session.begin(&tokens()).unwrap();
        let rx = session.subscribe();

        session.expire().unwrap();
        assert_eq!(*rx.borrow(), SessionEvent::Expired);
        assert!(session.refresh_token().unwrap().is_none());
    }
}
