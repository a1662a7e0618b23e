//! Credential store: login/logout and the persisted session.

use std::sync::{Arc, PoisonError, RwLock};

use orgdir_storage::{KeyValueStore, keys};

use crate::credential::{Credential, credentials, find_match};
use crate::Session;

/// Session check consumed by route guards.
///
/// Implementations may reload persisted state as a side effect; the guard
/// calls this on every transition.
pub trait AuthCheck: Send + Sync {
    fn check_auth(&self) -> bool;
}

impl<A> AuthCheck for Arc<A>
where
    A: AuthCheck + ?Sized,
{
    fn check_auth(&self) -> bool {
        (**self).check_auth()
    }
}

/// Owns the credential table and the active session.
///
/// The in-memory session is authoritative for [`is_authenticated`]; the copy
/// under the `user` key lets other handles over the same storage (another tab,
/// a restarted process) pick the session up via [`restore_session`].
///
/// [`is_authenticated`]: CredentialStore::is_authenticated
/// [`restore_session`]: CredentialStore::restore_session
pub struct CredentialStore {
    table: &'static [Credential],
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
}

impl core::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("credentials", &self.table.len())
            .field("current", &self.current_session())
            .finish()
    }
}

impl CredentialStore {
    /// Store over the built-in credential table.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_credentials(storage, credentials())
    }

    pub fn with_credentials(storage: Arc<dyn KeyValueStore>, table: &'static [Credential]) -> Self {
        Self {
            table,
            storage,
            current: RwLock::new(None),
        }
    }

    /// Attempt a login.
    ///
    /// On a match the session is replaced and persisted. On a miss nothing
    /// changes, including any session that is already active.
    pub fn login(&self, username: &str, password: &str) -> bool {
        let Some(credential) = find_match(self.table, username, password) else {
            tracing::info!(username, "login rejected");
            return false;
        };

        let session = Session::from(credential);
        match serde_json::to_string(&session) {
            Ok(json) => {
                if let Err(err) = self.storage.set(keys::USER, &json) {
                    tracing::warn!(error = %err, "failed to persist session");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize session"),
        }

        tracing::info!(username = %session.username, role = %session.role, "login succeeded");
        self.replace(Some(session));
        true
    }

    /// Clear the session in memory and in storage. Idempotent.
    pub fn logout(&self) {
        if let Some(session) = self.replace(None) {
            tracing::info!(username = %session.username, "logged out");
        }
        if let Err(err) = self.storage.remove(keys::USER) {
            tracing::warn!(error = %err, "failed to remove persisted session");
        }
    }

    /// Reload the persisted session into memory.
    ///
    /// - persisted and well-formed: overwrites the in-memory session
    /// - nothing persisted (or storage unreadable): memory left as is
    /// - persisted but malformed: treated as logged out
    ///
    /// The persisted record is not re-checked against the credential table.
    pub fn restore_session(&self) -> Option<Session> {
        let persisted = match self.storage.get(keys::USER) {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted session");
                None
            }
        };

        if let Some(json) = persisted {
            match serde_json::from_str::<Session>(&json) {
                Ok(session) => {
                    self.replace(Some(session));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "discarding malformed persisted session");
                    self.replace(None);
                }
            }
        }

        self.current_session()
    }

    /// Whether a session is active in memory. No storage access.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn credentials(&self) -> &'static [Credential] {
        self.table
    }

    fn replace(&self, session: Option<Session>) -> Option<Session> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, session)
    }
}

impl AuthCheck for CredentialStore {
    /// Restore from storage, then report whether a session is active.
    fn check_auth(&self) -> bool {
        self.restore_session();
        self.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use orgdir_storage::InMemoryKeyValueStore;

    fn store() -> (Arc<InMemoryKeyValueStore>, CredentialStore) {
        let storage = InMemoryKeyValueStore::arc();
        let store = CredentialStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn login_is_case_insensitive_on_username() {
        let (storage, store) = store();
        assert!(store.login("KENNETH", "Admin"));

        let session = store.current_session().unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.username, "Kenneth");
        assert_eq!(session.full_name, "Kenneth Chavez");

        let persisted: Session =
            serde_json::from_str(&storage.get(keys::USER).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, session);
    }

    #[test]
    fn failed_login_leaves_prior_session_untouched() {
        let (storage, store) = store();
        assert!(store.login("Natalia", "Larach"));
        let before = storage.get(keys::USER).unwrap();

        assert!(!store.login("Kenneth", "wrong"));
        assert_eq!(store.current_session().unwrap().username, "Natalia");
        assert_eq!(storage.get(keys::USER).unwrap(), before);
    }

    #[test]
    fn failed_login_without_session_stays_logged_out() {
        let (storage, store) = store();
        assert!(!store.login("nobody", "Admin"));
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn logout_clears_memory_and_storage_and_is_idempotent() {
        let (storage, store) = store();
        store.login("Jaime", "RRHH");
        store.logout();
        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn check_auth_restores_a_session_persisted_by_another_handle() {
        let storage = InMemoryKeyValueStore::arc();
        let first = CredentialStore::new(storage.clone());
        let second = CredentialStore::new(storage.clone());

        assert!(first.login("Guillermo", "Gerencia"));
        assert!(!second.is_authenticated());
        assert!(second.check_auth());
        assert_eq!(second.current_session().unwrap().role, Role::Manager);
    }

    #[test]
    fn restore_overwrites_a_different_in_memory_session() {
        let storage = InMemoryKeyValueStore::arc();
        let store = CredentialStore::new(storage.clone());
        store.login("Admin", "Admin");

        storage
            .set(keys::USER, r#"{"username":"Victor","role":"hr","fullName":"Victor HR"}"#)
            .unwrap();
        let restored = store.restore_session().unwrap();
        assert_eq!(restored.username, "Victor");
        assert_eq!(store.current_session(), Some(restored));
    }

    #[test]
    fn missing_persisted_session_keeps_memory() {
        let storage = InMemoryKeyValueStore::arc();
        let store = CredentialStore::new(storage.clone());
        store.login("Admin", "Admin");

        // Logged out elsewhere: the key is gone but this handle keeps its session.
        storage.remove(keys::USER).unwrap();
        assert!(store.check_auth());
    }

    #[test]
    fn malformed_persisted_session_counts_as_logged_out() {
        let storage = InMemoryKeyValueStore::arc();
        let store = CredentialStore::new(storage.clone());
        store.login("Admin", "Admin");

        storage.set(keys::USER, "{not json").unwrap();
        assert!(!store.check_auth());
        assert_eq!(store.current_session(), None);

        storage
            .set(keys::USER, r#"{"username":"x","role":"superuser","fullName":"X"}"#)
            .unwrap();
        assert!(!store.check_auth());
    }
}
