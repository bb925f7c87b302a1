use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::SessionError;
use crate::models::session::Session;
use crate::storage::KeyValueStore;

/// Fixed storage key for the persisted session record. Kept byte-for-byte
/// compatible with records written by earlier releases.
pub const SESSION_KEY: &str = "la121UserSession";

/// Loads, saves, and clears the logged-in user's session record.
///
/// The record is trusted as-is when it parses. Nothing here is fatal: a
/// missing record is "no session", and a corrupt one is discarded on the
/// spot and reported the same way.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the persisted session, if any.
    ///
    /// A record that fails to deserialize is deleted from storage and logged;
    /// the caller just sees `None`. A storage read error is folded into
    /// `None` as well.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Session read failed: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!("Restored session for {}", session.email);
                Some(session)
            }
            Err(e) => {
                warn!("Failed to parse persisted session, discarding it: {e}");
                if let Err(e) = self.store.remove(SESSION_KEY) {
                    warn!("Could not remove corrupt session record: {e}");
                }
                None
            }
        }
    }

    /// Persists `session`, replacing any prior record.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &raw)?;
        Ok(())
    }

    /// Deletes the persisted record. Clearing an absent session is a no-op.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Role;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn make_manager() -> (SessionManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SessionManager::new(store.clone()), store)
    }

    fn make_session(role: Role) -> Session {
        Session {
            email: "user@example.com".to_string(),
            role,
            created_at: Utc::now(),
            expires_at: None,
            usage_count: Some(0),
        }
    }

    #[test]
    fn test_load_with_no_record_returns_none() {
        let (manager, _) = make_manager();
        assert!(manager.load().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (manager, _) = make_manager();
        manager.save(&make_session(Role::Pro)).unwrap();

        let loaded = manager.load().expect("session should be present");
        assert_eq!(loaded.email, "user@example.com");
        assert_eq!(loaded.role, Role::Pro);
    }

    #[test]
    fn test_save_overwrites_prior_session() {
        let (manager, _) = make_manager();
        manager.save(&make_session(Role::Onetime)).unwrap();

        let mut replacement = make_session(Role::Superadmin);
        replacement.email = "admin@example.com".to_string();
        manager.save(&replacement).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.email, "admin@example.com");
        assert_eq!(loaded.role, Role::Superadmin);
    }

    #[test]
    fn test_malformed_record_is_discarded() {
        let (manager, store) = make_manager();
        store.set(SESSION_KEY, "{not valid json").unwrap();

        assert!(manager.load().is_none());
        // The corrupt record must be gone, not just skipped.
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_valid_json_wrong_shape_is_discarded() {
        let (manager, store) = make_manager();
        store.set(SESSION_KEY, r#"{"email":"x@y.z","role":"root"}"#).unwrap();

        assert!(manager.load().is_none());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (manager, store) = make_manager();
        manager.save(&make_session(Role::Pro)).unwrap();

        manager.clear().unwrap();
        manager.clear().unwrap();
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_surfaces_denied_write() {
        let manager = SessionManager::new(Arc::new(MemoryStore::read_only(&[])));
        assert!(manager.save(&make_session(Role::Pro)).is_err());
    }
}
