// ============================================================================
// SESSION STATE - Bearer token slot backed by persisted storage
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::Listeners;
use crate::utils::storage::KeyValueStorage;

/// Tab-wide authentication state. Authenticated means "a token is held";
/// nothing here checks structure or expiry, the API is the only judge.
#[derive(Clone)]
pub struct SessionStore {
    token: Rc<RefCell<Option<String>>>,
    storage: Rc<dyn KeyValueStorage>,
    key: Rc<str>,
    listeners: Listeners,
}

impl SessionStore {
    /// Initialise from whatever token a previous visit left in storage.
    pub fn load(storage: Rc<dyn KeyValueStorage>, key: &str) -> Self {
        let token = match storage.get(key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::error!("❌ [SESSION] Could not read persisted token: {}", e);
                None
            }
        };

        if token.is_some() {
            log::info!("💾 [SESSION] Token restored from storage");
        }

        Self {
            token: Rc::new(RefCell::new(token)),
            storage,
            key: Rc::from(key),
            listeners: Listeners::new(),
        }
    }

    /// In-memory flag: a token was loaded or established.
    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Token held in memory.
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Token as currently persisted. Read fresh on every call, so a logout in
    /// another tab or a manual wipe is picked up.
    pub fn persisted_token(&self) -> Option<String> {
        match self.storage.get(&self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️ [SESSION] Could not read persisted token: {}", e);
                None
            }
        }
    }

    /// Whether storage still holds a token right now.
    pub fn has_persisted_token(&self) -> bool {
        self.persisted_token().is_some()
    }

    /// Persist the token and flip to authenticated.
    pub fn establish(&self, token: String) {
        if let Err(e) = self.storage.set(&self.key, &token) {
            log::error!("❌ [SESSION] Could not persist token: {}", e);
        }
        *self.token.borrow_mut() = Some(token);
        log::info!("🔐 [SESSION] Session established");
        self.listeners.notify();
    }

    /// Drop the token from storage and memory.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            log::error!("❌ [SESSION] Could not remove persisted token: {}", e);
        }
        *self.token.borrow_mut() = None;
        log::info!("👋 [SESSION] Session cleared");
        self.listeners.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use std::cell::Cell;

    #[test]
    fn starts_anonymous_without_token() {
        let session = SessionStore::load(Rc::new(MemoryStorage::new()), "token");
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn restores_previous_token() {
        let storage = MemoryStorage::with_entry("token", "abc");
        let session = SessionStore::load(Rc::new(storage), "token");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let storage = MemoryStorage::with_entry("token", "");
        let session = SessionStore::load(Rc::new(storage), "token");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn establish_then_clear() {
        let storage = MemoryStorage::new();
        let session = SessionStore::load(Rc::new(storage.clone()), "token");

        session.establish("secret".to_string());
        assert!(session.is_authenticated());
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("secret"));
        assert!(session.has_persisted_token());

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(storage.get("token").unwrap(), None);
        assert!(!session.has_persisted_token());
    }

    #[test]
    fn mutations_notify_subscribers() {
        let session = SessionStore::load(Rc::new(MemoryStorage::new()), "token");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        session.subscribe(move || counter.set(counter.get() + 1));

        session.establish("t".to_string());
        session.clear();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn persisted_token_tracks_external_removal() {
        let storage = MemoryStorage::with_entry("token", "abc");
        let session = SessionStore::load(Rc::new(storage.clone()), "token");

        storage.remove("token").unwrap();
        assert!(session.is_authenticated());
        assert!(!session.has_persisted_token());
    }
}
