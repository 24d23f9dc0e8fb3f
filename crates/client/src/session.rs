//! Browsing-session storage and identity.
//!
//! A browsing session lives from load until the surface is closed or
//! explicitly cleared. `SessionStore` is the single logical key-value
//! store scoped to that lifetime; the identity provider and the
//! impression tracker share it as a collaborator, so tests can operate
//! on a plain in-memory instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// Session storage keys.
pub mod keys {
    /// Key under which the stable session identifier lives.
    pub const SESSION_ID: &str = "session_id";

    /// Marker key for a product whose view has been recorded.
    #[must_use]
    pub fn viewed(slug: &str) -> String {
        format!("viewed:{slug}")
    }
}

/// Session-scoped key-value store.
///
/// Clones share the same underlying map; dropping the last clone ends
/// the session implicitly, `clear` ends it explicitly.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    /// Create an empty store for a fresh browsing session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Write a value, replacing any previous one.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Read a value, inserting the computed default if the key is absent.
    pub fn get_or_insert_with(&self, key: &str, default: impl FnOnce() -> String) -> String {
        self.lock()
            .entry(key.to_string())
            .or_insert_with(default)
            .clone()
    }

    /// Remove a single key.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Drop everything; the browsing session is over.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session identity over a shared store.
///
/// Produces and persists the stable per-session identifier used to tag
/// outbound view-record requests.
#[derive(Debug, Clone)]
pub struct BrowsingSession {
    store: SessionStore,
}

impl BrowsingSession {
    /// Bind to a session store.
    #[must_use]
    pub const fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Stable per-session identifier.
    ///
    /// Created lazily on first call (a v4 UUID, written to the store);
    /// every later call within the same session returns the identical
    /// value. Generation never touches the network.
    #[must_use]
    pub fn session_id(&self) -> String {
        self.store
            .get_or_insert_with(keys::SESSION_ID, || Uuid::new_v4().to_string())
    }

    /// Whether a view has already been recorded for this slug.
    #[must_use]
    pub fn has_viewed(&self, slug: &str) -> bool {
        self.store.get(&keys::viewed(slug)).is_some()
    }

    /// Mark a slug's view as recorded.
    ///
    /// Monotonic: never unset while the session lives.
    pub fn mark_viewed(&self, slug: &str) {
        self.store.insert(keys::viewed(slug), "1");
    }

    /// End the browsing session, clearing identity and view markers.
    pub fn end(&self) {
        self.store.clear();
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }
}
