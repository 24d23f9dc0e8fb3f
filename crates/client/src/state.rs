//! Client runtime state shared across surfaces.

use std::sync::Arc;

use crate::checkout::{CheckoutFlow, Navigator};
use crate::config::ClientConfig;
use crate::engine::{EngineClient, EngineError};
use crate::session::{BrowsingSession, SessionStore};
use crate::tracking::ImpressionTracker;

/// Shared client runtime: configuration, the engine client, and the
/// session-scoped collaborators.
///
/// Cheaply cloneable via `Arc`. One `AppState` corresponds to one
/// browsing session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    engine: EngineClient,
    session: BrowsingSession,
    tracker: ImpressionTracker,
}

impl AppState {
    /// Create a new client runtime with a fresh browsing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, EngineError> {
        let engine = EngineClient::new(&config)?;
        let session = BrowsingSession::new(SessionStore::new());
        let tracker = ImpressionTracker::new(engine.clone(), session.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                session,
                tracker,
            }),
        })
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the engine client.
    #[must_use]
    pub fn engine(&self) -> &EngineClient {
        &self.inner.engine
    }

    /// Get a reference to the browsing session.
    #[must_use]
    pub fn session(&self) -> &BrowsingSession {
        &self.inner.session
    }

    /// Get a reference to the impression tracker.
    #[must_use]
    pub fn tracker(&self) -> &ImpressionTracker {
        &self.inner.tracker
    }

    /// Build a checkout flow bound to the given navigation surface.
    #[must_use]
    pub fn checkout(&self, navigator: Arc<dyn Navigator>) -> CheckoutFlow {
        CheckoutFlow::new(self.inner.engine.clone(), navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shares_one_session() {
        let state = AppState::new(ClientConfig::default()).expect("state builds");
        let id = state.session().session_id();

        let clone = state.clone();
        assert_eq!(clone.session().session_id(), id);
    }
}
