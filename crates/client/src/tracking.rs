//! Best-effort impression tracking with per-session deduplication.
//!
//! View analytics must never surface an error or delay the page they
//! are attached to, so recording is fire-and-forget and failures are
//! swallowed. The dedup marker is only set after a request completes
//! successfully: a failed attempt leaves the marker unset, and the
//! next mount of the same product detail view tries again.

use tracing::debug;

use crate::engine::EngineClient;
use crate::session::BrowsingSession;

/// Records product impressions at most once per browsing session.
#[derive(Clone)]
pub struct ImpressionTracker {
    engine: EngineClient,
    session: BrowsingSession,
}

impl ImpressionTracker {
    /// Bind the tracker to an engine client and a browsing session.
    #[must_use]
    pub const fn new(engine: EngineClient, session: BrowsingSession) -> Self {
        Self { engine, session }
    }

    /// Fire-and-forget entry point, invoked once per mount of a
    /// product detail view.
    ///
    /// Returns immediately; the request runs on a detached task whose
    /// completion only updates the session marker. Two mounts racing
    /// before the first request completes may both send a request;
    /// the marker is monotonic and the engine tolerates duplicates.
    pub fn record_view_once(&self, slug: &str) {
        let tracker = self.clone();
        let slug = slug.to_string();
        tokio::spawn(async move {
            tracker.record_view_attempt(&slug).await;
        });
    }

    /// One deduplicated recording attempt.
    ///
    /// Awaitable form for callers that need the completion signal
    /// (the CLI records before exiting; tests assert on the marker).
    pub async fn record_view_attempt(&self, slug: &str) {
        if self.session.has_viewed(slug) {
            debug!(slug, "view already recorded this session");
            return;
        }

        let session_id = self.session.session_id();
        match self.engine.record_view(slug, &session_id).await {
            Ok(()) => self.session.mark_viewed(slug),
            Err(e) => {
                debug!(slug, error = %e, "view recording failed, will retry on next mount");
            }
        }
    }
}
