//! Purchase-intent flow: from a buy trigger to a hosted checkout redirect.
//!
//! A two-state machine, Idle or Pending. While Pending the triggering
//! control is rendered disabled with a busy affordance; repeated
//! triggers are no-ops. On success the flow performs a full navigation
//! and is abandoned with the page; on failure it returns to Idle with
//! a retry-eligible message. Retry is always user-initiated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{instrument, warn};

use crate::engine::EngineClient;
use crate::engine::types::ProductId;

/// Generic message surfaced when a checkout attempt fails.
pub const CHECKOUT_FAILED_MESSAGE: &str = "Checkout failed. Please try again.";

/// Navigation seam for the full-page redirect to the hosted payment
/// flow.
///
/// A browser surface replaces the current browsing context; tests
/// substitute a recorder.
pub trait Navigator: Send + Sync {
    /// Navigate the current context to `url`, exactly as given.
    fn navigate(&self, url: &str);
}

/// Outcome of a buy trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Navigation to the hosted checkout was issued; the current
    /// context is being replaced and this flow instance is abandoned.
    Redirected(String),
    /// The attempt failed; the control is re-enabled and the message
    /// should be shown to the user.
    Failed(&'static str),
    /// A request is already in flight; this trigger was a no-op.
    AlreadyPending,
}

/// Checkout initiator bound to a navigation surface.
///
/// Quantity is fixed to 1 at this entry point; the storefront does not
/// expose quantity selection on the buy control. Clones share state,
/// so one flow instance guards one control.
#[derive(Clone)]
pub struct CheckoutFlow {
    inner: Arc<CheckoutFlowInner>,
}

struct CheckoutFlowInner {
    engine: EngineClient,
    navigator: Arc<dyn Navigator>,
    pending: AtomicBool,
}

impl CheckoutFlow {
    /// Create an idle flow.
    #[must_use]
    pub fn new(engine: EngineClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Arc::new(CheckoutFlowInner {
                engine,
                navigator,
                pending: AtomicBool::new(false),
            }),
        }
    }

    /// Whether a checkout request is in flight.
    ///
    /// The rendering layer disables the buy control and shows the busy
    /// affordance while this is true.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Handle a buy trigger for the given product.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn buy(&self, product_id: ProductId) -> CheckoutOutcome {
        if self
            .inner
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return CheckoutOutcome::AlreadyPending;
        }

        let session = self
            .inner
            .engine
            .create_checkout_session(product_id, 1)
            .await;

        match session {
            Some(session) if !session.checkout_url.is_empty() => {
                // Full navigation; deliberately left Pending, the page
                // is being replaced.
                self.inner.navigator.navigate(&session.checkout_url);
                CheckoutOutcome::Redirected(session.checkout_url)
            }
            Some(_) => {
                warn!("engine returned a checkout session without a redirect URL");
                self.inner.pending.store(false, Ordering::Release);
                CheckoutOutcome::Failed(CHECKOUT_FAILED_MESSAGE)
            }
            None => {
                self.inner.pending.store(false, Ordering::Release);
                CheckoutOutcome::Failed(CHECKOUT_FAILED_MESSAGE)
            }
        }
    }
}
