//! HTTP client for the trend-commerce engine.
//!
//! # Architecture
//!
//! - `reqwest` for HTTP, one client per `EngineClient`, cheap clones via `Arc`
//! - In-memory caching of the product feed via `moka` (60 second TTL by default)
//! - Read operations never raise: transport failures and non-success
//!   statuses normalize to empty/absent results at this boundary, with
//!   the failure logged. Retry policy, where one exists, lives in the
//!   calling component.
//!
//! # Example
//!
//! ```rust,ignore
//! use trendfront_client::{config::ClientConfig, engine::EngineClient};
//!
//! let client = EngineClient::new(&ClientConfig::from_env()?)?;
//!
//! let feed = client.list_products().await;
//! let product = client.get_product("led-dog-collar").await;
//! ```

pub mod types;

use std::sync::Arc;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;

use types::{CheckoutRequest, CheckoutSession, Product, ProductId};

/// Cache key under which the product feed is stored.
const FEED_CACHE_KEY: &str = "feed";

/// Errors from the engine transport layer.
///
/// These never escape to rendering callers: read operations collapse
/// them to empty/absent results, and `record_view` hands them to the
/// impression tracker, which drops them. They exist so the boundary
/// can log "expected 404" and "unexpected failure" differently.
#[derive(Debug, Error)]
pub enum EngineError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Engine answered with a non-success status.
    #[error("engine returned status {0}")]
    Status(reqwest::StatusCode),

    /// Resource does not exist (HTTP 404). Expected, not a failure.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Client for the trend-commerce engine API.
///
/// Holds the configured base endpoint, resolved once at startup and
/// never changed at runtime. The product feed is cached briefly so
/// page renders within the freshness window skip the round trip.
#[derive(Clone)]
pub struct EngineClient {
    inner: Arc<EngineClientInner>,
}

struct EngineClientInner {
    client: reqwest::Client,
    base: String,
    feed_cache: Cache<String, Vec<Product>>,
}

impl EngineClient {
    /// Create a new engine client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let feed_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.feed_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(EngineClientInner {
                client,
                base: config.engine_url.as_str().trim_end_matches('/').to_string(),
                feed_cache,
            }),
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch the product feed.
    ///
    /// Any transport error or non-success status yields an empty list;
    /// callers must treat empty as "unknown/unavailable", not as a
    /// confirmed zero-product catalog. Successful responses are served
    /// from cache within the freshness window.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        if let Some(products) = self.inner.feed_cache.get(FEED_CACHE_KEY).await {
            debug!("cache hit for product feed");
            return products;
        }

        match self.fetch_products().await {
            Ok(products) => {
                self.inner
                    .feed_cache
                    .insert(FEED_CACHE_KEY.to_string(), products.clone())
                    .await;
                products
            }
            Err(e) => {
                warn!(error = %e, "product feed fetch failed, degrading to empty feed");
                Vec::new()
            }
        }
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, EngineError> {
        let url = format!("{}/products", self.inner.base);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status));
        }

        Ok(response.json().await?)
    }

    /// Look up a single product by slug.
    ///
    /// `None` covers both "engine says 404" (an expected outcome:
    /// the product does not exist or was removed) and any other
    /// failure (logged as unexpected). Callers cannot tell the two
    /// apart by return value.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Option<Product> {
        match self.fetch_product(slug).await {
            Ok(product) => Some(product),
            Err(EngineError::NotFound(_)) => {
                debug!("product not found");
                None
            }
            Err(e) => {
                warn!(error = %e, "unexpected product lookup failure");
                None
            }
        }
    }

    async fn fetch_product(&self, slug: &str) -> Result<Product, EngineError> {
        let url = format!("{}/products/{slug}", self.inner.base);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EngineError::NotFound(slug.to_string()));
        }
        if !status.is_success() {
            return Err(EngineError::Status(status));
        }

        Ok(response.json().await?)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Ask the engine to open a hosted checkout session.
    ///
    /// Returns `None` on any non-success status, transport failure, or
    /// malformed response body; never raises to the caller. The
    /// checkout flow maps `None` to a user-visible message.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn create_checkout_session(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Option<CheckoutSession> {
        match self.post_checkout_session(product_id, quantity).await {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "checkout session creation failed");
                None
            }
        }
    }

    async fn post_checkout_session(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CheckoutSession, EngineError> {
        let url = format!("{}/create-checkout-session", self.inner.base);
        let body = CheckoutRequest {
            product_id,
            quantity,
        };

        let response = self.inner.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status));
        }

        Ok(response.json().await?)
    }

    // =========================================================================
    // View Tracking
    // =========================================================================

    /// Report a product page view, tagged with the browsing session.
    ///
    /// # Errors
    ///
    /// Failures are returned so the impression tracker can decide not
    /// to set its dedup marker; they carry no user-facing weight.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn record_view(&self, slug: &str, session_id: &str) -> Result<(), EngineError> {
        let url = format!("{}/admin/products/{slug}/view", self.inner.base);
        let response = self
            .inner
            .client
            .post(&url)
            .query(&[("session_id", session_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::NotFound("led-dog-collar".to_string());
        assert_eq!(err.to_string(), "not found: led-dog-collar");

        let err = EngineError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "engine returned status 502 Bad Gateway");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::default();
        let client = EngineClient::new(&config).expect("client builds");
        assert_eq!(client.inner.base, "http://localhost:8000");
    }
}
