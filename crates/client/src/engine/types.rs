//! Wire types for the trend-commerce engine API.
//!
//! Field names mirror the engine's snake_case JSON exactly; the client
//! never mutates any of these entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type-safe product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// A sellable product as served by the engine.
///
/// The supplier and margin fields only appear in internal feed views;
/// public responses omit them, so they all default to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub status: String,
    #[serde(default)]
    pub trend_score: f64,
    #[serde(default)]
    pub urgency_score: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub supplier_url: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub supplier_cost_cents: Option<i64>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub import_source: Option<String>,
}

impl Product {
    /// Price formatted as a dollar string for display.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Body for `POST /create-checkout-session`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Server-issued handle for an in-progress hosted payment flow.
///
/// `checkout_url` is the redirect target; `session_id` is opaque and
/// echoed back on the order-confirmation view.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub session_id: String,
}
