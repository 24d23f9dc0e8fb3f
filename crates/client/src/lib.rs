//! Trendfront client library.
//!
//! Client-side subsystem of the Trendfront storefront: it drives the
//! product feed, product detail lookups, the checkout-session purchase
//! flow, and best-effort view tracking against the remote trend-commerce
//! engine. Rendering surfaces (the CLI here, a web surface elsewhere)
//! sit on top of this crate and stay declarative.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod engine;
pub mod session;
pub mod state;
pub mod tracking;
