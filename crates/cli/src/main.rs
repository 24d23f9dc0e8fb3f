//! Trendfront CLI - terminal surface for the storefront client.
//!
//! # Usage
//!
//! ```bash
//! # List the product feed
//! trendfront feed
//!
//! # Show a product (records the impression for this session)
//! trendfront show led-dog-collar
//!
//! # Start a checkout
//! trendfront buy 42
//! ```
//!
//! The engine endpoint is taken from `ENGINE_URL` (default
//! `http://localhost:8000`). This binary is deliberately thin: all
//! behavior lives in `trendfront-client`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendfront_client::checkout::{CheckoutOutcome, Navigator};
use trendfront_client::config::ClientConfig;
use trendfront_client::engine::types::{Product, ProductId};
use trendfront_client::state::AppState;

#[derive(Parser)]
#[command(name = "trendfront")]
#[command(author, version, about = "Storefront client for the trend-commerce engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product feed
    Feed,
    /// Show one product by slug
    Show { slug: String },
    /// Start a checkout for a product
    Buy { product_id: i64 },
    /// Order confirmation, echoing the checkout session reference
    Confirm { session_id: Option<String> },
}

/// Prints the hosted-checkout redirect target.
///
/// A browser surface would replace the current browsing context; the
/// terminal reports the target instead.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &str) {
        println!("redirecting to {url}");
    }
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trendfront_client=info,trendfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().expect("Failed to load configuration");
    let state = AppState::new(config).expect("Failed to initialize client runtime");

    match cli.command {
        Commands::Feed => feed(&state).await,
        Commands::Show { slug } => show(&state, &slug).await,
        Commands::Buy { product_id } => buy(&state, ProductId::new(product_id)).await,
        Commands::Confirm { session_id } => confirm(session_id.as_deref()),
    }
}

/// Order confirmation; the reference is opaque and echoed verbatim.
fn confirm(session_id: Option<&str>) {
    println!("Thanks for your order!");
    if let Some(session_id) = session_id {
        println!("reference: {session_id}");
    }
}

/// Print the product feed, hottest trends first.
async fn feed(state: &AppState) {
    let mut products = state.engine().list_products().await;

    if products.is_empty() {
        println!("no products available");
        return;
    }

    products.sort_by(|a, b| b.trend_score.total_cmp(&a.trend_score));
    for product in &products {
        print_product_line(product);
    }
}

/// Print one product and record the impression for this session.
async fn show(state: &AppState, slug: &str) {
    let Some(product) = state.engine().get_product(slug).await else {
        println!("product not found: {slug}");
        return;
    };

    // The process exits right after, so await the attempt instead of
    // detaching it; a long-lived surface would use record_view_once.
    state.tracker().record_view_attempt(slug).await;

    print_product_line(&product);
    if let Some(description) = &product.description {
        println!("{description}");
    }
    if let Some(image) = &product.main_image_url {
        println!("image: {image}");
    }
}

/// Start a checkout for the given product.
async fn buy(state: &AppState, product_id: ProductId) {
    let flow = state.checkout(Arc::new(PrintNavigator));

    match flow.buy(product_id).await {
        // PrintNavigator already reported the redirect
        CheckoutOutcome::Redirected(_) | CheckoutOutcome::AlreadyPending => {}
        CheckoutOutcome::Failed(message) => println!("{message}"),
    }
}

fn print_product_line(product: &Product) {
    println!(
        "{:>5}  {:<30} {:>8}  trend {:>5.1}  {}",
        product.id.as_i64(),
        product.name,
        product.display_price(),
        product.trend_score,
        product.slug
    );
}
