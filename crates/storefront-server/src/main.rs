//! Storefront HTTP Server
//!
//! Axum-based server providing the storefront JSON API, the Checkout Session
//! Creator endpoint, and the WASM frontend.

mod cache;
mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::CommerceProvider;
use storefront_payments::StripeClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Payments provider: constructed once, shared read-only
    let stripe = StripeClient::from_env().inspect_err(|_| {
        tracing::error!("Set STRIPE_SECRET_KEY in .env");
    })?;
    tracing::info!("✓ Stripe configured");
    let provider: Arc<dyn CommerceProvider> = Arc::new(stripe);

    let state = AppState::new(provider, &config);
    state.prerender(&config.prerender_product_ids).await;

    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 storefront running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                       - Health check");
    tracing::info!("  GET  /api/products                 - Catalog");
    tracing::info!("  GET  /api/products/{{id}}            - Product detail");
    tracing::info!("  POST /api/checkout                 - Create Stripe checkout");
    tracing::info!("  GET  /api/confirmation?session_id= - Verify purchase");
    tracing::info!(
        "Revalidation: catalog {}s, products {}s",
        config.catalog_revalidate.as_secs(),
        config.product_revalidate.as_secs()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
