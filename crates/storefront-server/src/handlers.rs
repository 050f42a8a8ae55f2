//! HTTP Handlers
//!
//! Fetching strategy per page:
//! - catalog and product detail: cached, recomputed after the configured
//!   revalidation interval;
//! - confirmation: looked up on every request, never cached.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use storefront_core::{
    catalog, checkout, confirmation, CatalogItem, CheckoutRequest, CheckoutResponse,
    ConfirmationPage, ProductDetail,
};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmationQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
    })
}

/// Catalog page data
pub async fn list_catalog(State(state): State<AppState>) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let items = state
        .catalog
        .get_or_fetch((), || catalog::load_catalog(state.provider.as_ref()))
        .await?;

    Ok(Json(items))
}

/// Product page data; unknown ids are generated on demand and then cached
pub async fn product_detail(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    let detail = state
        .products
        .get_or_fetch(product_id.clone(), || {
            catalog::load_product(state.provider.as_ref(), &product_id)
        })
        .await?;

    Ok(Json(detail))
}

/// Checkout Session Creator: `{priceId}` → `{checkoutUrl}`
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let response =
        checkout::start_checkout(state.provider.as_ref(), &payload, &state.checkout_urls).await?;

    Ok(Json(response))
}

/// Success page data: a redirect back to the catalog or the confirmation
pub async fn confirm_purchase(
    State(state): State<AppState>,
    Query(query): Query<ConfirmationQuery>,
) -> Result<Json<ConfirmationPage>, ApiError> {
    let outcome =
        confirmation::verify_purchase(state.provider.as_ref(), query.session_id.as_deref()).await?;

    Ok(Json(outcome.into_page()?))
}
