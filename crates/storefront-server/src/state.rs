//! Application State

use std::sync::Arc;

use storefront_core::{catalog, CatalogItem, CheckoutUrls, CommerceProvider, ProductDetail};

use crate::cache::RevalidatingCache;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payments provider, constructed once at startup
    pub provider: Arc<dyn CommerceProvider>,

    /// Whole catalog, one entry
    pub catalog: Arc<RevalidatingCache<(), Vec<CatalogItem>>>,

    /// Product details keyed by product id
    pub products: Arc<RevalidatingCache<String, ProductDetail>>,

    /// Return URLs for hosted checkout
    pub checkout_urls: Arc<CheckoutUrls>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CommerceProvider>, config: &Config) -> Self {
        Self {
            provider,
            catalog: Arc::new(RevalidatingCache::new(config.catalog_revalidate)),
            products: Arc::new(RevalidatingCache::new(config.product_revalidate)),
            checkout_urls: Arc::new(CheckoutUrls::for_base_url(&config.base_url)),
        }
    }

    /// Fill the caches before the first request: the catalog plus the
    /// configured product pages. Failures are logged; those pages are then
    /// generated on demand.
    pub async fn prerender(&self, product_ids: &[String]) {
        match catalog::load_catalog(self.provider.as_ref()).await {
            Ok(items) => {
                tracing::info!(count = items.len(), "Catalog pre-rendered");
                self.catalog.insert((), items).await;
            }
            Err(e) => tracing::warn!("Catalog pre-render failed: {}", e),
        }

        for product_id in product_ids {
            match catalog::load_product(self.provider.as_ref(), product_id).await {
                Ok(detail) => {
                    tracing::info!(product_id = %product_id, "Product page pre-rendered");
                    self.products.insert(product_id.clone(), detail).await;
                }
                Err(e) => {
                    tracing::warn!(product_id = %product_id, "Product pre-render failed: {}", e);
                }
            }
        }
    }
}
