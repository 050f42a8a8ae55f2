//! Catalog Loader and Product Detail
//!
//! Projects provider products into the read-only records the pages display.
//! Nothing here is persisted; the server decides how long a projection may be
//! served before it is recomputed.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::money::format_unit_amount;
use crate::provider::{CommerceProvider, ProviderProduct};

/// One entry of the catalog page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,

    /// First product image, if any
    pub image_url: Option<String>,

    /// BRL price; absent when the default price has no unit amount
    pub formatted_price: Option<String>,
}

impl CatalogItem {
    pub fn from_product(product: &ProviderProduct) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.images.first().cloned(),
            formatted_price: formatted_default_price(product),
        }
    }
}

/// Everything the product page needs, including the price to check out with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub formatted_price: Option<String>,

    /// `None` when the product has no default price; checkout cannot start
    pub default_price_id: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl ProductDetail {
    pub fn from_product(product: &ProviderProduct) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.images.first().cloned(),
            formatted_price: formatted_default_price(product),
            default_price_id: product.default_price.as_ref().map(|price| price.id.clone()),
            description: product.description.clone().unwrap_or_default(),
        }
    }

    /// Whether the buy control can be offered at all
    pub fn is_purchasable(&self) -> bool {
        self.default_price_id.is_some()
    }
}

fn formatted_default_price(product: &ProviderProduct) -> Option<String> {
    product
        .default_price
        .as_ref()
        .and_then(|price| format_unit_amount(price.unit_amount))
}

/// Load the whole catalog, preserving provider order.
///
/// A provider failure fails the whole load; no partial catalog is returned.
pub async fn load_catalog(provider: &dyn CommerceProvider) -> Result<Vec<CatalogItem>> {
    let products = provider.list_products().await?;

    tracing::debug!(provider = provider.name(), count = products.len(), "Catalog loaded");

    Ok(products.iter().map(CatalogItem::from_product).collect())
}

/// Load one product's detail
pub async fn load_product(provider: &dyn CommerceProvider, product_id: &str) -> Result<ProductDetail> {
    let product_id = product_id.trim();
    if product_id.is_empty() {
        return Err(StorefrontError::MissingParameter("id"));
    }

    let product = provider.retrieve_product(product_id).await?;

    Ok(ProductDetail::from_product(&product))
}
