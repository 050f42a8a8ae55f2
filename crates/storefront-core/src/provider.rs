//! Payments Provider Strategy Pattern
//!
//! The storefront never talks to a payments API directly. Everything it reads
//! (products, prices, checkout sessions) and the one thing it writes (a new
//! hosted checkout session) goes through [`CommerceProvider`].
//!
//! Records here are provider-neutral: the Stripe implementation lives in
//! `storefront-payments`, and [`crate::mock::MockCommerceProvider`] backs tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::{catalog, CommerceProvider};
//!
//! let provider: Arc<dyn CommerceProvider> = Arc::new(StripeClient::from_env()?);
//! let items = catalog::load_catalog(provider.as_ref()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutResponse;
use crate::error::Result;

/// A price as the provider stores it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPrice {
    /// Price identifier (what checkout is started with)
    pub id: String,

    /// Smallest-currency-unit amount; `None` for custom/tiered prices
    pub unit_amount: Option<i64>,
}

/// A product with its default price expanded inline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProduct {
    pub id: String,
    pub name: String,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub default_price: Option<ProviderPrice>,
}

/// Payment status of a checkout session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::NoPaymentRequired => "no_payment_required",
        }
    }
}

/// One purchased line; `product` is `None` when the provider could not expand it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLineItem {
    pub product: Option<ProviderProduct>,
}

/// A checkout session with line items and their products expanded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub id: String,
    pub payment_status: PaymentStatus,
    pub customer_name: Option<String>,
    pub line_items: Vec<ProviderLineItem>,
}

/// Return addresses handed to the hosted checkout page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutUrls {
    /// Where the provider sends the shopper after paying; contains the
    /// provider's session id placeholder
    pub success_url: String,

    /// Where the provider sends the shopper if they abandon checkout
    pub cancel_url: String,
}

impl CheckoutUrls {
    /// Placeholder the provider substitutes with the created session id
    pub const SESSION_ID_PLACEHOLDER: &'static str = "{CHECKOUT_SESSION_ID}";

    /// Build the success/cancel pair for a storefront served at `base_url`
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success_url: format!("{base}/success?session_id={}", Self::SESSION_ID_PLACEHOLDER),
            cancel_url: format!("{base}/"),
        }
    }
}

/// Payments provider trait (Strategy pattern)
///
/// Implementations are constructed once at process start and shared
/// read-only afterwards.
#[async_trait]
pub trait CommerceProvider: Send + Sync {
    /// Full product listing, default prices expanded, in provider order
    async fn list_products(&self) -> Result<Vec<ProviderProduct>>;

    /// One product with its default price expanded.
    ///
    /// Fails with `StorefrontError::ProductNotFound` for unknown ids.
    async fn retrieve_product(&self, product_id: &str) -> Result<ProviderProduct>;

    /// One checkout session with line items and purchased products expanded.
    ///
    /// `Ok(None)` means the provider does not know the session.
    async fn retrieve_checkout_session(&self, session_id: &str) -> Result<Option<ProviderSession>>;

    /// Create a hosted checkout session for a single unit of `price_id`
    async fn create_checkout_session(
        &self,
        price_id: &str,
        urls: &CheckoutUrls,
    ) -> Result<CheckoutResponse>;

    /// Provider name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls_from_base() {
        let urls = CheckoutUrls::for_base_url("https://loja.example/");
        assert_eq!(
            urls.success_url,
            "https://loja.example/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.cancel_url, "https://loja.example/");
    }

    #[test]
    fn test_payment_status_wire_names() {
        assert_eq!(PaymentStatus::Paid.as_str(), "paid");
        assert_eq!(PaymentStatus::NoPaymentRequired.as_str(), "no_payment_required");
    }
}
