//! Stripe Commerce Provider
//!
//! Implements [`CommerceProvider`] on top of the Stripe API: product listing
//! and lookup with `default_price` expanded, checkout session lookup with
//! line items and their products expanded, and hosted checkout creation.

use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionId, CheckoutSessionItem, CheckoutSessionMode,
    CheckoutSessionPaymentStatus, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    Expandable, ListProducts, Price, Product, ProductId,
};

use storefront_core::{
    CheckoutResponse, CheckoutUrls, CommerceProvider, PaymentStatus, ProviderLineItem,
    ProviderPrice, ProviderProduct, ProviderSession, StorefrontError,
};

use crate::error::{is_not_found, PaymentError, Result};

/// Largest page Stripe serves for list endpoints
const PAGE_SIZE: u64 = 100;

const PRODUCT_EXPAND: &[&str] = &["default_price"];
const PRODUCT_LIST_EXPAND: &[&str] = &["data.default_price"];
const SESSION_EXPAND: &[&str] = &["line_items", "line_items.data.price.product"];

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;

        if secret_key.trim().is_empty() {
            return Err(PaymentError::Config("STRIPE_SECRET_KEY is empty".into()));
        }

        Ok(Self::new(secret_key.trim()))
    }
}

#[async_trait]
impl CommerceProvider for StripeClient {
    async fn list_products(&self) -> storefront_core::Result<Vec<ProviderProduct>> {
        let mut products = Vec::new();
        let mut cursor: Option<ProductId> = None;

        loop {
            let mut params = ListProducts::new();
            params.expand = PRODUCT_LIST_EXPAND;
            params.limit = Some(PAGE_SIZE);
            params.starting_after = cursor.take();

            let page = Product::list(&self.client, &params)
                .await
                .map_err(PaymentError::from)?;

            products.extend(page.data.iter().map(product_record));

            match page.data.last() {
                Some(last) if page.has_more => cursor = Some(last.id.clone()),
                _ => break,
            }
        }

        tracing::debug!(count = products.len(), "Listed Stripe products");
        Ok(products)
    }

    async fn retrieve_product(&self, product_id: &str) -> storefront_core::Result<ProviderProduct> {
        let id: ProductId = product_id
            .parse()
            .map_err(|_| StorefrontError::ProductNotFound(product_id.to_string()))?;

        match Product::retrieve(&self.client, &id, PRODUCT_EXPAND).await {
            Ok(product) => Ok(product_record(&product)),
            Err(err) if is_not_found(&err) => {
                Err(StorefrontError::ProductNotFound(product_id.to_string()))
            }
            Err(err) => Err(PaymentError::from(err).into()),
        }
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> storefront_core::Result<Option<ProviderSession>> {
        let Ok(id) = session_id.parse::<CheckoutSessionId>() else {
            tracing::debug!(session_id, "Malformed checkout session id");
            return Ok(None);
        };

        match CheckoutSession::retrieve(&self.client, &id, SESSION_EXPAND).await {
            Ok(session) => Ok(Some(session_record(&session))),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(PaymentError::from(err).into()),
        }
    }

    async fn create_checkout_session(
        &self,
        price_id: &str,
        urls: &CheckoutUrls,
    ) -> storefront_core::Result<CheckoutResponse> {
        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&urls.success_url);
        params.cancel_url = Some(&urls.cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(price_id.to_string()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(PaymentError::from)?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(session_id = %session.id, price_id, "Stripe checkout session created");

        Ok(CheckoutResponse { checkout_url })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

fn price_record(price: &Price) -> ProviderPrice {
    ProviderPrice {
        id: price.id.to_string(),
        unit_amount: price.unit_amount,
    }
}

fn product_record(product: &Product) -> ProviderProduct {
    ProviderProduct {
        id: product.id.to_string(),
        name: product.name.clone().unwrap_or_default(),
        images: product.images.clone().unwrap_or_default(),
        description: product.description.clone(),
        default_price: product
            .default_price
            .as_ref()
            .and_then(Expandable::as_object)
            .map(price_record),
    }
}

fn line_item_record(item: &CheckoutSessionItem) -> ProviderLineItem {
    ProviderLineItem {
        product: item
            .price
            .as_ref()
            .and_then(|price| price.product.as_ref())
            .and_then(Expandable::as_object)
            .map(product_record),
    }
}

fn session_record(session: &CheckoutSession) -> ProviderSession {
    ProviderSession {
        id: session.id.to_string(),
        payment_status: payment_status(&session.payment_status),
        customer_name: session
            .customer_details
            .as_ref()
            .and_then(|details| details.name.clone()),
        line_items: session
            .line_items
            .as_ref()
            .map(|items| items.data.iter().map(line_item_record).collect())
            .unwrap_or_default(),
    }
}

fn payment_status(status: &CheckoutSessionPaymentStatus) -> PaymentStatus {
    match status {
        CheckoutSessionPaymentStatus::Paid => PaymentStatus::Paid,
        CheckoutSessionPaymentStatus::Unpaid => PaymentStatus::Unpaid,
        CheckoutSessionPaymentStatus::NoPaymentRequired => PaymentStatus::NoPaymentRequired,
    }
}
