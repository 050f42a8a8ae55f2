//! Mock Commerce Provider
//!
//! In-memory provider for tests and local demos. Products keep insertion
//! order, like the provider's listing does.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::checkout::CheckoutResponse;
use crate::error::{Result, StorefrontError};
use crate::provider::{CheckoutUrls, CommerceProvider, ProviderProduct, ProviderSession};

/// Hosted checkout origin the mock hands out
const MOCK_CHECKOUT_ORIGIN: &str = "https://checkout.mock.test/pay";

/// Mock provider with static data
pub struct MockCommerceProvider {
    products: Vec<ProviderProduct>,
    sessions: HashMap<String, ProviderSession>,
    /// When false every call fails as if the provider were down
    available: bool,
    created_checkouts: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
}

impl Default for MockCommerceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommerceProvider {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            sessions: HashMap::new(),
            available: true,
            created_checkouts: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            retrieve_calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_product(mut self, product: ProviderProduct) -> Self {
        self.products.push(product);
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: ProviderSession) -> Self {
        self.sessions.insert(session.id.clone(), session);
        self
    }

    /// Price ids checkout sessions were created for, in call order
    pub fn created_checkouts(&self) -> Vec<String> {
        self.created_checkouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `list_products` calls so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `retrieve_product` calls so far
    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorefrontError::Provider("mock provider unavailable".into()))
        }
    }
}

#[async_trait]
impl CommerceProvider for MockCommerceProvider {
    async fn list_products(&self) -> Result<Vec<ProviderProduct>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self.products.clone())
    }

    async fn retrieve_product(&self, product_id: &str) -> Result<ProviderProduct> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        self.products
            .iter()
            .find(|product| product.id == product_id)
            .cloned()
            .ok_or_else(|| StorefrontError::ProductNotFound(product_id.to_string()))
    }

    async fn retrieve_checkout_session(&self, session_id: &str) -> Result<Option<ProviderSession>> {
        self.ensure_available()?;
        Ok(self.sessions.get(session_id).cloned())
    }

    async fn create_checkout_session(
        &self,
        price_id: &str,
        _urls: &CheckoutUrls,
    ) -> Result<CheckoutResponse> {
        self.ensure_available()?;
        self.created_checkouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(price_id.to_string());

        Ok(CheckoutResponse {
            checkout_url: format!("{MOCK_CHECKOUT_ORIGIN}/{price_id}"),
        })
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let provider = MockCommerceProvider::new();

        provider.list_products().await.unwrap();
        provider.list_products().await.unwrap();
        let _ = provider.retrieve_product("prod_x").await;

        assert_eq!(provider.list_calls(), 2);
        assert_eq!(provider.retrieve_calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_mock_fails_everything() {
        let provider = MockCommerceProvider::unavailable();
        let urls = CheckoutUrls::for_base_url("http://localhost:3000");

        assert!(provider.list_products().await.is_err());
        assert!(provider.retrieve_checkout_session("cs_1").await.is_err());
        assert!(provider.create_checkout_session("price_1", &urls).await.is_err());
    }
}
