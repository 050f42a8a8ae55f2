//! # storefront-payments
//!
//! Stripe implementation of the storefront's `CommerceProvider`.
//!
//! ## Stripe Checkout (Hosted)
//!
//! **Flow:** product page → Stripe's hosted page → success page
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────────────┐
//! │  Storefront │────▶│  Stripe Hosted  │────▶│  Storefront              │
//! │  (product)  │     │  Checkout Page  │     │  /success?session_id=... │
//! └─────────────┘     └─────────────────┘     └──────────────────────────┘
//! ```
//!
//! The success page never trusts the redirect alone: it retrieves the session
//! and checks `payment_status` before showing anything.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_core::CommerceProvider;
//! use storefront_payments::StripeClient;
//!
//! let provider: Arc<dyn CommerceProvider> = Arc::new(StripeClient::new("sk_test_xxx"));
//! let products = provider.list_products().await?;
//! ```

mod client;
mod error;

pub use client::StripeClient;
pub use error::{PaymentError, Result};
