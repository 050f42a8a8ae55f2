//! # storefront-core
//!
//! Provider-agnostic storefront logic: catalog projection, checkout
//! initiation and purchase confirmation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Storefront                            │
//! │  ┌─────────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │   Catalog   │  │   Checkout   │  │    Confirmation      │  │
//! │  │   Loader    │  │   Initiator  │  │    Verifier          │  │
//! │  └──────┬──────┘  └──────┬───────┘  └──────────┬───────────┘  │
//! │         └────────────────┼─────────────────────┘              │
//! │                 ┌────────▼─────────┐                          │
//! │                 │ CommerceProvider │  (Strategy)              │
//! │                 └──────────────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate has no runtime or HTTP dependency so the same types and the
//! buy-control latch compile into the WASM frontend.

pub mod catalog;
pub mod checkout;
pub mod confirmation;
pub mod error;
pub mod mock;
pub mod money;
pub mod provider;

pub use catalog::{CatalogItem, ProductDetail};
pub use checkout::{BuyControl, BuyOutcome, CheckoutEndpoint, CheckoutRequest, CheckoutResponse};
pub use confirmation::{Confirmation, ConfirmationPage, PurchaseSummary, PurchasedProduct};
pub use error::{Result, StorefrontError};
pub use mock::MockCommerceProvider;
pub use provider::{
    CheckoutUrls, CommerceProvider, PaymentStatus, ProviderLineItem, ProviderPrice,
    ProviderProduct, ProviderSession,
};
