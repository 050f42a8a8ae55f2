//! Purchase Confirmation
//!
//! Decides what the success page does for an incoming `session_id`:
//!
//! | Outcome          | Trigger                                   | Page action          |
//! |------------------|-------------------------------------------|----------------------|
//! | `NoSession`      | query parameter absent                    | redirect to `/`      |
//! | `UnknownSession` | provider has no such session              | redirect to `/`      |
//! | `Unpaid`         | payment status is not `paid`              | redirect to `/`      |
//! | `MissingProduct` | paid, but no product on the line items    | data integrity error |
//! | `Confirmed`      | paid and product resolved                 | render confirmation  |
//!
//! Redirects are never permanent: the same URL may confirm later.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::provider::{CommerceProvider, PaymentStatus};

/// Label shown when the provider has no customer name
pub const FALLBACK_CUSTOMER_NAME: &str = "Cliente";

/// Where every negative outcome sends the shopper
pub const CATALOG_ROOT: &str = "/";

/// The product shown on the confirmation page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedProduct {
    pub name: String,
    pub image_url: Option<String>,
}

/// Everything the confirmation page renders
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    pub customer_name: String,
    pub product: PurchasedProduct,
}

/// A non-permanent redirect
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub destination: String,
    pub permanent: bool,
}

impl RedirectTarget {
    pub fn to_catalog() -> Self {
        Self {
            destination: CATALOG_ROOT.to_string(),
            permanent: false,
        }
    }
}

/// Result of verifying a checkout session, one variant per outcome
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    NoSession,
    UnknownSession { session_id: String },
    Unpaid { session_id: String, status: PaymentStatus },
    MissingProduct { session_id: String },
    Confirmed(PurchaseSummary),
}

impl Confirmation {
    /// Redirect this outcome calls for, if any
    pub fn redirect(&self) -> Option<RedirectTarget> {
        match self {
            Confirmation::NoSession
            | Confirmation::UnknownSession { .. }
            | Confirmation::Unpaid { .. } => Some(RedirectTarget::to_catalog()),
            Confirmation::MissingProduct { .. } | Confirmation::Confirmed(_) => None,
        }
    }

    /// Resolve into what the page shows; `MissingProduct` is fatal
    pub fn into_page(self) -> Result<ConfirmationPage> {
        match self {
            Confirmation::Confirmed(summary) => Ok(ConfirmationPage::Confirmed(summary)),
            Confirmation::MissingProduct { session_id } => Err(StorefrontError::DataIntegrity(
                format!("paid session {session_id} has no resolvable product"),
            )),
            Confirmation::NoSession
            | Confirmation::UnknownSession { .. }
            | Confirmation::Unpaid { .. } => {
                let target = RedirectTarget::to_catalog();
                Ok(ConfirmationPage::Redirect {
                    destination: target.destination,
                    permanent: target.permanent,
                })
            }
        }
    }
}

/// Wire form of the success page's data
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ConfirmationPage {
    Redirect { destination: String, permanent: bool },
    Confirmed(PurchaseSummary),
}

/// Verify the session named by the success page's `session_id` parameter.
///
/// Provider failures propagate; every negative-but-expected path is a
/// [`Confirmation`] variant instead.
pub async fn verify_purchase(
    provider: &dyn CommerceProvider,
    session_id: Option<&str>,
) -> Result<Confirmation> {
    let Some(session_id) = session_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(Confirmation::NoSession);
    };

    let Some(session) = provider.retrieve_checkout_session(session_id).await? else {
        tracing::info!(session_id, "Checkout session not found");
        return Ok(Confirmation::UnknownSession {
            session_id: session_id.to_string(),
        });
    };

    if session.payment_status != PaymentStatus::Paid {
        tracing::info!(
            session_id,
            status = session.payment_status.as_str(),
            "Checkout session not paid"
        );
        return Ok(Confirmation::Unpaid {
            session_id: session.id,
            status: session.payment_status,
        });
    }

    let Some(product) = session.line_items.first().and_then(|item| item.product.as_ref()) else {
        tracing::error!(session_id, "Paid checkout session has no product");
        return Ok(Confirmation::MissingProduct {
            session_id: session.id,
        });
    };

    let customer_name = session
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_CUSTOMER_NAME)
        .to_string();

    Ok(Confirmation::Confirmed(PurchaseSummary {
        customer_name,
        product: PurchasedProduct {
            name: product.name.clone(),
            image_url: product.images.first().cloned(),
        },
    }))
}
