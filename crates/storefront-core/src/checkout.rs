//! Checkout Initiation
//!
//! Two halves of the same exchange:
//!
//! - [`start_checkout`] runs on the server and asks the provider for a hosted
//!   checkout session.
//! - [`initiate_checkout`] runs behind the product page's buy control. It
//!   latches the control while the request is in flight, navigates to the
//!   hosted page on success, and recovers locally on failure.
//!
//! ```text
//! ┌──────────────┐  {priceId}   ┌──────────────┐   create    ┌─────────────┐
//! │ Buy control  │─────────────▶│ /api/checkout│────────────▶│  Provider   │
//! │ (disabled)   │◀─────────────│              │◀────────────│  (hosted)   │
//! └──────────────┘ {checkoutUrl}└──────────────┘             └─────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::provider::{CheckoutUrls, CommerceProvider};

/// Alert shown when checkout cannot be started
pub const CHECKOUT_FAILED_ALERT: &str = "Erro ao realizar a compra, tente novamente mais tarde";

/// Client-to-server payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: String,
}

/// Server-to-client payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Hosted checkout page to send the browser to
    pub checkout_url: String,
}

/// Create a hosted checkout session for one unit of the requested price
pub async fn start_checkout(
    provider: &dyn CommerceProvider,
    request: &CheckoutRequest,
    urls: &CheckoutUrls,
) -> Result<CheckoutResponse> {
    let price_id = request.price_id.trim();
    if price_id.is_empty() {
        return Err(StorefrontError::InvalidRequest("priceId is required".into()));
    }

    let response = provider.create_checkout_session(price_id, urls).await?;

    tracing::info!(provider = provider.name(), price_id, "Checkout session created");

    Ok(response)
}

/// The Checkout Session Creator, as seen from the browser
#[async_trait(?Send)]
pub trait CheckoutEndpoint {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse>;
}

/// The buy control and the page around it
pub trait BuyControl {
    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    /// Leave the storefront for an external URL
    fn navigate(&self, url: &str);

    /// User-visible failure notice
    fn alert(&self, message: &str);

    /// Operator-visible failure record
    fn log_error(&self, error: &StorefrontError);
}

/// What a click on the buy control ended in
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuyOutcome {
    /// Browser sent to the hosted checkout page
    Redirected(String),

    /// Request failed; the control is usable again
    Failed,

    /// A previous click is still in flight; nothing was sent
    AlreadyInFlight,
}

/// Handle one click on the buy control.
///
/// The control stays disabled from before the request until the browser
/// leaves the page. Only a failure re-enables it.
pub async fn initiate_checkout<E, C>(endpoint: &E, control: &C, price_id: &str) -> BuyOutcome
where
    E: CheckoutEndpoint + ?Sized,
    C: BuyControl + ?Sized,
{
    if control.is_disabled() {
        return BuyOutcome::AlreadyInFlight;
    }
    control.set_disabled(true);

    let request = CheckoutRequest {
        price_id: price_id.to_string(),
    };

    match endpoint.create_checkout(&request).await {
        Ok(response) => {
            control.navigate(&response.checkout_url);
            BuyOutcome::Redirected(response.checkout_url)
        }
        Err(err) => {
            control.set_disabled(false);
            control.alert(CHECKOUT_FAILED_ALERT);
            control.log_error(&err);
            BuyOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockCommerceProvider;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingControl {
        disabled: Cell<bool>,
        navigations: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl BuyControl for RecordingControl {
        fn is_disabled(&self) -> bool {
            self.disabled.get()
        }

        fn set_disabled(&self, disabled: bool) {
            self.disabled.set(disabled);
        }

        fn navigate(&self, url: &str) {
            self.navigations.borrow_mut().push(url.to_string());
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn log_error(&self, error: &StorefrontError) {
            self.errors.borrow_mut().push(error.to_string());
        }
    }

    /// Endpoint that observes the control while the request is "in flight"
    struct ObservingEndpoint {
        control: Rc<RecordingControl>,
        result: std::result::Result<String, String>,
        seen_price: RefCell<Option<String>>,
        disabled_during_call: Cell<Option<bool>>,
    }

    impl ObservingEndpoint {
        fn new(control: Rc<RecordingControl>, result: std::result::Result<&str, &str>) -> Self {
            Self {
                control,
                result: result.map(str::to_string).map_err(str::to_string),
                seen_price: RefCell::new(None),
                disabled_during_call: Cell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl CheckoutEndpoint for ObservingEndpoint {
        async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse> {
            self.disabled_during_call.set(Some(self.control.is_disabled()));
            *self.seen_price.borrow_mut() = Some(request.price_id.clone());
            match &self.result {
                Ok(url) => Ok(CheckoutResponse {
                    checkout_url: url.clone(),
                }),
                Err(msg) => Err(StorefrontError::Checkout(msg.clone())),
            }
        }
    }

    #[tokio::test]
    async fn test_success_navigates_and_keeps_control_disabled() {
        let control = Rc::new(RecordingControl::default());
        let endpoint = ObservingEndpoint::new(control.clone(), Ok("https://checkout.example/cs_1"));

        let outcome = initiate_checkout(&endpoint, control.as_ref(), "price_123").await;

        assert_eq!(outcome, BuyOutcome::Redirected("https://checkout.example/cs_1".into()));
        assert_eq!(endpoint.seen_price.borrow().as_deref(), Some("price_123"));
        assert_eq!(endpoint.disabled_during_call.get(), Some(true));
        assert!(control.is_disabled());
        assert_eq!(*control.navigations.borrow(), vec!["https://checkout.example/cs_1".to_string()]);
        assert!(control.alerts.borrow().is_empty());
        assert!(control.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_reenables_and_logs_once() {
        let control = Rc::new(RecordingControl::default());
        let endpoint = ObservingEndpoint::new(control.clone(), Err("502 Bad Gateway"));

        let outcome = initiate_checkout(&endpoint, control.as_ref(), "price_123").await;

        assert_eq!(outcome, BuyOutcome::Failed);
        assert_eq!(endpoint.disabled_during_call.get(), Some(true));
        assert!(!control.is_disabled());
        assert!(control.navigations.borrow().is_empty());
        assert_eq!(*control.alerts.borrow(), vec![CHECKOUT_FAILED_ALERT.to_string()]);
        assert_eq!(control.errors.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_click_while_in_flight_is_ignored() {
        let control = Rc::new(RecordingControl::default());
        control.set_disabled(true);
        let endpoint = ObservingEndpoint::new(control.clone(), Ok("https://checkout.example/cs_1"));

        let outcome = initiate_checkout(&endpoint, control.as_ref(), "price_123").await;

        assert_eq!(outcome, BuyOutcome::AlreadyInFlight);
        assert_eq!(endpoint.disabled_during_call.get(), None);
        assert!(control.navigations.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_start_checkout_forwards_price() {
        let provider = MockCommerceProvider::new();
        let urls = CheckoutUrls::for_base_url("http://localhost:3000");
        let request = CheckoutRequest {
            price_id: "price_123".into(),
        };

        let response = start_checkout(&provider, &request, &urls).await.unwrap();

        assert!(response.checkout_url.contains("price_123"));
        assert_eq!(provider.created_checkouts(), vec!["price_123".to_string()]);
    }

    #[tokio::test]
    async fn test_start_checkout_rejects_blank_price() {
        let provider = MockCommerceProvider::new();
        let urls = CheckoutUrls::for_base_url("http://localhost:3000");
        let request = CheckoutRequest {
            price_id: " ".into(),
        };

        let result = start_checkout(&provider, &request, &urls).await;

        assert!(matches!(result, Err(StorefrontError::InvalidRequest(_))));
        assert!(provider.created_checkouts().is_empty());
    }

    #[test]
    fn test_payload_wire_format() {
        let request: CheckoutRequest = serde_json::from_str(r#"{"priceId":"price_123"}"#).unwrap();
        assert_eq!(request.price_id, "price_123");

        let response = CheckoutResponse {
            checkout_url: "https://checkout.example/cs_1".into(),
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"checkoutUrl":"https://checkout.example/cs_1"}"#
        );
    }
}
