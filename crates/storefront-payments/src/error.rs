//! Payment Error Types

use storefront_core::StorefrontError;
use stripe::StripeError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StripeError> for PaymentError {
    fn from(err: StripeError) -> Self {
        PaymentError::Stripe(err.to_string())
    }
}

impl From<PaymentError> for StorefrontError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Stripe(msg) => StorefrontError::Provider(msg),
            PaymentError::Config(msg) => StorefrontError::Config(msg),
        }
    }
}

/// Whether Stripe answered "no such object"
pub(crate) fn is_not_found(err: &StripeError) -> bool {
    matches!(err, StripeError::Stripe(request) if request.http_status == 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_storefront_error() {
        let err: StorefrontError = PaymentError::Stripe("boom".into()).into();
        assert!(matches!(err, StorefrontError::Provider(msg) if msg == "boom"));

        let err: StorefrontError = PaymentError::Config("STRIPE_SECRET_KEY not set".into()).into();
        assert!(matches!(err, StorefrontError::Config(_)));
    }

    #[test]
    fn test_transport_errors_are_not_not_found() {
        assert!(!is_not_found(&StripeError::Timeout));
        assert!(!is_not_found(&StripeError::ClientError("connection reset".into())));
    }
}
