//! Error Types

use thiserror::Error;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Storefront error types
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Payments provider call failed outright
    #[error("Provider error: {0}")]
    Provider(String),

    /// Product id unknown to the provider
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A required request parameter was absent or blank
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Request payload failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider data contradicts a business rule (e.g. paid session without a product)
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Checkout initiation failed on the client side
    #[error("Checkout failed: {0}")]
    Checkout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StorefrontError {
    /// Check if the caller may simply try again later
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorefrontError::Provider(_) | StorefrontError::Checkout(_))
    }

    /// Message safe to show to shoppers
    pub fn user_message(&self) -> &str {
        match self {
            StorefrontError::Provider(_) => "Não foi possível falar com o provedor de pagamentos.",
            StorefrontError::ProductNotFound(_) => "Produto não encontrado.",
            StorefrontError::MissingParameter(_) | StorefrontError::InvalidRequest(_) => {
                "Requisição inválida."
            }
            StorefrontError::Checkout(_) => "Erro ao realizar a compra, tente novamente mais tarde",
            StorefrontError::DataIntegrity(_) | StorefrontError::Config(_) => {
                "Ocorreu um erro inesperado."
            }
        }
    }
}
