//! API Client

use async_trait::async_trait;

use storefront_core::{
    CatalogItem, CheckoutEndpoint, CheckoutRequest, CheckoutResponse, ConfirmationPage,
    ProductDetail, Result, StorefrontError,
};

/// Absolute URL for an API path on the serving origin
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

/// Error text from a failed response, falling back to the status line
async fn failure_message(response: reqwest::Response) -> String {
    let status = response.status();
    let data: serde_json::Value = response.json().await.unwrap_or_default();
    data["error"]
        .as_str()
        .map_or_else(|| format!("Request failed: {status}"), str::to_string)
}

/// Catalog for the home page
pub async fn fetch_catalog() -> std::result::Result<Vec<CatalogItem>, String> {
    let response = reqwest::Client::new()
        .get(api_url("/api/products"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(failure_message(response).await)
    }
}

/// One product for the product page
pub async fn fetch_product(product_id: &str) -> std::result::Result<ProductDetail, String> {
    let response = reqwest::Client::new()
        .get(api_url(&format!("/api/products/{product_id}")))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(failure_message(response).await)
    }
}

/// What the success page should do for `session_id`
pub async fn fetch_confirmation(
    session_id: Option<&str>,
) -> std::result::Result<ConfirmationPage, String> {
    let mut request = reqwest::Client::new().get(api_url("/api/confirmation"));
    if let Some(id) = session_id {
        request = request.query(&[("session_id", id)]);
    }

    let response = request.send().await.map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(failure_message(response).await)
    }
}

/// `POST /api/checkout` on the serving origin
pub struct HttpCheckoutEndpoint;

#[async_trait(?Send)]
impl CheckoutEndpoint for HttpCheckoutEndpoint {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse> {
        let response = reqwest::Client::new()
            .post(api_url("/api/checkout"))
            .json(request)
            .send()
            .await
            .map_err(|e| StorefrontError::Checkout(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| StorefrontError::Checkout(e.to_string()))
        } else {
            Err(StorefrontError::Checkout(failure_message(response).await))
        }
    }
}
