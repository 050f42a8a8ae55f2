//! Router

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{confirm_purchase, create_checkout, health_check, list_catalog, product_detail};
use crate::state::AppState;

/// API routes plus the WASM frontend, with `index.html` answering every
/// client-side route (`/product/:id`, `/success`, ...)
pub fn router(state: AppState, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        // Health & info
        .route("/health", get(health_check))

        // Storefront API
        .route("/api/products", get(list_catalog))
        .route("/api/products/{id}", get(product_detail))
        .route("/api/checkout", post(create_checkout))
        .route("/api/confirmation", get(confirm_purchase))

        // Static files (WASM frontend)
        .fallback_service(frontend)

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use storefront_core::{
        MockCommerceProvider, PaymentStatus, ProviderLineItem, ProviderPrice, ProviderProduct,
        ProviderSession,
    };

    use crate::config::Config;

    fn camiseta(id: &str, name: &str, unit_amount: Option<i64>) -> ProviderProduct {
        ProviderProduct {
            id: id.into(),
            name: name.into(),
            images: vec![format!("https://files.stripe.com/{id}.png")],
            description: Some("Camiseta 100% algodão".into()),
            default_price: Some(ProviderPrice {
                id: format!("price_{id}"),
                unit_amount,
            }),
        }
    }

    fn paid_session(id: &str, customer: Option<&str>, product: Option<ProviderProduct>) -> ProviderSession {
        ProviderSession {
            id: id.into(),
            payment_status: PaymentStatus::Paid,
            customer_name: customer.map(str::to_string),
            line_items: vec![ProviderLineItem { product }],
        }
    }

    fn mock_provider() -> MockCommerceProvider {
        MockCommerceProvider::new()
            .with_product(camiseta("prod_a", "Camiseta Beyond", Some(7990)))
            .with_product(camiseta("prod_b", "Camiseta Explorer", None))
            .with_session(ProviderSession {
                id: "cs_unpaid".into(),
                payment_status: PaymentStatus::Unpaid,
                customer_name: Some("Maria".into()),
                line_items: vec![],
            })
            .with_session(paid_session("cs_paid", Some("Maria"), Some(camiseta("prod_c", "Camiseta", None))))
            .with_session(paid_session("cs_paid_nocustomer", None, Some(camiseta("prod_c", "Camiseta", None))))
            .with_session(paid_session("cs_paid_noproduct", Some("Maria"), None))
    }

    fn app_with(provider: Arc<MockCommerceProvider>) -> Router {
        let config = Config::from_lookup(|key| match key {
            "BASE_URL" => Some("https://loja.example".into()),
            _ => None,
        })
        .unwrap();
        router(AppState::new(provider, &config), "static-does-not-exist")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["provider"], "MockProvider");
    }

    #[tokio::test]
    async fn test_catalog_lists_products_in_order() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/api/products")).await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "prod_a");
        assert_eq!(items[0]["formattedPrice"], "R$\u{a0}79,90");
        assert_eq!(items[1]["id"], "prod_b");
        assert!(items[1]["formattedPrice"].is_null());
    }

    #[tokio::test]
    async fn test_catalog_is_cached_between_requests() {
        let provider = Arc::new(mock_provider());
        let app = app_with(provider.clone());

        send(app.clone(), get_request("/api/products")).await;
        send(app, get_request("/api/products")).await;

        assert_eq!(provider.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_catalog_provider_failure_is_bad_gateway() {
        let app = app_with(Arc::new(MockCommerceProvider::unavailable()));
        let (status, body) = send(app, get_request("/api/products")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "PROVIDER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_product_detail() {
        let provider = Arc::new(mock_provider());
        let app = app_with(provider.clone());

        let (status, body) = send(app.clone(), get_request("/api/products/prod_a")).await;
        send(app, get_request("/api/products/prod_a")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["defaultPriceId"], "price_prod_a");
        assert_eq!(body["description"], "Camiseta 100% algodão");
        assert_eq!(provider.retrieve_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/api/products/prod_missing")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_checkout_returns_url() {
        let provider = Arc::new(mock_provider());
        let app = app_with(provider.clone());

        let (status, body) = send(app, post_json("/api/checkout", &json!({"priceId": "price_123"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["checkoutUrl"].as_str().unwrap().ends_with("/price_123"));
        assert_eq!(provider.created_checkouts(), vec!["price_123".to_string()]);
    }

    #[tokio::test]
    async fn test_checkout_without_price_is_bad_request() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, post_json("/api/checkout", &json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_confirmation_without_session_redirects() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/api/confirmation")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"outcome": "redirect", "destination": "/", "permanent": false}));
    }

    #[tokio::test]
    async fn test_confirmation_unpaid_redirects() {
        let app = app_with(Arc::new(mock_provider()));
        let (_, body) = send(app, get_request("/api/confirmation?session_id=cs_unpaid")).await;

        assert_eq!(body["outcome"], "redirect");
        assert_eq!(body["destination"], "/");
    }

    #[tokio::test]
    async fn test_confirmation_paid_renders_customer_and_product() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/api/confirmation?session_id=cs_paid")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "confirmed");
        assert_eq!(body["customerName"], "Maria");
        assert_eq!(body["product"]["name"], "Camiseta");
    }

    #[tokio::test]
    async fn test_confirmation_without_customer_uses_fallback() {
        let app = app_with(Arc::new(mock_provider()));
        let (_, body) = send(app, get_request("/api/confirmation?session_id=cs_paid_nocustomer")).await;

        assert_eq!(body["customerName"], "Cliente");
    }

    #[tokio::test]
    async fn test_confirmation_without_product_is_server_error() {
        let app = app_with(Arc::new(mock_provider()));
        let (status, body) = send(app, get_request("/api/confirmation?session_id=cs_paid_noproduct")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "DATA_INTEGRITY");
    }
}
