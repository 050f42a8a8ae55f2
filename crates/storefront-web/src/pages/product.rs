//! Product Page

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use storefront_core::{checkout, BuyControl, ProductDetail, StorefrontError};

use crate::api::{self, HttpCheckoutEndpoint};

/// The "Comprar agora" button and the window around it
#[derive(Clone, Copy)]
struct PageBuyControl {
    disabled: RwSignal<bool>,
}

impl BuyControl for PageBuyControl {
    fn is_disabled(&self) -> bool {
        self.disabled.get_untracked()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn log_error(&self, error: &StorefrontError) {
        leptos::logging::error!("checkout failed: {error}");
    }
}

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let product = RwSignal::new(None::<ProductDetail>);
    let error = RwSignal::new(None::<String>);
    let control = PageBuyControl {
        disabled: RwSignal::new(false),
    };

    Effect::new(move |_| {
        let product_id = params.read().get("id").unwrap_or_default();
        product.set(None);
        error.set(None);

        leptos::task::spawn_local(async move {
            match api::fetch_product(&product_id).await {
                Ok(detail) => product.set(Some(detail)),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let buy = move |price_id: String| {
        leptos::task::spawn_local(async move {
            checkout::initiate_checkout(&HttpCheckoutEndpoint, &control, &price_id).await;
        });
    };

    move || match (product.get(), error.get()) {
        (_, Some(e)) => view! { <p class="error">{e}</p> }.into_any(),
        (None, None) => view! { <p class="loading">"Carregando..."</p> }.into_any(),
        (Some(detail), None) => {
            let purchasable = detail.is_purchasable();
            let price_id = detail.default_price_id.clone().unwrap_or_default();

            view! {
                <div class="product-page">
                    <div class="image-container">
                        {detail.image_url.map(|src| view! { <img src=src width="520" height="480" alt="" /> })}
                    </div>
                    <div class="product-details">
                        <h1>{detail.name}</h1>
                        <span class="price">{detail.formatted_price.unwrap_or_default()}</span>
                        <p>{detail.description}</p>
                        <button
                            class="btn btn-primary"
                            disabled=move || control.disabled.get() || !purchasable
                            on:click=move |_| buy(price_id.clone())
                        >
                            "Comprar agora"
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}
