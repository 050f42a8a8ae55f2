//! Purchase Confirmation Page

use leptos::prelude::*;
use leptos_router::{hooks::{use_navigate, use_query_map}, NavigateOptions};
use storefront_core::{ConfirmationPage, PurchaseSummary};

use crate::api;

#[component]
pub fn SuccessPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();
    let summary = RwSignal::new(None::<PurchaseSummary>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let session_id = query.read().get("session_id");
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match api::fetch_confirmation(session_id.as_deref()).await {
                Ok(ConfirmationPage::Redirect { destination, .. }) => {
                    navigate(
                        &destination,
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Ok(ConfirmationPage::Confirmed(purchase)) => summary.set(Some(purchase)),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    move || match (summary.get(), error.get()) {
        (_, Some(e)) => view! { <p class="error">{e}</p> }.into_any(),
        (None, None) => view! { <p class="loading">"Carregando..."</p> }.into_any(),
        (Some(purchase), None) => view! {
            <div class="success">
                <h1>"Compra realizada com sucesso!"</h1>
                {purchase.product.image_url.map(|src| view! {
                    <div class="image-container">
                        <img src=src width="120" height="110" alt="" />
                    </div>
                })}
                <p>
                    "Uhuul "<strong>{purchase.customer_name}</strong>", sua "
                    <strong>{purchase.product.name}</strong>" está a caminho! 🚀"
                </p>
                <a href="/">"Voltar ao catálogo"</a>
            </div>
        }
        .into_any(),
    }
}
