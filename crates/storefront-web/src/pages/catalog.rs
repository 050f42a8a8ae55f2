//! Catalog Page

use leptos::prelude::*;
use storefront_core::CatalogItem;

use crate::api;
use crate::components::ProductCard;

#[component]
pub fn CatalogPage() -> impl IntoView {
    let (items, set_items) = signal(Vec::<CatalogItem>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    leptos::task::spawn_local(async move {
        match api::fetch_catalog().await {
            Ok(catalog) => set_items.set(catalog),
            Err(e) => set_error.set(Some(e)),
        }
        set_loading.set(false);
    });

    view! {
        <div class="catalog">
            <Show when=move || loading.get()>
                <p class="loading">"Carregando..."</p>
            </Show>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <For
                each=move || items.get()
                key=|item| item.id.clone()
                children=move |item| view! { <ProductCard item=item /> }
            />
        </div>
    }
}
