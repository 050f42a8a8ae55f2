//! UI Components

use leptos::prelude::*;
use storefront_core::CatalogItem;

/// Catalog entry linking to its product page
#[component]
pub fn ProductCard(item: CatalogItem) -> impl IntoView {
    let href = format!("/product/{}", item.id);

    view! {
        <a class="product" href=href>
            {item.image_url.map(|src| view! { <img src=src width="520" height="480" alt="" /> })}
            <footer>
                <strong>{item.name}</strong>
                <span>{item.formatted_price.unwrap_or_default()}</span>
            </footer>
        </a>
    }
}
