//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{CatalogPage, ProductPage, SuccessPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <header class="header">
                <a href="/">"Ignite Shop"</a>
            </header>
            <main class="app">
                <Routes fallback=|| view! { <p>"Página não encontrada"</p> }>
                    <Route path=path!("/") view=CatalogPage />
                    <Route path=path!("/product/:id") view=ProductPage />
                    <Route path=path!("/success") view=SuccessPage />
                </Routes>
            </main>
        </Router>
    }
}
