pub mod chat;
pub mod conversation_detail;
pub mod dashboard;
pub mod intelligence;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Returns to the dashboard.
#[component]
pub fn BackButton() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <button class="ghost-btn" on:click=move |_| navigate("/", Default::default())>
            "← Back to Dashboard"
        </button>
    }
}

/// Shown for paths no route matches.
#[component]
pub fn PageNotFound() -> impl IntoView {
    view! {
        <section class="page not-found">
            <h1>"Page Not Found"</h1>
            <BackButton />
        </section>
    }
}
