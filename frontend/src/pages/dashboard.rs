use leptos::prelude::*;

use crate::components::conversation_card::ConversationCard;
use crate::state::AppState;

/// Lists past conversations with a search box over title and summary.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Refresh on every visit
    state.load_conversations();

    view! {
        <section class="page">
            <header class="page-header">
                <h1>"Conversations"</h1>
                <p class="muted">"View and search through your past conversations"</p>
            </header>

            <input
                type="text"
                class="search-input"
                placeholder="Search conversations..."
                prop:value=move || state.search.get()
                on:input=move |ev| state.search.set(event_target_value(&ev))
            />

            {move || {
                if state.loading.get() {
                    view! { <div class="placeholder">"Loading conversations..."</div> }.into_any()
                } else if let Some(err) = state.load_error.get() {
                    view! {
                        <div class="placeholder error">{format!("Failed to load: {err}")}</div>
                    }
                        .into_any()
                } else {
                    let convos = state.filtered();
                    if convos.is_empty() {
                        view! { <div class="placeholder">"No conversations found"</div> }.into_any()
                    } else {
                        view! {
                            <div class="card-list">
                                {convos
                                    .into_iter()
                                    .map(|conversation| view! { <ConversationCard conversation=conversation /> })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }
            }}
        </section>
    }
}
