use leptos::ev;
use leptos::prelude::*;

use crate::models::QueryResult;
use crate::state::AppState;

const QUERY_PLACEHOLDER: &str = "Examples:
- What did I discuss about travel last week?
- Summarize my conversations about machine learning
- What project ideas were suggested to me?
- What are the key topics from my recent chats?";

/// Questions answered from the history of past conversations.
#[component]
pub fn IntelligencePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.run_query();
        }
    };

    view! {
        <section class="page narrow">
            <header class="page-header with-mark">
                <span class="brand-mark large">"AI"</span>
                <div>
                    <h1>"Conversation Intelligence"</h1>
                    <p class="muted">"Ask questions about your past conversations"</p>
                </div>
            </header>

            <div class="card">
                <h3>"Ask a Question"</h3>
                <textarea
                    class="query-input"
                    rows="5"
                    placeholder=QUERY_PLACEHOLDER
                    prop:value=move || state.query_input.get()
                    on:input=move |ev| state.query_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="primary-btn wide"
                    on:click=move |_| state.run_query()
                    disabled=move || state.searching.get() || state.query_input.get().trim().is_empty()
                >
                    {move || if state.searching.get() { "Searching..." } else { "Search Conversations" }}
                </button>
            </div>

            {move || {
                let results = state.query_results.get();
                if results.is_empty() {
                    view! {
                        <div class="empty-state">
                            <h3>"No queries yet"</h3>
                            <p class="muted">"Ask a question about your past conversations to get started"</p>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="results">
                            {results
                                .into_iter()
                                .map(|result| view! { <QueryResultCard result=result /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn QueryResultCard(result: QueryResult) -> impl IntoView {
    let references = (!result.relevant_conversations.is_empty()).then(|| {
        view! {
            <div>
                <div class="result-label muted">"Referenced Conversations"</div>
                <div class="chips">
                    {result
                        .relevant_conversations
                        .into_iter()
                        .map(|label| view! { <span class="chip">{label}</span> })
                        .collect_view()}
                </div>
            </div>
        }
    });

    view! {
        <div class="card result-card">
            <div class="result-label accent">"Your Query"</div>
            <p>{result.query}</p>
            <div class="result-label accent">"AI Response"</div>
            <p class="pre-line">{result.response}</p>
            {references}
        </div>
    }
}
