use leptos::prelude::*;

use crate::state::{AppState, ToastVariant};

/// Stack of transient notifications in the corner of the screen.
#[component]
pub fn ToastHost() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toast-host">
            <For
                each=move || state.toasts.get()
                key=|t| t.id
                let:toast
            >
                {
                    let id = toast.id;
                    let css_class = match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast destructive",
                    };
                    view! {
                        <div class=css_class on:click=move |_| state.dismiss(id)>
                            <div class="toast-title">{toast.title.clone()}</div>
                            <div class="toast-description">{toast.description.clone()}</div>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
