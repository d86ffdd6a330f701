use leptos::prelude::*;
use leptos_router::hooks::use_location;

const LINKS: [(&str, &str); 3] = [
    ("/", "Dashboard"),
    ("/chat", "New Chat"),
    ("/intelligence", "Intelligence"),
];

/// Top bar with the portal name and links to every page.
#[component]
pub fn Navigation() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="navbar">
            <div class="brand">
                <span class="brand-mark">"AI"</span>
                <span class="brand-name">"AI Chat Portal"</span>
            </div>
            <div class="nav-links">
                {LINKS
                    .into_iter()
                    .map(|(to, label)| {
                        view! {
                            <a
                                href=to
                                class="nav-link"
                                class:active=move || pathname.get() == to
                            >
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
