mod api;
mod chat;
mod components;
mod config;
mod filter;
mod models;
mod pages;
mod session;
mod state;
mod timeline;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use components::navigation::Navigation;
use components::toast::ToastHost;
use pages::chat::ChatPage;
use pages::conversation_detail::ConversationDetailPage;
use pages::dashboard::DashboardPage;
use pages::intelligence::IntelligencePage;
use pages::PageNotFound;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    AppState::provide();

    view! {
        <Router>
            <div class="app-container">
                <Navigation />
                <main class="content">
                    <Routes fallback=|| view! { <PageNotFound /> }>
                        <Route path=path!("/") view=DashboardPage />
                        <Route path=path!("/chat") view=ChatPage />
                        <Route path=path!("/intelligence") view=IntelligencePage />
                        <Route path=path!("/conversation/:id") view=ConversationDetailPage />
                    </Routes>
                </main>
                <ToastHost />
            </div>
        </Router>
    }
}

fn main() {
    console_log::init_with_level(config::log_level()).expect("Failed to init logger");
    mount_to_body(App);
}
