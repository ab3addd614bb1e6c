//! Task Hub Frontend App
//!
//! Wires the browser adapters into the API client and switches pages on the
//! current route.

use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;

use task_hub_core::{config, ApiClient, KeyValueStore, MemoryStore, SessionContext};

use crate::browser::{BrowserNavigator, FetchTransport, LocalStorageStore};
use crate::components::Navbar;
use crate::context::AppContext;
use crate::pages::{DashboardPage, LoginPage, ProjectsPage, SignupPage, TaskBoardPage, TaskDetailPage};
use crate::route::Route;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn build_client() -> ApiClient {
    let store: Rc<dyn KeyValueStore> = if LocalStorageStore::available() {
        Rc::new(LocalStorageStore)
    } else {
        log::warn!("[APP] localStorage unavailable, session will not survive a reload");
        Rc::new(MemoryStore::new())
    };
    let session = SessionContext::new(store);
    if session.load().is_some() {
        log::info!("[APP] Restored saved session");
    }
    ApiClient::new(
        config().clone(),
        Rc::new(FetchTransport::new()),
        Rc::new(BrowserNavigator),
        session,
    )
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(build_client());
    provide_context(ctx);

    ctx.show(Route::parse(&current_path()));

    // Back/forward buttons
    let _ = window_event_listener(ev::popstate, move |_| ctx.show(Route::parse(&current_path())));

    view! {
        <div class="app-layout">
            <Show when=move || ctx.is_authenticated()>
                <Navbar />
            </Show>
            <main class="main-content">
                {move || match ctx.route.get() {
                    Route::Login => view! { <LoginPage /> }.into_any(),
                    Route::Signup => view! { <SignupPage /> }.into_any(),
                    Route::Dashboard | Route::Root => view! { <DashboardPage /> }.into_any(),
                    Route::Projects => view! { <ProjectsPage /> }.into_any(),
                    Route::TaskBoard(id) => view! { <TaskBoardPage project_id=id /> }.into_any(),
                    Route::TaskDetail(id) => view! { <TaskDetailPage task_id=id /> }.into_any(),
                }}
            </main>
        </div>
    }
}
