//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use task_hub_core::{ApiClient, User};

use crate::route::Route;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// REST client; lives on the UI thread only
    api: StoredValue<ApiClient, LocalStorage>,
    /// Current view
    pub route: RwSignal<Route>,
    /// Signed-in user, `None` when signed out
    pub user: RwSignal<Option<User>>,
}

impl AppContext {
    pub fn new(api: ApiClient) -> Self {
        let user = api.session().user();
        Self {
            api: StoredValue::new_local(api),
            route: RwSignal::new(Route::Root),
            user: RwSignal::new(user),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Push a history entry and switch views.
    pub fn navigate(&self, route: Route) {
        let route = route.resolve(self.user.with_untracked(Option::is_some));
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.path())) {
                log::warn!("[NAV] pushState failed: {:?}", e);
            }
        }
        log::debug!("[NAV] -> {}", route.path());
        self.route.set(route);
    }

    /// Show a route without adding history, e.g. after popstate.
    pub fn show(&self, route: Route) {
        let resolved = route.clone().resolve(self.user.with_untracked(Option::is_some));
        if resolved != route {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&resolved.path()));
            }
        }
        self.route.set(resolved);
    }

    pub fn back(&self) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }

    pub fn signed_in(&self, user: User) {
        self.user.set(Some(user));
        self.navigate(Route::Dashboard);
    }

    pub fn sign_out(&self) {
        self.api().logout();
        self.user.set(None);
        self.navigate(Route::Login);
    }
}
