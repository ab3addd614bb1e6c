//! Loading and error panels

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{label.unwrap_or_else(|| "Loading...".to_string())}</p>
        </div>
    }
}

/// Inline error panel
#[component]
pub fn ErrorMessage(#[prop(into)] message: Signal<String>) -> impl IntoView {
    view! {
        <div class="error-panel">
            <p class="error-title">"Error"</p>
            <p class="error-text">
                {move || {
                    let message = message.get();
                    if message.is_empty() { "An error occurred".to_string() } else { message }
                }}
            </p>
        </div>
    }
}
