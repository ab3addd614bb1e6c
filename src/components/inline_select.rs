//! Inline Select Component
//!
//! A bare `<select>` that reports the picked value. Clicks do not reach the
//! row underneath, so table rows can stay clickable.

use leptos::prelude::*;

#[component]
pub fn InlineSelect(
    #[prop(into)] value: String,
    options: Vec<(String, String)>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    view! {
        <select
            class=format!("inline-select {}", class)
            prop:value=value.clone()
            on:click=|ev| ev.stop_propagation()
            on:change=move |ev| {
                let picked = event_target_value(&ev);
                if picked != value {
                    on_change.run(picked);
                }
            }
        >
            {options
                .into_iter()
                .map(|(v, label)| view! { <option value=v>{label}</option> })
                .collect_view()}
        </select>
    }
}

/// Assignee choices, led by an "Unassigned" entry.
pub fn assignee_options(users: &[task_hub_core::User]) -> Vec<(String, String)> {
    let mut options = vec![(String::new(), "Unassigned".to_string())];
    options.extend(users.iter().map(|u| (u.id.to_string(), u.email.clone())));
    options
}
