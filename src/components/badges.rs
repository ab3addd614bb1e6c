//! Status and priority badges

use leptos::prelude::*;

fn status_class(status: &str) -> &'static str {
    match status {
        "DONE" => "badge badge-done",
        "IN_PROGRESS" => "badge badge-progress",
        _ => "badge badge-open",
    }
}

fn priority_class(priority: &str) -> &'static str {
    match priority {
        "HIGH" => "badge badge-high",
        "MEDIUM" => "badge badge-medium",
        _ => "badge badge-low",
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    view! { <span class=status_class(&status)>{status.replace('_', " ")}</span> }
}

#[component]
pub fn PriorityBadge(#[prop(into)] priority: String) -> impl IntoView {
    view! { <span class=priority_class(&priority)>{priority.clone()}</span> }
}
