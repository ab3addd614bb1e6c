//! List Controls
//!
//! Sort headers, search box and pager driving a shared `ListQuery` signal.

use leptos::prelude::*;

use task_hub_core::listing::showing;
use task_hub_core::ListQuery;

/// Clickable column header with a sort arrow.
#[component]
pub fn SortHeader(query: RwSignal<ListQuery>, field: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <th class="sortable" on:click=move |_| query.update(|q| q.toggle_sort(field))>
            <span>{label}</span>
            <span class="sort-arrow">{move || query.with(|q| q.indicator(field))}</span>
        </th>
    }
}

#[component]
pub fn SearchBox(query: RwSignal<ListQuery>, #[prop(into)] placeholder: String) -> impl IntoView {
    view! {
        <input
            type="text"
            class="input search-input"
            placeholder=placeholder
            prop:value=move || query.with(|q| q.search.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                query.update(|q| q.set_search(&value));
            }
        />
    }
}

/// Status or priority filter; the empty option clears it.
#[component]
pub fn FilterSelect(
    query: RwSignal<ListQuery>,
    #[prop(into)] all_label: String,
    options: &'static [&'static str],
    priority: bool,
) -> impl IntoView {
    let current = move || {
        query.with(|q| if priority { q.priority.clone() } else { q.status.clone() }).unwrap_or_default()
    };
    view! {
        <select
            class="input filter-select"
            prop:value=current
            on:change=move |ev| {
                let value = event_target_value(&ev);
                query.update(|q| if priority { q.set_priority(&value) } else { q.set_status(&value) });
            }
        >
            <option value="">{all_label}</option>
            {options
                .iter()
                .map(|o| view! { <option value=*o>{o.replace('_', " ")}</option> })
                .collect_view()}
        </select>
    }
}

/// "Showing a to b of n" with previous/next buttons. Hidden for a single page.
#[component]
pub fn Pagination(
    query: RwSignal<ListQuery>,
    /// `(page, total_pages, total)` of the current result
    #[prop(into)]
    position: Signal<(usize, usize, usize)>,
    noun: &'static str,
) -> impl IntoView {
    view! {
        <Show when=move || (position.get().1 > 1)>
            <div class="pagination">
                <div class="pagination-info">
                    {move || {
                        let (page, _, total) = position.get();
                        let size = query.with(|q| q.page_size);
                        let (start, end) = showing(page, size, total);
                        format!("Showing {} to {} of {} {}", start, end, total, noun)
                    }}
                </div>
                <div class="pagination-buttons">
                    <button
                        class="btn-sm"
                        prop:disabled=move || position.get().0 <= 1
                        on:click=move |_| query.update(|q| q.prev_page())
                    >
                        "← Previous"
                    </button>
                    <span>{move || format!("Page {} of {}", position.get().0, position.get().1)}</span>
                    <button
                        class="btn-sm"
                        prop:disabled=move || position.get().0 >= position.get().1
                        on:click=move |_| {
                            let total_pages = position.get_untracked().1;
                            query.update(|q| q.next_page(total_pages));
                        }
                    >
                        "Next →"
                    </button>
                </div>
            </div>
        </Show>
    }
}
