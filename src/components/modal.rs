//! Modal and Confirm Dialog Components

use leptos::prelude::*;

/// Sets `body` overflow so the page behind a dialog does not scroll.
fn lock_scroll(locked: bool) {
    let body = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body());
    if let Some(body) = body {
        let value = if locked { "hidden" } else { "unset" };
        let _ = body.style().set_property("overflow", value);
    }
}

#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    Effect::new(move |_| lock_scroll(open.get()));
    on_cleanup(|| lock_scroll(false));

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <div class="modal">
                    <div class="modal-header">
                        <h2>{title.clone()}</h2>
                        <button class="modal-close" on:click=move |_| on_close.run(())>"✕"</button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}

/// Yes/no confirmation before a destructive action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(default = "Delete")] confirm_text: &'static str,
    #[prop(default = true)] danger: bool,
) -> impl IntoView {
    Effect::new(move |_| lock_scroll(open.get()));
    on_cleanup(|| lock_scroll(false));

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <div class="modal modal-small">
                    <div class="modal-header">
                        <h2>{title.clone()}</h2>
                    </div>
                    <div class="modal-body">
                        <p>{move || message.get()}</p>
                    </div>
                    <div class="modal-footer">
                        <button class="btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                        <button
                            class=if danger { "btn-danger" } else { "btn-primary" }
                            on:click=move |_| on_confirm.run(())
                        >
                            {confirm_text}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
