//! Navigation Bar Component
//!
//! Top bar with page links, the profile editor and logout.

use leptos::prelude::*;

use task_hub_core::forms;
use task_hub_core::models::ProfileUpdate;

use crate::components::{Modal, TextField};
use crate::context::AppContext;
use crate::hooks::use_form;
use crate::route::Route;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (profile_open, set_profile_open) = signal(false);

    let email = move || ctx.user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <nav class="navbar">
            <div class="navbar-left">
                <button class="navbar-brand" on:click=move |_| ctx.navigate(Route::Root)>"📋 Task Hub"</button>
                <div class="navbar-links">
                    <button class="nav-link" on:click=move |_| ctx.navigate(Route::Dashboard)>"Dashboard"</button>
                    <button class="nav-link" on:click=move |_| ctx.navigate(Route::Projects)>"Projects"</button>
                </div>
            </div>
            <div class="navbar-right">
                <button class="navbar-user" on:click=move |_| set_profile_open.set(true)>
                    <span>"👤"</span>
                    <span>{email}</span>
                </button>
                <button class="btn-secondary" on:click=move |_| ctx.sign_out()>"Logout"</button>
            </div>
        </nav>
        <Modal open=profile_open title="Edit Profile" on_close=move |_| set_profile_open.set(false)>
            <ProfileForm on_close=move |_| set_profile_open.set(false) />
        </Modal>
    }
}

/// Display-name editor. Email is read-only.
#[component]
fn ProfileForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);
    let user = ctx.user.get_untracked();

    let form = use_form(forms::profile_form(user.as_ref()), move |values| async move {
        set_submit_error.set(None);
        let update = ProfileUpdate {
            name: values.get("name").cloned().unwrap_or_default(),
        };
        match ctx.api().update_profile(&update).await {
            Ok(updated) => {
                ctx.user.set(Some(updated));
                on_close.run(());
                Ok(())
            }
            Err(e) => {
                let message = e.payload().and_then(|p| p.message.clone());
                set_submit_error.set(Some(message.unwrap_or_else(|| "Failed to update profile".to_string())));
                Err(e.to_string())
            }
        }
    });

    let cancel = move |_| {
        form.reset();
        set_submit_error.set(None);
        on_close.run(());
    };

    view! {
        <form class="entity-form" on:submit=move |ev| form.submit(ev)>
            <div class="form-field">
                <label>"Email Address"</label>
                <div class="readonly-field">
                    <p>{user.as_ref().map(|u| u.email.clone()).unwrap_or_else(|| "No email".to_string())}</p>
                    <p class="hint">"Email cannot be changed"</p>
                </div>
            </div>
            <TextField
                form=form
                name="name"
                label="Display Name (Optional)"
                placeholder="Enter your name"
                max_length=forms::PROFILE_NAME_MAX
            />
            {move || submit_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
            <div class="form-actions">
                <button type="button" class="btn-secondary" on:click=cancel>"Cancel"</button>
                <button type="submit" class="btn-primary" prop:disabled=move || form.is_submitting()>
                    {move || if form.is_submitting() { "Saving..." } else { "Save Changes" }}
                </button>
            </div>
        </form>
    }
}
