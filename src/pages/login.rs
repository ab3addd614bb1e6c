//! Login Page

use leptos::prelude::*;

use task_hub_core::forms;

use crate::components::{ErrorMessage, TextField};
use crate::context::AppContext;
use crate::hooks::use_form;
use crate::route::Route;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (api_error, set_api_error) = signal(String::new());

    let form = use_form(forms::login_form(), move |values| async move {
        set_api_error.set(String::new());
        match ctx.api().login(&forms::credentials(&values)).await {
            Ok(auth) => {
                ctx.signed_in(auth.user);
                Ok(())
            }
            Err(e) => {
                set_api_error.set(e.user_message());
                Err(e.to_string())
            }
        }
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Welcome back"</h1>
                    <p>"Sign in to Task Hub to manage your projects and tasks"</p>
                </div>
                <Show when=move || !api_error.with(String::is_empty)>
                    <ErrorMessage message=api_error />
                </Show>
                <form class="entity-form" on:submit=move |ev| form.submit(ev)>
                    <TextField form=form name="email" label="Email" input_type="email" placeholder="you@example.com" />
                    <TextField form=form name="password" label="Password" input_type="password" placeholder="Enter your password" />
                    <button type="submit" class="btn-primary btn-block" prop:disabled=move || form.is_submitting()>
                        {move || if form.is_submitting() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Don't have an account? "
                    <a href="/signup" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Signup);
                    }>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
