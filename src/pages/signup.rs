//! Signup Page

use leptos::prelude::*;

use task_hub_core::forms;

use crate::components::{ErrorMessage, TextField};
use crate::context::AppContext;
use crate::hooks::use_form;
use crate::route::Route;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (api_error, set_api_error) = signal(String::new());

    let form = use_form(forms::signup_form(), move |values| async move {
        set_api_error.set(String::new());
        if let Err(message) = forms::passwords_match(&values) {
            set_api_error.set(message.clone());
            return Err(message);
        }
        match ctx.api().signup(&forms::credentials(&values)).await {
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
                    <h1>"Create account"</h1>
                    <p>"Join Task Hub to start organizing your work"</p>
                </div>
                <Show when=move || !api_error.with(String::is_empty)>
                    <ErrorMessage message=api_error />
                </Show>
                <form class="entity-form" on:submit=move |ev| form.submit(ev)>
                    <TextField form=form name="email" label="Email" input_type="email" placeholder="you@example.com" />
                    <TextField form=form name="password" label="Password" input_type="password" placeholder="At least 8 characters" />
                    <TextField form=form name="confirmPassword" label="Confirm Password" input_type="password" placeholder="Repeat your password" />
                    <button type="submit" class="btn-primary btn-block" prop:disabled=move || form.is_submitting()>
                        {move || if form.is_submitting() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Already have an account? "
                    <a href="/login" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Login);
                    }>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
