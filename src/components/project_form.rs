//! Project Form Component
//!
//! Creates a project, or updates one when `project` is given.

use leptos::prelude::*;

use task_hub_core::forms;
use task_hub_core::Project;

use crate::components::{TextAreaField, TextField};
use crate::context::AppContext;
use crate::hooks::use_form;

#[component]
pub fn ProjectForm(
    #[prop(optional)] project: Option<Project>,
    #[prop(into)] on_saved: Callback<Project>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);
    let editing = project.as_ref().map(|p| p.id.clone());
    let is_edit = editing.is_some();

    let form = use_form(forms::project_form(project.as_ref()), move |values| {
        let editing = editing.clone();
        async move {
            set_submit_error.set(None);
            let input = forms::project_input(&values);
            let api = ctx.api();
            let result = match &editing {
                Some(id) => api.update_project(id, &input).await,
                None => api.create_project(&input).await,
            };
            match result {
                Ok(saved) => {
                    log::info!("[PROJECT] Saved project {}", saved.id);
                    on_saved.run(saved);
                    Ok(())
                }
                Err(e) => {
                    set_submit_error.set(Some(e.user_message()));
                    Err(e.to_string())
                }
            }
        }
    });

    view! {
        <form class="entity-form" on:submit=move |ev| form.submit(ev)>
            <TextField form=form name="name" label="Project Name *" placeholder="Enter project name" />
            <TextAreaField form=form name="description" label="Description" placeholder="Enter project description" />
            {move || submit_error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <div class="form-actions">
                <button type="button" class="btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button type="submit" class="btn-primary" prop:disabled=move || form.is_submitting()>
                    {move || match (form.is_submitting(), is_edit) {
                        (true, _) => "Saving...",
                        (false, true) => "Update Project",
                        (false, false) => "Create Project",
                    }}
                </button>
            </div>
        </form>
    }
}
