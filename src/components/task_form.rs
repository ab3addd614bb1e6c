//! Task Form Component

use leptos::prelude::*;

use task_hub_core::forms;
use task_hub_core::models::{TASK_PRIORITIES, TASK_STATUSES};
use task_hub_core::{EntityId, Task, User};

use crate::components::{vocabulary_options, SelectField, TextAreaField, TextField};
use crate::context::AppContext;
use crate::hooks::use_form;

/// Create a task in `project_id`, or edit `task`.
#[component]
pub fn TaskForm(
    project_id: EntityId,
    #[prop(optional)] task: Option<Task>,
    #[prop(into)] users: Signal<Vec<User>>,
    #[prop(into)] on_saved: Callback<Task>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);
    let editing = task.as_ref().map(|t| t.id.clone());
    let is_edit = editing.is_some();

    let form = use_form(forms::task_form(task.as_ref()), move |values| {
        let editing = editing.clone();
        let project_id = project_id.clone();
        async move {
            set_submit_error.set(None);
            let input = forms::task_input(&values);
            let api = ctx.api();
            let result = match &editing {
                Some(id) => api.update_task(id, &input).await,
                None => api.create_task(&project_id, &input).await,
            };
            match result {
                Ok(saved) => {
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

    let assignee_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "Select a user...".to_string())];
        options.extend(users.get().into_iter().map(|u| (u.id.to_string(), u.email)));
        options
    });

    view! {
        <form class="entity-form" on:submit=move |ev| form.submit(ev)>
            <TextField form=form name="title" label="Task Title *" placeholder="Enter task title" />
            <TextAreaField form=form name="description" label="Description" placeholder="Enter task description" />
            <div class="form-row">
                <SelectField form=form name="status" label="Status" options=vocabulary_options(&TASK_STATUSES) />
                <SelectField form=form name="priority" label="Priority" options=vocabulary_options(&TASK_PRIORITIES) />
            </div>
            <div class="form-row">
                <SelectField form=form name="assignee_id" label="Assignee" options=assignee_options />
                <TextField form=form name="due_date" label="Due Date" input_type="date" />
            </div>
            {move || submit_error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <div class="form-actions">
                <button type="button" class="btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button type="submit" class="btn-primary" prop:disabled=move || form.is_submitting()>
                    {move || match (form.is_submitting(), is_edit) {
                        (true, _) => "Saving...",
                        (false, true) => "Update Task",
                        (false, false) => "Create Task",
                    }}
                </button>
            </div>
        </form>
    }
}
