//! Task Detail Page
//!
//! A single task with in-place field editing, its people, and the comment thread.

use leptos::prelude::*;
use leptos::task::spawn_local;

use task_hub_core::format::{date_input_value, display_optional_date};
use task_hub_core::models::{remove_by_id, replace_by_id, TaskPatch, TASK_PRIORITIES, TASK_STATUSES};
use task_hub_core::{forms, ApiError, Comment, EntityId, Task, TaskChange, User};

use crate::components::{
    assignee_options, vocabulary_options, CommentForm, CommentList, ConfirmDialog, ErrorMessage, InlineSelect,
    Loading, Modal, PriorityBadge, StatusBadge, TaskForm,
};
use crate::context::AppContext;
use crate::hooks::{use_async_on_mount, AsyncHandle};
use crate::route::Route;

#[derive(Clone, Debug, Default, PartialEq)]
struct DetailData {
    task: Option<Task>,
    comments: Vec<Comment>,
    users: Vec<User>,
}

type Detail = AsyncHandle<(), DetailData>;

/// Free-text fields saved through `PUT /tasks/:id`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum EditableField {
    Title,
    Description,
    DueDate,
}

impl EditableField {
    fn current(self, task: &Task) -> String {
        match self {
            Self::Title => task.title.clone(),
            Self::Description => task.description.clone().unwrap_or_default(),
            Self::DueDate => task.due_date.as_deref().map(date_input_value).unwrap_or_default(),
        }
    }

    fn patch(self, value: String) -> TaskPatch {
        let mut patch = TaskPatch::default();
        match self {
            Self::Title => patch.title = Some(value),
            Self::Description => patch.description = Some(value),
            Self::DueDate => patch.due_date = Some(value),
        }
        patch
    }
}

/// What the confirm dialog is about to delete.
#[derive(Clone, Debug, PartialEq)]
enum PendingDelete {
    Task,
    Comment(Comment),
}

#[component]
pub fn TaskDetailPage(task_id: EntityId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (show_edit, set_show_edit) = signal(false);
    let pending_delete = RwSignal::new(None::<PendingDelete>);
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    let detail: Detail = {
        let task_id = task_id.clone();
        use_async_on_mount(move |_| {
            let task_id = task_id.clone();
            async move {
                let api = ctx.api();
                let task = api.get_task(&task_id).await?;
                let comments = api.list_task_comments(&task_id).await?;
                let users = api.list_users().await?;
                Ok::<_, ApiError>(DetailData {
                    task: Some(task),
                    comments,
                    users,
                })
            }
        })
    };

    let data = Memo::new(move |_| detail.data().unwrap_or_default());
    let task = Memo::new(move |_| data.with(|d| d.task.clone()));
    let users = Signal::derive(move || data.with(|d| d.users.clone()));
    let comments = Signal::derive(move || data.with(|d| d.comments.clone()));
    let current_user = Signal::derive(move || ctx.api().session().current_claims().map(|c| c.user_id));

    let on_task_saved = move |saved: Task| {
        detail.map_data(|d| d.task = Some(saved));
        set_show_edit.set(false);
    };

    let on_comment_added = move |comment: Comment| detail.map_data(|d| d.comments.push(comment));
    let on_comment_updated = move |comment: Comment| {
        detail.map_data(|d| {
            replace_by_id(&mut d.comments, comment);
        })
    };

    let confirm_delete = {
        let task_id = task_id.clone();
        move |_| {
            let Some(target) = pending_delete.get_untracked() else {
                return;
            };
            pending_delete.set(None);
            let task_id = task_id.clone();
            spawn_local(async move {
                let api = ctx.api();
                match target {
                    PendingDelete::Task => {
                        let project_id = task.get_untracked().and_then(|t| t.project_id);
                        match api.delete_task(&task_id).await {
                            Ok(()) => match project_id {
                                Some(project_id) => ctx.navigate(Route::TaskBoard(project_id)),
                                None => ctx.navigate(Route::Projects),
                            },
                            Err(e) => {
                                log::error!("[TASK] Failed to delete task {}: {}", task_id, e);
                                set_action_error.set(Some(e.user_message()));
                            }
                        }
                    }
                    PendingDelete::Comment(comment) => match api.delete_comment(&comment.id).await {
                        Ok(()) => detail.map_data(|d| remove_by_id(&mut d.comments, &comment.id)),
                        Err(e) => {
                            log::error!("[TASK] Failed to delete comment {}: {}", comment.id, e);
                            set_action_error.set(Some(e.user_message()));
                        }
                    },
                }
            });
        }
    };

    let delete_message = Signal::derive(move || match pending_delete.get() {
        Some(PendingDelete::Comment(comment)) => {
            let preview: String = comment.content.chars().take(50).collect();
            format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", preview)
        }
        _ => format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            task.with(|t| t.as_ref().map(|t| t.title.clone()).unwrap_or_default()),
        ),
    });

    view! {
        <div class="page task-detail">
            <button class="link-btn back-link" on:click=move |_| ctx.back()>"← Back to project"</button>

            {move || action_error.get().map(|message| view! { <ErrorMessage message=message /> })}

            {move || {
                if detail.is_pending() {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(message) = detail.error_message() {
                    return view! { <ErrorMessage message=message /> }.into_any();
                }
                if task.with(Option::is_none) {
                    return view! { <ErrorMessage message="Task not found".to_string() /> }.into_any();
                }
                let task_id = task_id.clone();
                view! {
                    <div class="detail-layout">
                        <div class="detail-main">
                            <TaskFields detail=detail />
                            <section class="comments-section">
                                <h2>"Comments"</h2>
                                <CommentForm task_id=task_id on_added=on_comment_added />
                                <CommentList
                                    comments=comments
                                    current_user=current_user
                                    on_updated=on_comment_updated
                                    on_delete=move |comment| pending_delete.set(Some(PendingDelete::Comment(comment)))
                                />
                            </section>
                        </div>
                        <TaskSidebar
                            detail=detail
                            on_edit=move |_| set_show_edit.set(true)
                            on_delete=move |_| pending_delete.set(Some(PendingDelete::Task))
                        />
                    </div>
                }.into_any()
            }}

            <Modal open=show_edit title="Edit Task" on_close=move |_| set_show_edit.set(false)>
                {move || task.get().and_then(|t| t.project_id.clone().map(|project_id| (project_id, t))).map(|(project_id, t)| view! {
                    <TaskForm
                        project_id=project_id
                        task=t
                        users=users
                        on_saved=on_task_saved
                        on_cancel=move |_| set_show_edit.set(false)
                    />
                })}
            </Modal>

            <ConfirmDialog
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                title="Confirm Delete"
                message=delete_message
                on_confirm=confirm_delete
                on_cancel=move |_| pending_delete.set(None)
            />
        </div>
    }
}

/// Save one field of the loaded task and mirror it locally.
fn save_field(ctx: AppContext, detail: Detail, id: EntityId, patch: TaskPatch) {
    spawn_local(async move {
        match ctx.api().patch_task_fields(&id, &patch).await {
            Ok(_) => detail.map_data(|d| d.task = d.task.take().map(|t| patch.apply(t))),
            Err(e) => log::error!("[TASK] Failed to update task {}: {}", id, e),
        }
    });
}

/// Title and description, each editable in place.
#[component]
fn TaskFields(detail: Detail) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (editing, set_editing) = signal::<Option<EditableField>>(None);
    let (draft, set_draft) = signal(String::new());

    let task = move || detail.data().and_then(|d| d.task);

    let start = move |field: EditableField| {
        if let Some(t) = task() {
            set_draft.set(field.current(&t));
            set_editing.set(Some(field));
        }
    };

    let commit = move || {
        let (Some(field), Some(t)) = (editing.get_untracked(), task()) else {
            return;
        };
        set_editing.set(None);
        let value = draft.get_untracked();
        if field == EditableField::Title && !forms::validate_task_title(&value).is_empty() {
            return;
        }
        if value == field.current(&t) {
            return;
        }
        save_field(ctx, detail, t.id.clone(), field.patch(value));
    };

    view! {
        <div class="detail-card">
            {move || if editing.get() == Some(EditableField::Title) {
                view! {
                    <input
                        class="input title-input"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:blur=move |_| commit()
                        on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                            "Enter" => commit(),
                            "Escape" => set_editing.set(None),
                            _ => {}
                        }
                    />
                }.into_any()
            } else {
                view! {
                    <h1 class="editable" title="Click to edit" on:click=move |_| start(EditableField::Title)>
                        {task().map(|t| t.title).unwrap_or_default()}
                    </h1>
                }.into_any()
            }}

            <h3 class="section-label">"Description"</h3>
            {move || if editing.get() == Some(EditableField::Description) {
                view! {
                    <textarea
                        class="input"
                        rows=5
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:blur=move |_| commit()
                    ></textarea>
                }.into_any()
            } else {
                let description = task().and_then(|t| t.description).filter(|d| !d.is_empty());
                view! {
                    <p class="description editable" title="Click to edit" on:click=move |_| start(EditableField::Description)>
                        {description.unwrap_or_else(|| "No description provided. Click to add one.".to_string())}
                    </p>
                }.into_any()
            }}
        </div>
    }
}

/// Status, priority, due date, dates and people.
#[component]
fn TaskSidebar(detail: Detail, #[prop(into)] on_edit: Callback<()>, #[prop(into)] on_delete: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (editing_due, set_editing_due) = signal(false);

    let data = move || detail.data().unwrap_or_default();

    let change = move |edit: TaskChange| {
        let Some(id) = data().task.map(|t| t.id) else {
            return;
        };
        spawn_local(async move {
            match ctx.api().change_task(&id, &edit).await {
                Ok(()) => detail.map_data(|d| d.task = d.task.take().map(|t| edit.apply(t))),
                Err(e) => log::error!("[TASK] Failed to update task {}: {}", id, e),
            }
        });
    };

    let save_due = move |value: String| {
        set_editing_due.set(false);
        if let Some(t) = data().task {
            if EditableField::DueDate.current(&t) != value {
                save_field(ctx, detail, t.id.clone(), EditableField::DueDate.patch(value));
            }
        }
    };

    move || {
        let DetailData { task, users, .. } = data();
        let Some(task) = task else {
            return ().into_any();
        };
        let assignee = person(task.assignee_id.as_ref(), &users);
        let created_by = person(task.created_by_id.as_ref(), &users);
        let assigned_by = person(task.assigned_by_id.as_ref(), &users);
        let due_value = EditableField::DueDate.current(&task);

        view! {
            <aside class="detail-sidebar">
                <div class="sidebar-row">
                    <p class="section-label">"Status"</p>
                    <StatusBadge status=task.status.clone() />
                    <InlineSelect
                        value=task.status.clone()
                        options=vocabulary_options(&TASK_STATUSES)
                        on_change=move |v| change(TaskChange::Status(v))
                    />
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Priority"</p>
                    <PriorityBadge priority=task.priority.clone() />
                    <InlineSelect
                        value=task.priority.clone()
                        options=vocabulary_options(&TASK_PRIORITIES)
                        on_change=move |v| change(TaskChange::Priority(v))
                    />
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Due Date"</p>
                    {if editing_due.get() {
                        view! {
                            <input
                                type="date"
                                class="input"
                                prop:value=due_value.clone()
                                on:change=move |ev| save_due(event_target_value(&ev))
                                on:blur=move |_| set_editing_due.set(false)
                            />
                        }.into_any()
                    } else {
                        view! {
                            <button class="link-btn editable" title="Click to edit" on:click=move |_| set_editing_due.set(true)>
                                {task.due_date.as_deref().map(|d| display_optional_date(Some(d))).unwrap_or_else(|| "No due date".to_string())}
                            </button>
                        }.into_any()
                    }}
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Created"</p>
                    <p>{display_optional_date(task.created_at.as_deref())}</p>
                    <p class="section-label">"Updated"</p>
                    <p>{display_optional_date(task.updated_at.as_deref())}</p>
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Assignee"</p>
                    <p>{assignee.unwrap_or_else(|| "Unassigned".to_string())}</p>
                    <InlineSelect
                        value=task.assignee_id.as_ref().map(ToString::to_string).unwrap_or_default()
                        options=assignee_options(&users)
                        on_change=move |v: String| change(TaskChange::assignee(&v))
                    />
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Created By"</p>
                    <p>{created_by.unwrap_or_else(|| "Unknown".to_string())}</p>
                </div>
                <div class="sidebar-row">
                    <p class="section-label">"Assigned By"</p>
                    <p>{assigned_by.unwrap_or_else(|| "Not assigned".to_string())}</p>
                </div>
                <button class="btn-secondary full-width" on:click=move |_| on_edit.run(())>"Edit Task"</button>
                <button class="btn-danger full-width" on:click=move |_| on_delete.run(())>"Delete Task"</button>
            </aside>
        }.into_any()
    }
}

/// "Name <email>" for a user id, when the user is known.
fn person(id: Option<&EntityId>, users: &[User]) -> Option<String> {
    let user = users.iter().find(|u| Some(&u.id) == id)?;
    Some(format!("{} <{}>", user.display_name(), user.email))
}
