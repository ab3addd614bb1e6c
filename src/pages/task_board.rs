//! Task Board Page
//!
//! One project's tasks: inline project editing, filters, search, sorting,
//! pagination, and quick status/priority/assignee changes per row.

use leptos::prelude::*;
use leptos::task::spawn_local;

use task_hub_core::format::display_optional_date;
use task_hub_core::models::{
    patch_by_id, remove_by_id, replace_by_id, ProjectInput, TASK_PRIORITIES, TASK_STATUSES,
};
use task_hub_core::{config, forms, ApiError, EntityId, ListQuery, Project, Task, TaskChange, TaskFilter, User};

use crate::components::{
    assignee_options, vocabulary_options, ConfirmDialog, ErrorMessage, FilterSelect, InlineSelect, Loading, Modal,
    Pagination, SearchBox, SortHeader, TaskForm,
};
use crate::context::AppContext;
use crate::hooks::{use_async_on_mount, AsyncHandle};
use crate::route::Route;

#[derive(Clone, Debug, Default, PartialEq)]
struct BoardData {
    project: Option<Project>,
    tasks: Vec<Task>,
    users: Vec<User>,
}

type Board = AsyncHandle<(), BoardData>;

/// Which project field is open for inline editing.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ProjectField {
    Name,
    Description,
}

#[component]
pub fn TaskBoardPage(project_id: EntityId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let query = RwSignal::new(ListQuery::new(config().list_page_size));
    let (show_create, set_show_create) = signal(false);
    let editing_task = RwSignal::new(None::<Task>);
    let deleting_task = RwSignal::new(None::<Task>);
    let (deleting_project, set_deleting_project) = signal(false);
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    let board: Board = {
        let project_id = project_id.clone();
        use_async_on_mount(move |_| {
            let project_id = project_id.clone();
            async move {
                let api = ctx.api();
                let project = api.get_project(&project_id).await?;
                let tasks = api.list_project_tasks(&project_id, &TaskFilter::default()).await?;
                let users = api.list_users().await?;
                log::info!("[BOARD] Project {} has {} tasks", project_id, tasks.len());
                Ok::<_, ApiError>(BoardData {
                    project: Some(project),
                    tasks,
                    users,
                })
            }
        })
    };

    let data = Memo::new(move |_| board.data().unwrap_or_default());
    let users = Signal::derive(move || data.with(|d| d.users.clone()));
    let page = Memo::new(move |_| query.with(|q| data.with(|d| q.apply(&d.tasks))));
    let position = Signal::derive(move || page.with(|p| (p.page, p.total_pages, p.total)));
    let project_name = move || data.with(|d| d.project.as_ref().map(|p| p.name.clone()).unwrap_or_default());

    let change_task = move |id: EntityId, change: TaskChange| {
        spawn_local(async move {
            match ctx.api().change_task(&id, &change).await {
                Ok(()) => {
                    board.map_data(|d| {
                        patch_by_id(&mut d.tasks, &id, |task| change.apply(task));
                    });
                    set_action_error.set(None);
                }
                Err(e) => {
                    log::error!("[BOARD] Failed to update task {}: {}", id, e);
                    set_action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let on_created = move |task: Task| {
        board.map_data(|d| d.tasks.push(task));
        set_show_create.set(false);
    };

    let on_updated = move |task: Task| {
        board.map_data(|d| {
            replace_by_id(&mut d.tasks, task);
        });
        editing_task.set(None);
    };

    let confirm_delete_task = move |_| {
        let Some(task) = deleting_task.get_untracked() else {
            return;
        };
        deleting_task.set(None);
        spawn_local(async move {
            match ctx.api().delete_task(&task.id).await {
                Ok(()) => board.map_data(|d| remove_by_id(&mut d.tasks, &task.id)),
                Err(e) => {
                    log::error!("[BOARD] Failed to delete task {}: {}", task.id, e);
                    set_action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let confirm_delete_project = {
        let project_id = project_id.clone();
        move |_| {
            let project_id = project_id.clone();
            spawn_local(async move {
                set_deleting_project.set(false);
                match ctx.api().delete_project(&project_id).await {
                    Ok(()) => ctx.navigate(Route::Projects),
                    Err(e) => {
                        log::error!("[BOARD] Failed to delete project {}: {}", project_id, e);
                        set_action_error.set(Some(e.user_message()));
                    }
                }
            });
        }
    };

    let create_project_id = project_id.clone();
    let edit_project_id = project_id.clone();

    view! {
        <div class="page">
            {move || {
                if board.is_pending() {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(message) = board.error_message() {
                    return view! { <ErrorMessage message=message /> }.into_any();
                }
                view! {
                    <ProjectHeader
                        board=board
                        on_delete=move |_| set_deleting_project.set(true)
                        on_toggle_create=move |_| set_show_create.update(|open| *open = !*open)
                        creating=show_create
                    />
                }.into_any()
            }}

            {move || action_error.get().map(|message| view! { <ErrorMessage message=message /> })}

            <Modal open=show_create title="Create New Task" on_close=move |_| set_show_create.set(false)>
                <TaskForm
                    project_id=create_project_id.clone()
                    users=users
                    on_saved=on_created
                    on_cancel=move |_| set_show_create.set(false)
                />
            </Modal>

            <Modal
                open=Signal::derive(move || editing_task.with(Option::is_some))
                title="Edit Task"
                on_close=move |_| editing_task.set(None)
            >
                {
                    let project_id = edit_project_id.clone();
                    move || editing_task.get().map(|task| view! {
                        <TaskForm
                            project_id=project_id.clone()
                            task=task
                            users=users
                            on_saved=on_updated
                            on_cancel=move |_| editing_task.set(None)
                        />
                    })
                }
            </Modal>

            <Show when=move || !board.is_pending() && !data.with(|d| d.tasks.is_empty())>
                <div class="table-toolbar">
                    <FilterSelect query=query all_label="All Status" options=&TASK_STATUSES priority=false />
                    <FilterSelect query=query all_label="All Priorities" options=&TASK_PRIORITIES priority=true />
                    <SearchBox query=query placeholder="Search tasks..." />
                </div>
            </Show>

            <Show when=move || !board.is_pending() && board.error_message().is_none()>
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader query=query field="title" label="Title" />
                            <SortHeader query=query field="status" label="Status" />
                            <SortHeader query=query field="priority" label="Priority" />
                            <SortHeader query=query field="due_date" label="Due Date" />
                            <SortHeader query=query field="assignee_id" label="Assignee" />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let items = page.get().items;
                            if items.is_empty() {
                                return view! { <tr><td colspan="6" class="empty-cell">"No tasks found"</td></tr> }.into_any();
                            }
                            items.into_iter().map(|task| {
                                let open_id = task.id.clone();
                                let status_id = task.id.clone();
                                let priority_id = task.id.clone();
                                let assignee_id = task.id.clone();
                                let to_edit = task.clone();
                                let to_delete = task.clone();
                                let assignee = data.with(|d| assignee_label(&task, &d.users));
                                view! {
                                    <tr class="clickable-row" on:click=move |_| ctx.navigate(Route::TaskDetail(open_id.clone()))>
                                        <td class="strong">{task.title.clone()}</td>
                                        <td>
                                            <InlineSelect
                                                value=task.status.clone()
                                                options=vocabulary_options(&TASK_STATUSES)
                                                class=format!("status-{}", task.status.to_lowercase())
                                                on_change=move |v| change_task(status_id.clone(), TaskChange::Status(v))
                                            />
                                        </td>
                                        <td>
                                            <InlineSelect
                                                value=task.priority.clone()
                                                options=vocabulary_options(&TASK_PRIORITIES)
                                                class=format!("priority-{}", task.priority.to_lowercase())
                                                on_change=move |v| change_task(priority_id.clone(), TaskChange::Priority(v))
                                            />
                                        </td>
                                        <td>{display_optional_date(task.due_date.as_deref())}</td>
                                        <td>
                                            <InlineSelect
                                                value=task.assignee_id.as_ref().map(ToString::to_string).unwrap_or_default()
                                                options=data.with(|d| assignee_options(&d.users))
                                                on_change=move |v: String| change_task(assignee_id.clone(), TaskChange::assignee(&v))
                                            />
                                            <span class="assignee-label">{assignee}</span>
                                        </td>
                                        <td class="row-actions">
                                            <button class="link-btn" on:click=move |ev| {
                                                ev.stop_propagation();
                                                editing_task.set(Some(to_edit.clone()));
                                            }>"Edit"</button>
                                            <button class="link-btn danger" on:click=move |ev| {
                                                ev.stop_propagation();
                                                deleting_task.set(Some(to_delete.clone()));
                                            }>"Delete"</button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
                <Pagination query=query position=position noun="tasks" />
            </Show>

            <ConfirmDialog
                open=Signal::derive(move || deleting_task.with(Option::is_some))
                title="Delete Task"
                message=Signal::derive(move || {
                    let title = deleting_task.with(|t| t.as_ref().map(|t| t.title.clone()).unwrap_or_default());
                    format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", title)
                })
                on_confirm=confirm_delete_task
                on_cancel=move |_| deleting_task.set(None)
            />

            <ConfirmDialog
                open=deleting_project
                title="Delete Project"
                message=Signal::derive(move || format!(
                    "Are you sure you want to delete \"{}\"? All tasks in this project will also be deleted. This action cannot be undone.",
                    project_name(),
                ))
                on_confirm=confirm_delete_project
                on_cancel=move |_| set_deleting_project.set(false)
            />
        </div>
    }
}

/// Short assignee label: the user's display name, or "-".
fn assignee_label(task: &Task, users: &[User]) -> String {
    task.assignee_id
        .as_ref()
        .and_then(|id| users.iter().find(|u| &u.id == id))
        .map(User::display_name)
        .unwrap_or_else(|| "-".to_string())
}

/// Project title and description, each editable in place.
#[component]
fn ProjectHeader(
    board: Board,
    #[prop(into)] on_delete: Callback<()>,
    #[prop(into)] on_toggle_create: Callback<()>,
    creating: ReadSignal<bool>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (editing, set_editing) = signal::<Option<ProjectField>>(None);
    let (draft, set_draft) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let project = move || board.data().and_then(|d| d.project);
    let task_count = move || board.data().map(|d| d.tasks.len()).unwrap_or_default();

    let start = move |field: ProjectField| {
        let Some(p) = project() else {
            return;
        };
        let current = match field {
            ProjectField::Name => p.name,
            ProjectField::Description => p.description.unwrap_or_default(),
        };
        set_draft.set(current);
        set_error.set(None);
        set_editing.set(Some(field));
    };

    let save = move || {
        let (Some(field), Some(p)) = (editing.get_untracked(), project()) else {
            return;
        };
        let value = draft.get_untracked().trim().to_string();
        let input = match field {
            ProjectField::Name => {
                let message = forms::validate_project_name(&value);
                if !message.is_empty() {
                    set_error.set(Some(message));
                    return;
                }
                ProjectInput {
                    name: value,
                    description: p.description.clone().unwrap_or_default(),
                }
            }
            ProjectField::Description => ProjectInput {
                name: p.name.clone(),
                description: value,
            },
        };
        set_editing.set(None);
        spawn_local(async move {
            match ctx.api().update_project(&p.id, &input).await {
                Ok(updated) => board.map_data(|d| d.project = Some(updated)),
                Err(e) => {
                    log::error!("[BOARD] Failed to update project {}: {}", p.id, e);
                    set_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let on_key = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" if editing.get_untracked() == Some(ProjectField::Name) => save(),
        "Escape" => set_editing.set(None),
        _ => {}
    };

    view! {
        <div class="page-header board-header">
            <div class="board-title">
                {move || if editing.get() == Some(ProjectField::Name) {
                    view! {
                        <input
                            class="input title-input"
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            on:blur=move |_| save()
                            on:keydown=on_key
                        />
                    }.into_any()
                } else {
                    view! {
                        <h1 class="editable" title="Click to edit" on:click=move |_| start(ProjectField::Name)>
                            {project().map(|p| p.name).unwrap_or_default()}
                        </h1>
                    }.into_any()
                }}
                <p class="subtitle">{move || format!("{} tasks", task_count())}</p>
            </div>
            <div class="board-actions">
                <button class="btn-danger" on:click=move |_| on_delete.run(())>"Delete Project"</button>
                <button class="btn-primary" on:click=move |_| on_toggle_create.run(())>
                    {move || if creating.get() { "✕ Cancel" } else { "+ New Task" }}
                </button>
            </div>
        </div>
        {move || if editing.get() == Some(ProjectField::Description) {
            view! {
                <textarea
                    class="input"
                    rows=3
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:blur=move |_| save()
                    on:keydown=on_key
                ></textarea>
            }.into_any()
        } else {
            let description = project().and_then(|p| p.description).filter(|d| !d.is_empty());
            view! {
                <p class="description editable" title="Click to edit" on:click=move |_| start(ProjectField::Description)>
                    {description.unwrap_or_else(|| "Add a description...".to_string())}
                </p>
            }.into_any()
        }}
        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
    }
}
