//! Dashboard Page
//!
//! Tasks assigned to the signed-in user, grouped by project and as a sortable
//! table, plus the latest comments.

use leptos::prelude::*;

use task_hub_core::format::{display_datetime, display_optional_date};
use task_hub_core::listing::{group_tasks_by_project, project_name};
use task_hub_core::models::TASK_STATUSES;
use task_hub_core::{config, ApiError, Comment, ListQuery, Project, Task, TaskFilter};

use crate::components::{
    ErrorMessage, FilterSelect, Loading, Pagination, PriorityBadge, SearchBox, SortHeader, StatusBadge,
};
use crate::context::AppContext;
use crate::hooks::use_async_on_mount;
use crate::route::Route;

#[derive(Clone, Debug, Default, PartialEq)]
struct DashboardData {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    comments: Vec<Comment>,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let query = RwSignal::new(ListQuery::new(config().list_page_size));

    let load = use_async_on_mount(move |_| async move {
        let api = ctx.api();
        let tasks = api.list_assigned_tasks(&TaskFilter::default()).await?;
        let projects = api.list_projects().await?;
        let comments = api.recent_comments(1, config().recent_comments_page_size).await?;
        log::info!("[DASHBOARD] Loaded {} tasks, {} comments", tasks.len(), comments.len());
        Ok::<_, ApiError>(DashboardData {
            tasks,
            projects,
            comments,
        })
    });

    let data = Memo::new(move |_| load.data().unwrap_or_default());
    let page = Memo::new(move |_| query.with(|q| data.with(|d| q.apply(&d.tasks))));
    let position = Signal::derive(move || page.with(|p| (p.page, p.total_pages, p.total)));

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Dashboard"</h1>
                <p class="subtitle">"Tasks assigned to you"</p>
            </div>
            {move || {
                if load.is_pending() {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(message) = load.error_message() {
                    return view! { <ErrorMessage message=message /> }.into_any();
                }
                if data.with(|d| d.tasks.is_empty()) {
                    return view! { <div class="empty-state"><p>"No tasks assigned yet"</p></div> }.into_any();
                }
                view! {
                    <div class="project-groups">
                        {move || data.with(|d| {
                            group_tasks_by_project(&d.tasks, &d.projects)
                                .into_iter()
                                .map(|(name, tasks)| view! {
                                    <div class="project-group">
                                        <h3>{name}</h3>
                                        {tasks.into_iter().map(|task| task_tile(ctx, task)).collect_view()}
                                    </div>
                                })
                                .collect_view()
                        })}
                    </div>

                    <div class="table-section">
                        <div class="table-toolbar">
                            <h3>"All Tasks View"</h3>
                            <SearchBox query=query placeholder="Search tasks..." />
                            <FilterSelect query=query all_label="All Statuses" options=&TASK_STATUSES priority=false />
                        </div>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <SortHeader query=query field="title" label="Title" />
                                    <SortHeader query=query field="project_id" label="Project" />
                                    <SortHeader query=query field="status" label="Status" />
                                    <SortHeader query=query field="priority" label="Priority" />
                                    <SortHeader query=query field="due_date" label="Due Date" />
                                </tr>
                            </thead>
                            <tbody>
                                {move || page.get().items.into_iter().map(|task| {
                                    let id = task.id.clone();
                                    let project = data.with(|d| project_name(task.project_id.as_ref(), &d.projects));
                                    view! {
                                        <tr>
                                            <td class="link-cell" on:click=move |_| ctx.navigate(Route::TaskDetail(id.clone()))>
                                                {task.title.clone()}
                                            </td>
                                            <td>{project}</td>
                                            <td><StatusBadge status=task.status.clone() /></td>
                                            <td><PriorityBadge priority=task.priority.clone() /></td>
                                            <td>{display_optional_date(task.due_date.as_deref())}</td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                        <Pagination query=query position=position noun="tasks" />
                    </div>
                }.into_any()
            }}

            <div class="recent-comments">
                <h2>"Recent Comments"</h2>
                {move || {
                    let comments = data.with(|d| d.comments.clone());
                    if comments.is_empty() {
                        return view! { <div class="empty-state"><p>"No comments yet"</p></div> }.into_any();
                    }
                    comments.into_iter().map(|comment| {
                        let task_id = comment.task_id.clone();
                        view! {
                            <div
                                class="comment-card"
                                on:click=move |_| {
                                    if let Some(id) = task_id.clone() {
                                        ctx.navigate(Route::TaskDetail(id));
                                    }
                                }
                            >
                                <div class="comment-header">
                                    <p class="comment-author">{comment.author().to_string()}</p>
                                    <p class="comment-date">
                                        {comment.created_at.as_deref().map(display_datetime).unwrap_or_default()}
                                    </p>
                                </div>
                                <p class="comment-content">{comment.content.clone()}</p>
                            </div>
                        }
                    }).collect_view().into_any()
                }}
            </div>
        </div>
    }
}

fn task_tile(ctx: AppContext, task: &Task) -> impl IntoView {
    let id = task.id.clone();
    view! {
        <div class="task-tile" on:click=move |_| ctx.navigate(Route::TaskDetail(id.clone()))>
            <div class="task-tile-header">
                <h4>{task.title.clone()}</h4>
                <StatusBadge status=task.status.clone() />
            </div>
            <div class="task-tile-meta">
                <PriorityBadge priority=task.priority.clone() />
                {task.due_date.as_deref().map(|due| view! {
                    <span class="due">{format!("Due: {}", display_optional_date(Some(due)))}</span>
                })}
            </div>
        </div>
    }
}
