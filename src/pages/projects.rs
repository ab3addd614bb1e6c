//! Projects Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use task_hub_core::format::display_optional_date;
use task_hub_core::models::{remove_by_id, replace_by_id};
use task_hub_core::{config, ListQuery, Project};

use crate::components::{ConfirmDialog, ErrorMessage, Loading, Modal, Pagination, ProjectForm, SearchBox, SortHeader};
use crate::context::AppContext;
use crate::hooks::use_async_on_mount;
use crate::route::Route;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let query = RwSignal::new(ListQuery::new(config().list_page_size));
    let (show_create, set_show_create) = signal(false);
    let editing = RwSignal::new(None::<Project>);
    let deleting = RwSignal::new(None::<Project>);
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    let projects = use_async_on_mount(move |_| async move { ctx.api().list_projects().await });

    let all = Memo::new(move |_| projects.data().unwrap_or_default());
    let page = Memo::new(move |_| query.with(|q| all.with(|list| q.apply(list))));
    let position = Signal::derive(move || page.with(|p| (p.page, p.total_pages, p.total)));

    let on_created = move |project: Project| {
        projects.map_data(|list| list.push(project));
        set_show_create.set(false);
    };

    let on_updated = move |project: Project| {
        projects.map_data(|list| {
            replace_by_id(list, project);
        });
        editing.set(None);
    };

    let confirm_delete = move |_| {
        let Some(project) = deleting.get_untracked() else {
            return;
        };
        deleting.set(None);
        spawn_local(async move {
            match ctx.api().delete_project(&project.id).await {
                Ok(()) => {
                    projects.map_data(|list| remove_by_id(list, &project.id));
                    set_action_error.set(None);
                }
                Err(e) => {
                    log::error!("[PROJECTS] Failed to delete project {}: {}", project.id, e);
                    set_action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <div class="page">
            <div class="page-header page-header-row">
                <div>
                    <h1>"Projects"</h1>
                    <p class="subtitle">{move || format!("{} projects", all.with(Vec::len))}</p>
                </div>
                <Show when=move || !all.with(Vec::is_empty)>
                    <SearchBox query=query placeholder="Search projects..." />
                </Show>
                <button class="btn-primary" on:click=move |_| set_show_create.update(|open| *open = !*open)>
                    {move || if show_create.get() { "✕ Cancel" } else { "+ New Project" }}
                </button>
            </div>

            {move || action_error.get().map(|message| view! { <ErrorMessage message=message /> })}
            {move || projects.error_message().map(|message| view! { <ErrorMessage message=message /> })}

            <Modal open=show_create title="New Project" on_close=move |_| set_show_create.set(false)>
                <ProjectForm on_saved=on_created on_cancel=move |_| set_show_create.set(false) />
            </Modal>

            <Modal open=Signal::derive(move || editing.with(Option::is_some)) title="Edit Project" on_close=move |_| editing.set(None)>
                {move || editing.get().map(|project| view! {
                    <ProjectForm project=project on_saved=on_updated on_cancel=move |_| editing.set(None) />
                })}
            </Modal>

            <ConfirmDialog
                open=Signal::derive(move || deleting.with(Option::is_some))
                title="Delete Project"
                message=Signal::derive(move || {
                    let name = deleting.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default());
                    format!("Are you sure you want to delete \"{}\"? All of its tasks will be removed.", name)
                })
                on_confirm=confirm_delete
                on_cancel=move |_| deleting.set(None)
            />

            <Show when=move || !projects.is_pending() fallback=|| view! { <Loading /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader query=query field="id" label="ID" />
                            <SortHeader query=query field="name" label="Project Name" />
                            <SortHeader query=query field="description" label="Description" />
                            <SortHeader query=query field="created_at" label="Created" />
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let items = page.get().items;
                            if items.is_empty() {
                                return view! { <tr><td colspan="5" class="empty-cell">"No projects found"</td></tr> }.into_any();
                            }
                            items.into_iter().map(|project| {
                                let id = project.id.clone();
                                let to_edit = project.clone();
                                let to_delete = project.clone();
                                view! {
                                    <tr class="clickable-row" on:click=move |_| ctx.navigate(Route::TaskBoard(id.clone()))>
                                        <td>{project.id.to_string()}</td>
                                        <td class="strong">{project.name.clone()}</td>
                                        <td>{project.description.clone().filter(|d| !d.is_empty()).unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{display_optional_date(project.created_at.as_deref())}</td>
                                        <td class="row-actions">
                                            <button class="link-btn" on:click=move |ev| {
                                                ev.stop_propagation();
                                                editing.set(Some(to_edit.clone()));
                                            }>"Edit"</button>
                                            <button class="link-btn danger" on:click=move |ev| {
                                                ev.stop_propagation();
                                                deleting.set(Some(to_delete.clone()));
                                            }>"Delete"</button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
                <Pagination query=query position=position noun="projects" />
            </Show>
        </div>
    }
}
