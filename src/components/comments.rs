//! Comment Components

use leptos::prelude::*;
use leptos::task::spawn_local;

use task_hub_core::format::display_datetime;
use task_hub_core::models::CommentInput;
use task_hub_core::{forms, Comment, EntityId};

use crate::components::TextAreaField;
use crate::context::AppContext;
use crate::hooks::use_form;

/// New-comment box. Validates on every keystroke.
#[component]
pub fn CommentForm(task_id: EntityId, #[prop(into)] on_added: Callback<Comment>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);
    let (posted, set_posted) = signal(0u32);

    let form = use_form(forms::comment_form(), move |values| {
        let task_id = task_id.clone();
        async move {
            set_submit_error.set(None);
            match ctx.api().create_comment(&task_id, &forms::comment_input(&values)).await {
                Ok(comment) => {
                    on_added.run(comment);
                    set_posted.update(|n| *n += 1);
                    Ok(())
                }
                Err(e) => {
                    set_submit_error.set(Some("Failed to post comment. Please try again.".to_string()));
                    Err(e.to_string())
                }
            }
        }
    });

    // Clear the box after each successful post
    Effect::new(move |_| {
        if posted.get() > 0 {
            form.reset();
        }
    });

    view! {
        <form class="comment-form" on:submit=move |ev| form.submit(ev)>
            <TextAreaField form=form name="content" placeholder="Add a comment..." />
            {move || submit_error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn-primary" prop:disabled=move || form.is_submitting()>
                {move || if form.is_submitting() { "Posting..." } else { "Post Comment" }}
            </button>
        </form>
    }
}

/// Thread of comments. The author of a comment may edit or delete it.
#[component]
pub fn CommentList(
    #[prop(into)] comments: Signal<Vec<Comment>>,
    #[prop(into)] current_user: Signal<Option<EntityId>>,
    #[prop(into)] on_updated: Callback<Comment>,
    #[prop(into)] on_delete: Callback<Comment>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (editing, set_editing) = signal::<Option<EntityId>>(None);
    let (draft, set_draft) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let save = move |id: EntityId| {
        let content = draft.get_untracked();
        if content.trim().is_empty() {
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            match ctx.api().update_comment(&id, &CommentInput { content }).await {
                Ok(updated) => {
                    on_updated.run(updated);
                    set_editing.set(None);
                }
                Err(e) => log::error!("[COMMENT] Failed to update comment {}: {}", id, e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show
            when=move || !comments.with(Vec::is_empty)
            fallback=|| view! { <div class="empty-state"><p>"No comments yet"</p></div> }
        >
            <div class="comment-list">
                <For
                    each=move || comments.get()
                    key=|c| (c.id.clone(), c.content.clone())
                    children=move |comment| {
                        let id = comment.id.clone();
                        let is_author = {
                            let author = comment.user_id.clone();
                            move || author.is_some() && current_user.get() == author
                        };
                        let is_editing = {
                            let id = id.clone();
                            move || editing.get().as_ref() == Some(&id)
                        };
                        let start_edit = {
                            let id = id.clone();
                            let content = comment.content.clone();
                            move |_| {
                                set_draft.set(content.clone());
                                set_editing.set(Some(id.clone()));
                            }
                        };
                        let save_id = id.clone();
                        let to_delete = comment.clone();
                        let content = comment.content.clone();
                        let is_author_actions = is_author.clone();
                        let is_editing_body = is_editing.clone();

                        view! {
                            <div class="comment">
                                <div class="comment-header">
                                    <div>
                                        <p class="comment-author">{comment.author().to_string()}</p>
                                        <p class="comment-date">
                                            {comment.created_at.as_deref().map(display_datetime).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <Show when=move || is_author_actions() && !is_editing()>
                                        <div class="comment-actions">
                                            <button class="link-btn" on:click=start_edit.clone()>"Edit"</button>
                                            <button
                                                class="link-btn danger"
                                                on:click={
                                                    let to_delete = to_delete.clone();
                                                    move |_| on_delete.run(to_delete.clone())
                                                }
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                                {move || if is_editing_body() {
                                    let save_id = save_id.clone();
                                    view! {
                                        <div class="comment-edit">
                                            <textarea
                                                class="input"
                                                rows=3
                                                prop:value=move || draft.get()
                                                on:input=move |ev| set_draft.set(event_target_value(&ev))
                                            ></textarea>
                                            <div class="form-actions">
                                                <button class="btn-secondary" on:click=move |_| set_editing.set(None)>"Cancel"</button>
                                                <button
                                                    class="btn-primary"
                                                    prop:disabled=move || saving.get()
                                                    on:click=move |_| save(save_id.clone())
                                                >
                                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                                </button>
                                            </div>
                                        </div>
                                    }.into_any()
                                } else {
                                    view! { <p class="comment-content">{content.clone()}</p> }.into_any()
                                }}
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}
