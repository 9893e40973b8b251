//! Comment Box Component
//!
//! Comment list and composer for one post. The list refetches whenever a
//! comment event for the post arrives over the realtime channel; the event
//! itself is only a hint, the API response is authoritative.

use std::collections::HashSet;

use leptos::*;

use crate::api;
use crate::api::models::Comment;
use crate::components::post_card::format_created_at;
use crate::components::ReplyBox;
use crate::realtime::events::{self, CommentAction, CommentEvent};
use crate::realtime::use_topic;

/// Comments for a post, with live updates
#[component]
pub fn CommentBox(post_id: i64) -> impl IntoView {
    let (comments, set_comments) = create_signal(Vec::<Comment>::new());
    let (draft, set_draft) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);
    let (open_replies, set_open_replies) = create_signal(HashSet::<i64>::new());

    let load = move || {
        spawn_local(async move {
            match api::comments::fetch_post_comments(post_id).await {
                Ok(list) => set_comments.set(list),
                Err(err) => logging::error!("failed to load comments: {err}"),
            }
        });
    };

    // Fetch on mount
    create_effect(move |_| load());

    // Refetch when someone comments on this post
    use_topic(
        move || events::post_comments_topic(post_id),
        move |payload| {
            if let Some(event) = events::decode::<CommentEvent>(payload) {
                if event.action == CommentAction::CommentAdded {
                    load();
                }
            }
        },
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let content = draft.get_untracked();
        if content.trim().is_empty() || sending.get_untracked() {
            return;
        }
        set_sending.set(true);

        spawn_local(async move {
            match api::comments::add_comment(post_id, &content).await {
                Ok(_) => {
                    set_draft.set(String::new());
                    load();
                }
                Err(err) => logging::error!("failed to add comment: {err}"),
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="mt-4">
            <h3 class="text-lg font-semibold mb-3">
                "Comments (" {move || comments.get().len()} ")"
            </h3>

            <form on:submit=on_submit class="mb-4">
                <div class="flex space-x-2">
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        placeholder="Write a comment..."
                        class="flex-1 px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500"
                    />
                    <button
                        type="submit"
                        disabled=move || sending.get() || draft.get().trim().is_empty()
                        class="px-6 py-2 bg-primary-600 text-white rounded-md hover:bg-primary-700 disabled:opacity-50 disabled:cursor-not-allowed transition"
                    >
                        "Post"
                    </button>
                </div>
            </form>

            <div class="space-y-4">
                {move || {
                    comments.get().into_iter().map(|comment| {
                        let comment_id = comment.id;
                        let created = format_created_at(comment.created_at.as_deref());
                        let open = move || open_replies.get().contains(&comment_id);

                        view! {
                            <div class="bg-gray-50 p-4 rounded-md">
                                <div class="flex items-center space-x-2">
                                    <span class="font-semibold text-sm">{comment.user.username.clone()}</span>
                                    <span class="text-xs text-gray-500">{created}</span>
                                </div>
                                <p class="text-gray-700 mt-1">{comment.content.clone()}</p>

                                <button
                                    on:click=move |_| {
                                        set_open_replies.update(|open| {
                                            if !open.remove(&comment_id) {
                                                open.insert(comment_id);
                                            }
                                        })
                                    }
                                    class="text-sm text-primary-600 hover:text-primary-700 mt-2"
                                >
                                    {move || if open() { "Hide" } else { "Show" }}
                                    " Replies (" {comment.replies_count} ")"
                                </button>

                                {move || open().then(|| view! {
                                    <ReplyBox comment_id=comment_id post_id=post_id />
                                })}
                            </div>
                        }
                    }).collect_view()
                }}
            </div>
        </div>
    }
}
