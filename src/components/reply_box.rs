//! Reply Box Component
//!
//! Nested replies under one comment. Listens on the post's comment topic and
//! refetches when a reply event names this comment as its parent.

use leptos::*;

use crate::api;
use crate::api::models::Reply;
use crate::components::post_card::format_created_at;
use crate::realtime::events::{self, CommentAction, CommentEvent};
use crate::realtime::use_topic;

/// Replies for a comment, with live updates
#[component]
pub fn ReplyBox(comment_id: i64, post_id: i64) -> impl IntoView {
    let (replies, set_replies) = create_signal(Vec::<Reply>::new());
    let (draft, set_draft) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);

    let load = move || {
        spawn_local(async move {
            match api::comments::fetch_comment_replies(comment_id).await {
                Ok(list) => set_replies.set(list),
                Err(err) => logging::error!("failed to load replies: {err}"),
            }
        });
    };

    // Fetch on mount
    create_effect(move |_| load());

    // Refetch when a reply lands under this comment
    use_topic(
        move || events::post_comments_topic(post_id),
        move |payload| {
            if let Some(event) = events::decode::<CommentEvent>(payload) {
                if event.action == CommentAction::ReplyAdded
                    && event.parent_comment_id == Some(comment_id)
                {
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
            match api::comments::add_reply(comment_id, &content).await {
                Ok(_) => {
                    set_draft.set(String::new());
                    load();
                }
                Err(err) => logging::error!("failed to add reply: {err}"),
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="ml-8 mt-3 space-y-3">
            <form on:submit=on_submit class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    placeholder="Write a reply..."
                    class="flex-1 px-3 py-1 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500"
                />
                <button
                    type="submit"
                    disabled=move || sending.get() || draft.get().trim().is_empty()
                    class="px-4 py-1 text-sm bg-primary-600 text-white rounded-md hover:bg-primary-700 disabled:opacity-50 disabled:cursor-not-allowed transition"
                >
                    "Reply"
                </button>
            </form>

            <div class="space-y-2">
                {move || {
                    replies.get().into_iter().map(|reply| {
                        let created = format_created_at(reply.created_at.as_deref());
                        view! {
                            <div class="bg-white p-3 rounded-md border border-gray-200">
                                <div class="flex items-center space-x-2 mb-1">
                                    <span class="font-semibold text-sm">{reply.user.username.clone()}</span>
                                    <span class="text-xs text-gray-500">{created}</span>
                                </div>
                                <p class="text-sm text-gray-700">{reply.content.clone()}</p>
                            </div>
                        }
                    }).collect_view()
                }}
            </div>
        </div>
    }
}
