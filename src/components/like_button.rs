//! Like Button Component
//!
//! Like/unlike toggle with a live count. The count updates in place when a
//! like event for this post arrives over the realtime channel; the toggle
//! itself goes through the REST API.

use leptos::*;

use crate::api;
use crate::realtime::events::{self, LikeEvent};
use crate::realtime::use_topic;

/// Like button with realtime count updates
#[component]
pub fn LikeButton(post_id: i64, initial_likes: u32, initial_liked: bool) -> impl IntoView {
    let (likes, set_likes) = create_signal(initial_likes);
    let (liked, set_liked) = create_signal(initial_liked);
    let (busy, set_busy) = create_signal(false);

    // Live count pushed from the server
    use_topic(
        move || events::post_likes_topic(post_id),
        move |payload| {
            if let Some(event) = events::decode::<LikeEvent>(payload) {
                set_likes.set(event.likes_count);
            }
        },
    );

    let on_toggle = move |_| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);

        spawn_local(async move {
            match api::likes::toggle_like(post_id).await {
                Ok(status) => {
                    set_liked.set(status.liked);
                    if let Some(count) = status.likes_count {
                        set_likes.set(count);
                    }
                }
                Err(err) => {
                    logging::error!("failed to toggle like: {err}");
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <button
            on:click=on_toggle
            disabled=move || busy.get()
            class=move || {
                let base = "flex items-center space-x-2 px-4 py-2 rounded-md transition";
                let tone = if liked.get() {
                    "bg-red-500 hover:bg-red-600 text-white"
                } else {
                    "bg-gray-200 hover:bg-gray-300 text-gray-700"
                };
                let cursor = if busy.get() { "opacity-50 cursor-not-allowed" } else { "" };
                format!("{base} {tone} {cursor}")
            }
        >
            <span class="text-lg">"♥"</span>
            <span class="font-medium">{move || likes.get()}</span>
        </button>
    }
}
