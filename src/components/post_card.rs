//! Post Card Component
//!
//! One post with author header, content, like/comment actions, and the
//! expandable comment section.

use leptos::*;
use leptos_router::*;

use crate::api::models::Post;
use crate::components::{CommentBox, LikeButton};
use crate::state::global::AppState;

/// Single post with actions
#[component]
pub fn PostCard(post: Post, #[prop(into)] on_delete: Callback<i64>) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let (show_comments, set_show_comments) = create_signal(false);

    let post_id = post.id;
    let author = post.user.clone();
    let author_id = author.id;
    let author_username = author.username.clone();
    let created = format_created_at(post.created_at.as_deref());

    let is_owner =
        create_memo(move |_| state.current_user.get().map(|user| user.id) == Some(author_id));

    let handle_delete = move |_| {
        let confirmed = web_sys::window()
            .and_then(|window| window.confirm_with_message("Delete this post?").ok())
            .unwrap_or(false);
        if confirmed {
            on_delete.call(post_id);
        }
    };

    view! {
        <div class="bg-white rounded-lg shadow-md p-6 mb-4">
            // Header
            <div class="flex items-start justify-between mb-4">
                <div class="flex items-center space-x-3">
                    <A href=format!("/profile/{author_id}")>
                        <div class="w-10 h-10 bg-primary-500 rounded-full flex items-center justify-center text-white font-semibold hover:opacity-80 transition">
                            {avatar_letter(&author_username)}
                        </div>
                    </A>
                    <div>
                        <A href=format!("/profile/{author_id}")>
                            <h3 class="font-semibold text-gray-900 hover:text-primary-600 transition">
                                {author_username.clone()}
                            </h3>
                        </A>
                        <p class="text-sm text-gray-500">{created}</p>
                    </div>
                </div>

                {move || {
                    is_owner.get().then(|| view! {
                        <button
                            on:click=handle_delete
                            class="text-red-500 hover:text-red-700 transition text-sm"
                            title="Delete post"
                        >
                            "Delete"
                        </button>
                    })
                }}
            </div>

            // Content
            <div class="mb-4">
                <p class="text-gray-800 whitespace-pre-wrap">{post.content.clone()}</p>
                {post.image_url.clone().map(|url| view! {
                    <img src=url alt="Post" class="mt-3 rounded-lg max-w-full h-auto" />
                })}
            </div>

            // Actions
            <div class="flex items-center space-x-4 pb-4 border-b border-gray-200">
                <LikeButton
                    post_id=post_id
                    initial_likes=post.likes_count
                    initial_liked=post.liked_by_current_user
                />

                <button
                    on:click=move |_| set_show_comments.update(|open| *open = !*open)
                    class="flex items-center space-x-2 px-4 py-2 rounded-md bg-gray-200 hover:bg-gray-300 text-gray-700 transition"
                >
                    <span>"💬"</span>
                    <span class="font-medium">{post.comments_count}</span>
                </button>
            </div>

            // Comments section
            {move || show_comments.get().then(|| view! { <CommentBox post_id=post_id /> })}
        </div>
    }
}

/// Avatar placeholder from the first letter of the username
pub(crate) fn avatar_letter(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "U".to_string())
}

/// Render a server timestamp for display. The API sends ISO-8601 local
/// datetimes without a zone; tolerate an offset form as well.
pub(crate) fn format_created_at(raw: Option<&str>) -> String {
    raw.and_then(|value| {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
            return Some(dt.format("%b %d, %Y %H:%M").to_string());
        }
        chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
    })
    .unwrap_or_else(|| "Just now".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_created_at() {
        assert_eq!(
            format_created_at(Some("2024-01-15T10:30:00")),
            "Jan 15, 2024 10:30"
        );
        assert_eq!(
            format_created_at(Some("2024-01-15T10:30:00.123456")),
            "Jan 15, 2024 10:30"
        );
        assert_eq!(
            format_created_at(Some("2024-01-15T10:30:00Z")),
            "Jan 15, 2024 10:30"
        );
        assert_eq!(format_created_at(Some("yesterday")), "Just now");
        assert_eq!(format_created_at(None), "Just now");
    }

    #[test]
    fn test_avatar_letter() {
        assert_eq!(avatar_letter("alice"), "A");
        assert_eq!(avatar_letter(""), "U");
    }
}
