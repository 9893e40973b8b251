//! Feed Page
//!
//! Paginated post feed with a composer at the top.

use std::rc::Rc;

use leptos::*;

use crate::api;
use crate::api::models::Post;
use crate::components::{CardSkeleton, PostCard};
use crate::state::global::AppState;

const PAGE_SIZE: u32 = 20;

/// Feed page component
#[component]
pub fn Feed() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (posts, set_posts) = create_signal(Vec::<Post>::new());
    let (page, set_page) = create_signal(0u32);
    let (last_page, set_last_page) = create_signal(true);
    let (loading_feed, set_loading_feed) = create_signal(true);

    let (content, set_content) = create_signal(String::new());
    let (image_url, set_image_url) = create_signal(String::new());
    let (creating, set_creating) = create_signal(false);

    let state_for_load = state.clone();
    let load_page = Rc::new(move |page_index: u32| {
        let state = state_for_load.clone();
        spawn_local(async move {
            match api::posts::fetch_feed(page_index, PAGE_SIZE).await {
                Ok(feed) => {
                    if page_index == 0 {
                        set_posts.set(feed.content);
                    } else {
                        set_posts.update(|list| list.extend(feed.content));
                    }
                    set_page.set(page_index);
                    set_last_page.set(feed.last);
                }
                Err(err) => state.show_error(&err),
            }
            set_loading_feed.set(false);
        });
    });

    // Initial page on mount
    let initial_load = Rc::clone(&load_page);
    create_effect(move |_| initial_load(0));

    let state_for_create = state.clone();
    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = content.get_untracked();
        if body.trim().is_empty() || creating.get_untracked() {
            return;
        }
        set_creating.set(true);

        let state = state_for_create.clone();
        spawn_local(async move {
            let image = image_url.get_untracked();
            let image = (!image.trim().is_empty()).then_some(image);

            match api::posts::create_post(&body, image.as_deref()).await {
                Ok(post) => {
                    set_posts.update(|list| list.insert(0, post));
                    set_content.set(String::new());
                    set_image_url.set(String::new());
                }
                Err(err) => state.show_error(&err),
            }
            set_creating.set(false);
        });
    };

    let state_for_delete = state.clone();
    let on_delete = Callback::new(move |post_id: i64| {
        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::posts::delete_post(post_id).await {
                Ok(()) => set_posts.update(|list| list.retain(|post| post.id != post_id)),
                Err(err) => state.show_error(&err),
            }
        });
    });

    let load_more = Rc::clone(&load_page);

    view! {
        <div class="max-w-3xl mx-auto py-8 px-4">
            // Composer
            <div class="bg-white rounded-lg shadow-md p-6 mb-6">
                <h2 class="text-xl font-bold mb-4">"Create Post"</h2>

                <form on:submit=on_create>
                    <textarea
                        prop:value=move || content.get()
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                        placeholder="What's on your mind?"
                        rows="4"
                        class="w-full px-4 py-3 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500 mb-3"
                    />

                    <input
                        type="url"
                        prop:value=move || image_url.get()
                        on:input=move |ev| set_image_url.set(event_target_value(&ev))
                        placeholder="Image URL (optional)"
                        class="w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500 mb-3"
                    />

                    <button
                        type="submit"
                        disabled=move || creating.get() || content.get().trim().is_empty()
                        class="w-full py-3 bg-primary-600 text-white rounded-md hover:bg-primary-700 disabled:opacity-50 disabled:cursor-not-allowed transition font-medium"
                    >
                        {move || if creating.get() { "Posting..." } else { "Post" }}
                    </button>
                </form>
            </div>

            // Feed
            {move || {
                if loading_feed.get() {
                    view! {
                        <CardSkeleton />
                        <CardSkeleton />
                        <CardSkeleton />
                    }
                        .into_view()
                } else if posts.get().is_empty() {
                    view! {
                        <div class="text-center py-12 bg-white rounded-lg shadow-md">
                            <p class="text-gray-500 text-lg">"No posts yet. Be the first to post!"</p>
                        </div>
                    }
                        .into_view()
                } else {
                    posts.get()
                        .into_iter()
                        .map(|post| view! { <PostCard post=post on_delete=on_delete /> })
                        .collect_view()
                }
            }}

            // Pagination
            {move || {
                (!loading_feed.get() && !last_page.get()).then(|| {
                    let load_more = Rc::clone(&load_more);
                    view! {
                        <button
                            on:click=move |_| load_more(page.get_untracked() + 1)
                            class="w-full py-3 bg-white rounded-lg shadow-md text-primary-600 hover:bg-gray-50 transition font-medium"
                        >
                            "Load more"
                        </button>
                    }
                })
            }}
        </div>
    }
}
