//! Profile Page
//!
//! User header plus that user's posts.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::api::models::{Post, UserProfile};
use crate::components::post_card::{avatar_letter, format_created_at};
use crate::components::{Loading, PostCard};
use crate::state::global::AppState;

/// Profile page component
#[component]
pub fn Profile() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let params = use_params_map();
    let user_id = create_memo(move |_| {
        params
            .get()
            .get("id")
            .and_then(|id| id.parse::<i64>().ok())
            .unwrap_or_default()
    });

    let (user, set_user) = create_signal(Option::<UserProfile>::None);
    let (posts, set_posts) = create_signal(Vec::<Post>::new());
    let (loading_profile, set_loading_profile) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    // Load user and posts whenever the route's user id changes
    create_effect(move |_| {
        let id = user_id.get();
        set_loading_profile.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::users::fetch_user(id).await {
                Ok(profile) => set_user.set(Some(profile)),
                Err(err) => {
                    set_error.set(Some(err));
                    set_loading_profile.set(false);
                    return;
                }
            }

            match api::posts::fetch_user_posts(id, 0, 20).await {
                Ok(feed) => set_posts.set(feed.content),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading_profile.set(false);
        });
    });

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

    view! {
        <div class="max-w-3xl mx-auto py-8 px-4">
            {move || {
                if loading_profile.get() {
                    return view! { <Loading /> }.into_view();
                }

                match (user.get(), error.get()) {
                    (Some(profile), None) => {
                        let post_count = posts.get().len();
                        view! {
                            <ProfileHeader profile=profile post_count=post_count />

                            <h2 class="text-2xl font-bold mb-4 text-gray-900">"Posts"</h2>

                            {if post_count == 0 {
                                view! {
                                    <div class="text-center py-12 bg-white rounded-lg shadow-md">
                                        <p class="text-gray-500 text-lg">"No posts yet"</p>
                                    </div>
                                }
                                    .into_view()
                            } else {
                                posts.get()
                                    .into_iter()
                                    .map(|post| view! { <PostCard post=post on_delete=on_delete /> })
                                    .collect_view()
                            }}
                        }
                            .into_view()
                    }
                    (_, message) => {
                        let message = message.unwrap_or_else(|| "User not found".to_string());
                        view! {
                            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-md">
                                {message}
                            </div>
                        }
                            .into_view()
                    }
                }
            }}
        </div>
    }
}

#[component]
fn ProfileHeader(profile: UserProfile, post_count: usize) -> impl IntoView {
    let joined = format_created_at(profile.created_at.as_deref());

    view! {
        <div class="bg-white rounded-lg shadow-md p-8 mb-6">
            <div class="flex items-start space-x-6">
                <div class="w-24 h-24 bg-primary-500 rounded-full flex items-center justify-center text-white text-3xl font-bold">
                    {avatar_letter(&profile.username)}
                </div>

                <div class="flex-1">
                    <h1 class="text-3xl font-bold text-gray-900 mb-2">
                        {profile.full_name.clone().unwrap_or_else(|| "Unnamed User".to_string())}
                    </h1>
                    <p class="text-gray-600 mb-2">"@" {profile.username.clone()}</p>

                    {profile.bio.clone().map(|bio| view! {
                        <p class="text-gray-700 mt-4">{bio}</p>
                    })}

                    <div class="flex space-x-6 mt-6 text-sm text-gray-600">
                        <div>
                            <span class="font-semibold text-gray-900">{post_count}</span>
                            " Posts"
                        </div>
                        <div>"Joined " {joined}</div>
                    </div>
                </div>
            </div>
        </div>
    }
}
