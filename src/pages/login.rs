//! Login Page
//!
//! Credential form feeding the auth service.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::AppState;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let name = username.get_untracked();
            let pass = password.get_untracked();

            match api::auth::login(&name, &pass).await {
                Ok(auth) => {
                    state.sign_in(auth.user());
                    navigate("/feed", Default::default());
                }
                Err(err) => set_error.set(Some(err)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto py-16 px-4">
            <div class="bg-white rounded-lg shadow-md p-8">
                <h1 class="text-3xl font-bold text-center text-primary-600 mb-2">"Ripple"</h1>
                <p class="text-center text-gray-500 mb-8">"Sign in to your account"</p>

                {move || {
                    error.get().map(|message| view! {
                        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-md mb-4">
                            {message}
                        </div>
                    })
                }}

                <form on:submit=on_submit>
                    <label class="block text-sm font-medium text-gray-700 mb-1">"Username"</label>
                    <input
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        required
                        class="w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500 mb-4"
                    />

                    <label class="block text-sm font-medium text-gray-700 mb-1">"Password"</label>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        required
                        class="w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary-500 mb-6"
                    />

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-3 bg-primary-600 text-white rounded-md hover:bg-primary-700 disabled:opacity-50 disabled:cursor-not-allowed transition font-medium"
                    >
                        {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class="text-center text-sm text-gray-600 mt-6">
                    "Don't have an account? "
                    <A href="/register" class="text-primary-600 hover:underline font-medium">
                        "Register"
                    </A>
                </p>
            </div>
        </div>
    }
}
