//! Navigation Component
//!
//! Header bar with brand, links, the realtime connection indicator, and
//! session actions.

use leptos::*;
use leptos_router::*;

use crate::realtime::{use_socket, ConnectionState};
use crate::state::global::AppState;

/// Navigation header component
#[component]
pub fn Navbar() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let socket = use_socket();
    let navigate = use_navigate();

    let state_for_logout = state.clone();
    let on_logout = move |_| {
        state_for_logout.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-white shadow-md">
            <div class="max-w-5xl mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/feed" class="flex items-center space-x-2">
                        <span class="text-2xl font-bold text-primary-600">"Ripple"</span>
                        <LiveIndicator state=socket.state() />
                    </A>

                    // Navigation links and session actions
                    <div class="flex items-center space-x-4">
                        <A
                            href="/feed"
                            class="text-gray-700 hover:text-primary-600 px-3 py-2 rounded-md text-sm font-medium"
                        >
                            "Feed"
                        </A>

                        {move || {
                            match state.current_user.get() {
                                Some(user) => {
                                    view! {
                                        <A
                                            href=format!("/profile/{}", user.id)
                                            class="text-gray-700 hover:text-primary-600 px-3 py-2 rounded-md text-sm font-medium"
                                        >
                                            "Profile"
                                        </A>
                                        <span class="text-sm text-gray-700">{user.username}</span>
                                        <button
                                            on:click=on_logout.clone()
                                            class="bg-red-500 hover:bg-red-600 text-white px-4 py-2 rounded-md text-sm font-medium transition"
                                        >
                                            "Logout"
                                        </button>
                                    }
                                        .into_view()
                                }
                                None => {
                                    view! {
                                        <A
                                            href="/login"
                                            class="text-gray-700 hover:text-primary-600 px-3 py-2 rounded-md text-sm font-medium"
                                        >
                                            "Login"
                                        </A>
                                    }
                                        .into_view()
                                }
                            }
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Realtime connection status dot
#[component]
fn LiveIndicator(state: RwSignal<ConnectionState>) -> impl IntoView {
    view! {
        {move || {
            if state.get() == ConnectionState::Connected {
                view! {
                    <span class="flex items-center space-x-1 text-xs text-green-500">
                        <span class="w-2 h-2 bg-green-500 rounded-full" />
                        <span>"live"</span>
                    </span>
                }
                    .into_view()
            } else {
                view! {
                    <span class="flex items-center space-x-1 text-xs text-gray-400">
                        <span class="w-2 h-2 bg-gray-400 rounded-full" />
                        <span>"offline"</span>
                    </span>
                }
                    .into_view()
            }
        }}
    }
}
