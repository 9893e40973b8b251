//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Navbar, Toast};
use crate::pages::{Feed, Login, Profile, Register};
use crate::realtime::{provide_socket, SocketClient, SocketConfig};
use crate::state::global::{provide_app_state, AppState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_app_state();

    // One realtime connection per application lifetime, shared via context
    // and torn down with the root scope
    let socket = SocketClient::new(SocketConfig::from_api_base(&api::get_api_base()));
    socket.connect();
    provide_socket(socket.clone());
    on_cleanup(move || socket.disconnect());

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 flex flex-col">
                // Navigation header
                <Navbar />

                // Main content area
                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/feed" /> } />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route
                            path="/feed"
                            view=|| view! { <RequireAuth><Feed /></RequireAuth> }
                        />
                        <Route
                            path="/profile/:id"
                            view=|| view! { <RequireAuth><Profile /></RequireAuth> }
                        />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Route guard: renders its children only for a signed-in user, otherwise
/// sends the visitor to the login page
#[component]
fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    view! {
        {move || {
            if state.current_user.get().is_some() {
                children().into_view()
            } else {
                view! { <Redirect path="/login" /> }.into_view()
            }
        }}
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2 text-gray-900">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/feed"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-md font-medium transition"
            >
                "Back to Feed"
            </A>
        </div>
    }
}
