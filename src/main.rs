//! Ripple
//!
//! Real-time social feed client built with Leptos (WASM).
//!
//! # Features
//!
//! - Paginated post feed with posts, comments, and replies
//! - Like/unlike with live counts
//! - Near-real-time updates over a WebSocket pub/sub channel
//! - JWT-based session handling
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All business logic lives in the backend API; this client is
//! presentation plus thin fetch wrappers and a realtime subscription layer.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod realtime;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
