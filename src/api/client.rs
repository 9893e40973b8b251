//! HTTP API Client
//!
//! Base URL resolution and shared request plumbing for the REST services.

use gloo_net::http::{RequestBuilder, Response};

use crate::state::session;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("ripple_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("ripple_api_url", url);
        }
    }
}

/// Error body returned by the server on failed operations
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

/// Attach the bearer credential when a session is present
pub(crate) fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::auth_header() {
        Some(bearer) => builder.header("Authorization", &bearer),
        None => builder,
    }
}

/// Read the server's error message from a failed response, falling back to
/// an operation-specific message
pub(crate) async fn error_message(response: Response, fallback: &str) -> String {
    match response.json::<ApiError>().await {
        Ok(err) => err.message.unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}
