//! User Service

use gloo_net::http::Request;

use crate::api::client::{authorized, error_message, get_api_base};
use crate::api::models::UserProfile;

/// Fetch a user's public profile
pub async fn fetch_user(user_id: i64) -> Result<UserProfile, String> {
    let response = authorized(Request::get(&format!(
        "{}/users/{}",
        get_api_base(),
        user_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load profile").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}
