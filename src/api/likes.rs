//! Like Service
//!
//! Like toggling and counts. Live count changes arrive separately over the
//! realtime channel; these calls return the authoritative state.

use gloo_net::http::Request;

use crate::api::client::{authorized, error_message, get_api_base};

/// Result of toggling a like
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(default)]
    pub likes_count: Option<u32>,
}

#[derive(Debug, serde::Deserialize)]
struct LikeCount {
    count: u32,
}

/// Toggle the current user's like on a post
pub async fn toggle_like(post_id: i64) -> Result<LikeStatus, String> {
    let response = authorized(Request::post(&format!(
        "{}/likes/post/{}",
        get_api_base(),
        post_id
    )))
    .json(&serde_json::json!({}))
    .map_err(|e| format!("Request build error: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to toggle like").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Whether the current user has liked a post
pub async fn fetch_like_status(post_id: i64) -> Result<bool, String> {
    let response = authorized(Request::get(&format!(
        "{}/likes/post/{}/status",
        get_api_base(),
        post_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to get like status").await);
    }

    let status: LikeStatus = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;
    Ok(status.liked)
}

/// Current like count for a post
pub async fn fetch_like_count(post_id: i64) -> Result<u32, String> {
    let response = authorized(Request::get(&format!(
        "{}/likes/post/{}/count",
        get_api_base(),
        post_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to get like count").await);
    }

    let count: LikeCount = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;
    Ok(count.count)
}
