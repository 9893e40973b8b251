//! Post Service
//!
//! CRUD operations for posts and the paginated feed.

use gloo_net::http::Request;

use crate::api::client::{authorized, error_message, get_api_base};
use crate::api::models::{Page, Post};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PostRequest {
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

/// Create a new post
pub async fn create_post(content: &str, image_url: Option<&str>) -> Result<Post, String> {
    let response = authorized(Request::post(&format!("{}/posts", get_api_base())))
        .json(&PostRequest {
            content: content.to_string(),
            image_url: image_url.map(|s| s.to_string()),
        })
        .map_err(|e| format!("Request build error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to create post").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetch one page of the feed
pub async fn fetch_feed(page: u32, size: u32) -> Result<Page<Post>, String> {
    let response = authorized(Request::get(&format!(
        "{}/posts?page={}&size={}",
        get_api_base(),
        page,
        size
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to fetch posts").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetch a single post
pub async fn fetch_post(post_id: i64) -> Result<Post, String> {
    let response = authorized(Request::get(&format!(
        "{}/posts/{}",
        get_api_base(),
        post_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to fetch post").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetch one page of a user's posts
pub async fn fetch_user_posts(user_id: i64, page: u32, size: u32) -> Result<Page<Post>, String> {
    let response = authorized(Request::get(&format!(
        "{}/posts/user/{}?page={}&size={}",
        get_api_base(),
        user_id,
        page,
        size
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to fetch user posts").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Update a post's content
pub async fn update_post(
    post_id: i64,
    content: &str,
    image_url: Option<&str>,
) -> Result<Post, String> {
    let response = authorized(Request::put(&format!(
        "{}/posts/{}",
        get_api_base(),
        post_id
    )))
    .json(&PostRequest {
        content: content.to_string(),
        image_url: image_url.map(|s| s.to_string()),
    })
    .map_err(|e| format!("Request build error: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to update post").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Delete a post
pub async fn delete_post(post_id: i64) -> Result<(), String> {
    let response = authorized(Request::delete(&format!(
        "{}/posts/{}",
        get_api_base(),
        post_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to delete post").await);
    }

    Ok(())
}
