//! Comment Service
//!
//! Comments and nested replies for a post.

use gloo_net::http::Request;

use crate::api::client::{authorized, error_message, get_api_base};
use crate::api::models::{Comment, Reply};

#[derive(serde::Serialize)]
struct CommentRequest {
    content: String,
}

/// Add a comment to a post
pub async fn add_comment(post_id: i64, content: &str) -> Result<Comment, String> {
    let response = authorized(Request::post(&format!(
        "{}/comments/post/{}",
        get_api_base(),
        post_id
    )))
    .json(&CommentRequest {
        content: content.to_string(),
    })
    .map_err(|e| format!("Request build error: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to add comment").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetch all comments on a post
pub async fn fetch_post_comments(post_id: i64) -> Result<Vec<Comment>, String> {
    let response = authorized(Request::get(&format!(
        "{}/comments/post/{}",
        get_api_base(),
        post_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to fetch comments").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Add a reply to a comment
pub async fn add_reply(comment_id: i64, content: &str) -> Result<Reply, String> {
    let response = authorized(Request::post(&format!(
        "{}/comments/{}/replies",
        get_api_base(),
        comment_id
    )))
    .json(&CommentRequest {
        content: content.to_string(),
    })
    .map_err(|e| format!("Request build error: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to add reply").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetch the replies nested under a comment
pub async fn fetch_comment_replies(comment_id: i64) -> Result<Vec<Reply>, String> {
    let response = authorized(Request::get(&format!(
        "{}/comments/{}/replies",
        get_api_base(),
        comment_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to fetch replies").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Delete a comment
pub async fn delete_comment(comment_id: i64) -> Result<(), String> {
    let response = authorized(Request::delete(&format!(
        "{}/comments/{}",
        get_api_base(),
        comment_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to delete comment").await);
    }

    Ok(())
}

/// Delete a reply
pub async fn delete_reply(reply_id: i64) -> Result<(), String> {
    let response = authorized(Request::delete(&format!(
        "{}/comments/replies/{}",
        get_api_base(),
        reply_id
    )))
    .send()
    .await
    .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to delete reply").await);
    }

    Ok(())
}
