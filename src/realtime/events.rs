//! Event Catalogue
//!
//! Topics and payload shapes published by the server. Topic names are plain
//! strings scoped by convention; nothing here validates them, an unknown
//! topic simply never matches a publisher.

use leptos::logging;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Topic carrying live like-count updates for a post
pub fn post_likes_topic(post_id: i64) -> String {
    format!("/topic/post/{post_id}/likes")
}

/// Topic carrying comment and reply activity for a post
pub fn post_comments_topic(post_id: i64) -> String {
    format!("/topic/post/{post_id}/comments")
}

/// Decode an event payload into a typed event, reporting shape mismatches
/// instead of raising them. A malformed payload never takes a component down.
pub fn decode<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    match serde_json::from_value(payload.clone()) {
        Ok(event) => Some(event),
        Err(err) => {
            logging::warn!("realtime: unexpected event shape: {err}");
            None
        }
    }
}

/// Published on `/topic/post/{postId}/likes` whenever someone likes or
/// unlikes the post
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEvent {
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub likes_count: u32,
    #[serde(default)]
    pub action: Option<LikeAction>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeAction {
    Like,
    Unlike,
}

/// Published on `/topic/post/{postId}/comments` for both top-level comments
/// and replies
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEvent {
    #[serde(default)]
    pub comment_id: Option<i64>,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub comments_count: Option<u32>,
    pub action: CommentAction,
    /// Set for replies, names the parent comment
    #[serde(default)]
    pub parent_comment_id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentAction {
    CommentAdded,
    ReplyAdded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_topic_names() {
        assert_eq!(post_likes_topic(42), "/topic/post/42/likes");
        assert_eq!(post_comments_topic(5), "/topic/post/5/comments");
    }

    #[test]
    fn test_decode_like_event() {
        let payload = json!({
            "postId": 42,
            "userId": 7,
            "username": "alice",
            "likesCount": 13,
            "action": "LIKE",
            "timestamp": 1700000000000_i64,
        });

        let event: LikeEvent = decode(&payload).unwrap();
        assert_eq!(event.likes_count, 13);
        assert_eq!(event.action, Some(LikeAction::Like));
        assert_eq!(event.post_id, Some(42));
    }

    #[test]
    fn test_decode_minimal_like_event() {
        // Only the count is required; everything else is tolerated missing
        let event: LikeEvent = decode(&json!({"likesCount": 7})).unwrap();
        assert_eq!(event.likes_count, 7);
        assert_eq!(event.action, None);
    }

    #[test]
    fn test_decode_comment_event() {
        let payload = json!({
            "commentId": 9,
            "postId": 5,
            "action": "REPLY_ADDED",
            "parentCommentId": 3,
        });

        let event: CommentEvent = decode(&payload).unwrap();
        assert_eq!(event.action, CommentAction::ReplyAdded);
        assert_eq!(event.parent_comment_id, Some(3));
    }

    #[test]
    fn test_decode_rejects_unknown_action() {
        let payload = json!({"action": "COMMENT_PURGED"});
        assert!(decode::<CommentEvent>(&payload).is_none());
    }
}
