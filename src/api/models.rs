//! API Data Models
//!
//! Resource shapes returned by the REST API. Field names mirror the server's
//! camelCase JSON.

use std::collections::HashMap;

/// Author summary embedded in posts, comments, and replies
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    pub user: UserSummary,
    /// Not every server build sends this; absent means unknown, shown unliked
    #[serde(default)]
    pub liked_by_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub user: UserSummary,
    #[serde(default)]
    pub replies_count: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub user: UserSummary,
}

/// Full profile returned by the users endpoint
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Spring-style page envelope for paginated listings
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub last: bool,
    /// Paging metadata we don't consume but shouldn't choke on
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_decoding() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": 12,
                "content": "hello world",
                "imageUrl": null,
                "likesCount": 3,
                "commentsCount": 1,
                "createdAt": "2024-01-15T10:30:00",
                "user": {"id": 4, "username": "alice", "fullName": "Alice A."}
            }"#,
        )
        .unwrap();

        assert_eq!(post.id, 12);
        assert_eq!(post.likes_count, 3);
        assert_eq!(post.user.username, "alice");
        // Absent in this server build
        assert!(!post.liked_by_current_user);
    }

    #[test]
    fn test_page_envelope_decoding() {
        let page: Page<Post> = serde_json::from_str(
            r#"{
                "content": [{
                    "id": 1,
                    "content": "first",
                    "user": {"id": 2, "username": "bob"}
                }],
                "totalPages": 5,
                "totalElements": 93,
                "number": 0,
                "last": false,
                "size": 20,
                "first": true
            }"#,
        )
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 5);
        assert!(!page.last);
    }

    #[test]
    fn test_empty_page_defaults() {
        let page: Page<Post> = serde_json::from_str("{}").unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }
}
