//! UI Components
//!
//! Reusable Leptos components for the feed.

pub mod comment_box;
pub mod like_button;
pub mod loading;
pub mod navbar;
pub mod post_card;
pub mod reply_box;
pub mod toast;

pub use comment_box::CommentBox;
pub use like_button::LikeButton;
pub use loading::{CardSkeleton, Loading};
pub use navbar::Navbar;
pub use post_card::PostCard;
pub use reply_box::ReplyBox;
pub use toast::Toast;
