//! API Services
//!
//! Thin fetch wrappers over the Ripple REST API. Every operation returns
//! `Result<T, String>` where the error is the human-readable message from
//! the server when one is present.

pub mod auth;
pub mod client;
pub mod comments;
pub mod likes;
pub mod models;
pub mod posts;
pub mod users;

pub use client::{get_api_base, set_api_base};
