//! State Management
//!
//! Reactive application state and session (JWT) handling.

pub mod global;
pub mod session;

pub use global::{provide_app_state, AppState};
pub use session::SessionUser;
