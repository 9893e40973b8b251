//! Authentication Service
//!
//! Login and registration against the auth endpoints. A successful exchange
//! persists the bearer token and user record for the session layer.

use gloo_net::http::Request;

use crate::api::client::{error_message, get_api_base};
use crate::state::session::{self, SessionUser};

/// Token plus user record returned by the auth endpoints
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl AuthResponse {
    /// The user record this session belongs to
    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            bio: self.bio.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Log in with username and password
pub async fn login(username: &str, password: &str) -> Result<AuthResponse, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest {
        username: String,
        password: String,
    }

    let response = Request::post(&format!("{}/auth/login", get_api_base()))
        .json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| format!("Request build error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Login failed").await);
    }

    let auth: AuthResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    session::store_session(&auth.token, &auth.user());
    Ok(auth)
}

/// Register a new account
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<AuthResponse, String> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct RegisterRequest {
        username: String,
        email: String,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        full_name: Option<String>,
    }

    let response = Request::post(&format!("{}/auth/register", get_api_base()))
        .json(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.map(|s| s.to_string()),
        })
        .map_err(|e| format!("Request build error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(error_message(response, "Registration failed").await);
    }

    let auth: AuthResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    session::store_session(&auth.token, &auth.user());
    Ok(auth)
}

/// Drop the stored session
pub fn logout() {
    session::clear();
}
