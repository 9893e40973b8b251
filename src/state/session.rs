//! Session Utilities
//!
//! JWT token management: localStorage persistence, claim decoding for the
//! expiry check, and the Authorization header used by the API services.
//! The token is opaque apart from its standard claims; the server remains
//! the authority on whether it is still accepted.

use std::collections::HashMap;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

/// User record persisted next to the token
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
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

/// Standard claims we care about; everything else is carried opaquely
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Persist token and user after a successful auth exchange
pub fn store_session(token: &str, user: &SessionUser) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
        if let Ok(json) = serde_json::to_string(user) {
            let _ = storage.set_item(USER_KEY, &json);
        }
    }
}

/// The stored token, if any
pub fn token() -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
}

/// The stored user record, if any
pub fn load_user() -> Option<SessionUser> {
    let json = local_storage().and_then(|storage| storage.get_item(USER_KEY).ok().flatten())?;
    serde_json::from_str(&json).ok()
}

/// Drop the stored session
pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

/// Authorization header value for authenticated requests
pub fn auth_header() -> Option<String> {
    token().map(|token| format!("Bearer {token}"))
}

/// Whether a token is stored and not yet expired
pub fn is_authenticated() -> bool {
    match token().as_deref().map(decode_claims) {
        Some(Some(claims)) => !is_expired(&claims, chrono::Utc::now().timestamp()),
        _ => false,
    }
}

/// Decode the claims segment of a JWT without verifying the signature.
/// Verification belongs to the server; the client only needs the expiry.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64url_decode(payload)?;
    serde_json::from_slice(&bytes).ok()
}

/// A token without an `exp` claim is treated as expired
pub(crate) fn is_expired(claims: &Claims, now_secs: i64) -> bool {
    claims.exp.map(|exp| exp <= now_secs).unwrap_or(true)
}

/// Decode base64url (and plain base64) without padding requirements
fn base64url_decode(input: &str) -> Option<Vec<u8>> {
    fn sextet(byte: u8) -> Option<u32> {
        match byte {
            b'A'..=b'Z' => Some(u32::from(byte - b'A')),
            b'a'..=b'z' => Some(u32::from(byte - b'a') + 26),
            b'0'..=b'9' => Some(u32::from(byte - b'0') + 52),
            b'-' | b'+' => Some(62),
            b'_' | b'/' => Some(63),
            _ => None,
        }
    }

    let input = input.trim_end_matches('=');
    let mut out = Vec::with_capacity(input.len() * 3 / 4);
    let mut buffer = 0u32;
    let mut bits = 0u32;

    for &byte in input.as_bytes() {
        buffer = (buffer << 6) | sextet(byte)?;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"alg":"HS256","typ":"JWT"} . {"sub":"alice","exp":4102444800}
    const TOKEN: &str =
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJhbGljZSIsImV4cCI6NDEwMjQ0NDgwMH0.sig";
    // {"sub":"bob","exp":1000000000}
    const STALE_TOKEN: &str =
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJib2IiLCJleHAiOjEwMDAwMDAwMDB9.sig";

    #[test]
    fn test_base64url_decode() {
        assert_eq!(base64url_decode("aGVsbG8").unwrap(), b"hello");
        assert_eq!(base64url_decode("aGVsbG8=").unwrap(), b"hello");
        assert!(base64url_decode("not base64!").is_none());
    }

    #[test]
    fn test_decode_claims() {
        let claims = decode_claims(TOKEN).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.exp, Some(4_102_444_800));
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(decode_claims("not-a-token").is_none());
        assert!(decode_claims("one.two!.three").is_none());
    }

    #[test]
    fn test_expiry_check() {
        let fresh = decode_claims(TOKEN).unwrap();
        let stale = decode_claims(STALE_TOKEN).unwrap();
        let now = 1_700_000_000;

        assert!(!is_expired(&fresh, now));
        assert!(is_expired(&stale, now));

        // Missing exp means expired
        let no_exp = Claims {
            sub: None,
            exp: None,
            extra: HashMap::new(),
        };
        assert!(is_expired(&no_exp, now));
    }
}
