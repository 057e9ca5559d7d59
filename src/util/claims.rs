//! Read-only peek at the JWT payload.
//!
//! The signature is not verified here; the backend remains the authority.
//! The UI only needs the `user_id` claim to fill request bodies.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    user_id: Option<i64>,
}

/// Extract the `user_id` claim from a `header.payload.signature` token.
pub fn user_id_from_token(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("token payload is not base64url: {e}");
            return None;
        }
    };
    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => claims.user_id.filter(|id| *id > 0),
        Err(e) => {
            log::debug!("token payload is not a claims object: {e}");
            None
        }
    }
}
