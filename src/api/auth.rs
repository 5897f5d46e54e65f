//! Admin Authentication
//!
//! Bearer-token check guarding the admin endpoints.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::warn;

use crate::error::{CacheError, Result};

const BEARER_PREFIX: &str = "Bearer ";

/// Checks that `headers` carry `Authorization: Bearer <expected>`.
///
/// # Errors
/// Returns `CacheError::Unauthorized` if the header is missing, is not a
/// bearer credential, or names a different token.
pub fn require_bearer(headers: &HeaderMap, expected: &str) -> Result<()> {
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX));

    match presented {
        Some(token) if tokens_match(token, expected) => Ok(()),
        Some(_) => {
            warn!("Rejected admin request: bearer token mismatch");
            Err(CacheError::Unauthorized)
        }
        None => {
            warn!("Rejected admin request: missing bearer token");
            Err(CacheError::Unauthorized)
        }
    }
}

/// Compares tokens without short-circuiting on the first differing byte.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
