//! Request DTOs for the cache server API
//!
//! Defines the shape of incoming query strings and JSON bodies.

use serde_json::Value;

use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

/// Query parameters for `PUT /v1/cache/{key}`
///
/// `ttl` is kept as raw text so a malformed value never rejects the write.
#[derive(Debug, Clone, Default)]
pub struct PutParams {
    /// TTL in seconds as sent by the client
    pub ttl: Option<String>,
}

impl PutParams {
    /// Builds the parameters from decoded query pairs.
    ///
    /// When `ttl` is repeated the first occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let ttl = pairs
            .into_iter()
            .find(|(name, _)| name == "ttl")
            .map(|(_, value)| value);
        Self { ttl }
    }

    /// Returns the requested TTL in seconds.
    ///
    /// Only the leading run of digits counts, so `1.5` and `5s` read as 1 and
    /// 5. Missing, non-numeric, negative and zero values all mean "no expiry".
    pub fn ttl_seconds(&self) -> Option<u64> {
        self.ttl
            .as_deref()
            .and_then(leading_integer)
            .filter(|ttl| *ttl > 0)
    }
}

fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Request body for `POST /v1/admin/config/eviction`
#[derive(Debug, Clone, Default)]
pub struct EvictionConfigRequest {
    /// Requested policy name
    pub policy: Option<Value>,
}

impl EvictionConfigRequest {
    /// Parses the raw request body, whatever its content type.
    ///
    /// Any JSON document is accepted here. Only an object carries a `policy`
    /// field, so arrays and scalars fail later in [`validate`](Self::validate).
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(body)
            .map_err(|_| CacheError::InvalidRequest("invalid json".to_string()))?;

        Ok(Self {
            policy: document
                .as_object()
                .and_then(|fields| fields.get("policy"))
                .cloned(),
        })
    }

    /// Validates the requested policy name.
    pub fn validate(&self) -> Result<EvictionPolicy> {
        self.policy
            .as_ref()
            .and_then(|value| value.as_str())
            .and_then(|name| name.parse().ok())
            .ok_or_else(|| CacheError::InvalidRequest("invalid policy".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ttl: &str) -> PutParams {
        PutParams {
            ttl: Some(ttl.to_string()),
        }
    }

    #[test]
    fn test_ttl_seconds_parses_positive_integer() {
        assert_eq!(params("60").ttl_seconds(), Some(60));
        assert_eq!(params(" 5 ").ttl_seconds(), Some(5));
    }

    #[test]
    fn test_ttl_seconds_reads_leading_digits() {
        assert_eq!(params("1.5").ttl_seconds(), Some(1));
        assert_eq!(params("5s").ttl_seconds(), Some(5));
        assert_eq!(params("+7").ttl_seconds(), Some(7));
        assert_eq!(params("0.9").ttl_seconds(), None);
    }

    #[test]
    fn test_first_ttl_wins() {
        let pairs = vec![
            ("other".to_string(), "9".to_string()),
            ("ttl".to_string(), "1".to_string()),
            ("ttl".to_string(), "2".to_string()),
        ];
        assert_eq!(PutParams::from_pairs(pairs).ttl_seconds(), Some(1));
        assert_eq!(PutParams::from_pairs(Vec::new()).ttl, None);
    }

    #[test]
    fn test_ttl_seconds_lenient_on_bad_input() {
        assert_eq!(PutParams::default().ttl_seconds(), None);
        assert_eq!(params("0").ttl_seconds(), None);
        assert_eq!(params("abc").ttl_seconds(), None);
        assert_eq!(params("-3").ttl_seconds(), None);
        assert_eq!(params("").ttl_seconds(), None);
    }

    #[test]
    fn test_eviction_request_valid_policy() {
        let req = EvictionConfigRequest::from_body(br#"{"policy":"FIFO"}"#).unwrap();
        assert_eq!(req.validate().unwrap(), EvictionPolicy::Fifo);
    }

    #[test]
    fn test_eviction_request_not_json() {
        let result = EvictionConfigRequest::from_body(b"notjson");
        assert!(matches!(result, Err(CacheError::InvalidRequest(msg)) if msg == "invalid json"));
    }

    #[test]
    fn test_eviction_request_invalid_policy() {
        for body in [
            r#"{"policy":"INVALID"}"#,
            r#"{"policy":5}"#,
            r#"{"other":"LRU"}"#,
            r#"{"policy":"lru"}"#,
            r#"["LRU"]"#,
            r#""LRU""#,
            "null",
        ] {
            let req = EvictionConfigRequest::from_body(body.as_bytes()).unwrap();
            assert!(
                matches!(req.validate(), Err(CacheError::InvalidRequest(msg)) if msg == "invalid policy"),
                "body {} should be rejected",
                body
            );
        }
    }
}
