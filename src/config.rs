//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_ITEMS};

/// Token accepted by the admin endpoints when `ADMIN_TOKEN` is unset
pub const DEFAULT_ADMIN_TOKEN: &str = "dev-admin-token";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_items: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Bearer token for admin endpoints
    pub admin_token: String,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Maximum accepted request body size in bytes
    pub max_body_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Maximum cache entries (default: 1000)
    /// - `PORT` - HTTP server port (default: 4000)
    /// - `ADMIN_TOKEN` - Admin bearer token (default: "dev-admin-token")
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `MAX_BODY_SIZE` - Request body limit in bytes (default: 20 MB)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_items: parse_var("MAX_ITEMS").unwrap_or(defaults.max_items),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            admin_token: env::var("ADMIN_TOKEN")
                .ok()
                .filter(|token| !token.is_empty())
                .unwrap_or(defaults.admin_token),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            max_body_size: parse_var("MAX_BODY_SIZE").unwrap_or(defaults.max_body_size),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            server_port: 4000,
            admin_token: DEFAULT_ADMIN_TOKEN.to_string(),
            cleanup_interval: 1,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
