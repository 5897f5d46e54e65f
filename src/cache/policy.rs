//! Eviction Policy Module
//!
//! Names of the eviction policies the admin API accepts.
//!
//! The store only ever evicts least-recently-used entries. `LFU` and `FIFO`
//! are recognised so requests naming them validate, but selecting them has
//! no effect on eviction.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// == Eviction Policy ==
/// An eviction policy name as accepted by `POST /v1/admin/config/eviction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least recently used
    Lru,
    /// Least frequently used (accepted, not implemented)
    Lfu,
    /// First in, first out (accepted, not implemented)
    Fifo,
}

impl EvictionPolicy {
    /// Returns the wire name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
            EvictionPolicy::Fifo => "FIFO",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a policy name is not one of `LRU`, `LFU` or `FIFO`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown eviction policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for EvictionPolicy {
    type Err = UnknownPolicy;

    /// Parses a policy name. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(EvictionPolicy::Lru),
            "LFU" => Ok(EvictionPolicy::Lfu),
            "FIFO" => Ok(EvictionPolicy::Fifo),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
