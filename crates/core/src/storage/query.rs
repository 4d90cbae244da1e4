//! Query shapes issued against the item store.
//!
//! Store adapters translate these values into backend requests. Keeping them
//! pure makes the key conditions, and in particular the rolling 30-day
//! threshold, testable without a store.

use chrono::{DateTime, Duration, Utc};

use super::keys;

/// Width of the rolling window used by [`CountQuery::recent`].
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Point lookup by exact key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointGet {
    pub pk: String,
    pub sk: String,
}

impl PointGet {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }
}

/// Newest-first range query over sort keys sharing a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixQuery {
    pub pk: String,
    pub sk_prefix: String,
    /// Upper bound on the number of items returned. Says nothing about
    /// whether more items exist.
    pub limit: usize,
}

impl PrefixQuery {
    pub const KEY_CONDITION: &'static str = "PK = :pk AND begins_with(SK, :skPrefix)";

    pub fn new(pk: impl Into<String>, sk_prefix: impl Into<String>, limit: usize) -> Self {
        Self {
            pk: pk.into(),
            sk_prefix: sk_prefix.into(),
            limit,
        }
    }

    /// Whether a sort key falls inside this query's range.
    pub fn matches(&self, sk: &str) -> bool {
        sk.starts_with(&self.sk_prefix)
    }
}

/// Count of items whose sort key is strictly greater than a threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    pub pk: String,
    pub threshold: String,
}

impl CountQuery {
    pub const KEY_CONDITION: &'static str = "PK = :pk AND SK > :dateLimit";

    /// Count items newer than [`RECENT_WINDOW_DAYS`] days before `now`.
    ///
    /// The threshold is `sk_prefix + ISO-8601(now - 30 days)`. Comparing sort
    /// keys against it only separates recent from old items because the prefix
    /// and timestamp format sort lexicographically in time order.
    pub fn recent(pk: impl Into<String>, sk_prefix: &str, now: DateTime<Utc>) -> Self {
        let since = now - Duration::days(RECENT_WINDOW_DAYS);
        Self {
            pk: pk.into(),
            threshold: format!("{sk_prefix}{}", keys::iso_timestamp(since)),
        }
    }

    /// Whether a sort key is counted by this query.
    pub fn matches(&self, sk: &str) -> bool {
        sk > self.threshold.as_str()
    }
}
