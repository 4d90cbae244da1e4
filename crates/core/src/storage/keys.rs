//! Key generation for the single-table layout.
//!
//! Pure functions for generating partition keys, sort keys and sort-key
//! prefixes. All entities of a company share the partition key
//! `COMPANY#<company_id>`; the sort key tells them apart.

use chrono::{DateTime, SecondsFormat, Utc};

// ============================================================================
// Key prefixes
// ============================================================================

pub const COMPANY_PREFIX: &str = "COMPANY#";
pub const METADATA_SK: &str = "METADATA";
pub const TRANSACTION_PREFIX: &str = "TX#";
pub const INVOICE_PREFIX: &str = "INVOICE#";

/// Separator between the segments of a composite key.
pub const KEY_SEPARATOR: char = '#';

// ============================================================================
// Entity kinds
// ============================================================================

/// The kinds of entity stored under a company partition.
///
/// The store only sees flat strings; this enum is the typed view of the
/// sort-key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    CompanyMetadata,
    Transaction,
    Invoice,
}

impl EntityKind {
    /// The sort key (metadata) or sort-key prefix (transactions, invoices).
    pub fn sort_key_prefix(self) -> &'static str {
        match self {
            EntityKind::CompanyMetadata => METADATA_SK,
            EntityKind::Transaction => TRANSACTION_PREFIX,
            EntityKind::Invoice => INVOICE_PREFIX,
        }
    }

    /// Classify a sort key by its prefix.
    ///
    /// Returns `None` for sort keys that belong to no known entity.
    pub fn from_sort_key(sk: &str) -> Option<Self> {
        if sk == METADATA_SK {
            Some(EntityKind::CompanyMetadata)
        } else if sk.starts_with(TRANSACTION_PREFIX) {
            Some(EntityKind::Transaction)
        } else if sk.starts_with(INVOICE_PREFIX) {
            Some(EntityKind::Invoice)
        } else {
            None
        }
    }
}

// ============================================================================
// Company keys
// ============================================================================

/// Generate the partition key for every item of a company.
///
/// Pattern: `COMPANY#<company_id>`
///
/// The id is embedded verbatim; no format is enforced.
pub fn company_pk(company_id: &str) -> String {
    format!("{COMPANY_PREFIX}{company_id}")
}

/// Sort key of the company metadata singleton.
pub fn metadata_sk() -> &'static str {
    METADATA_SK
}

// ============================================================================
// Transaction and invoice keys
// ============================================================================

/// Generate a transaction sort-key prefix.
///
/// Pattern: `TX#<date_suffix>`
///
/// An empty suffix yields the prefix shared by all transactions.
pub fn transaction_prefix(date_suffix: &str) -> String {
    format!("{TRANSACTION_PREFIX}{date_suffix}")
}

/// Generate an invoice sort-key prefix.
///
/// Pattern: `INVOICE#<date_suffix>`
pub fn invoice_prefix(date_suffix: &str) -> String {
    format!("{INVOICE_PREFIX}{date_suffix}")
}

/// Extract the readable segment of a sort key: the part after the first `#`.
///
/// For `TX#2026-01-27T16:00:00Z#0193a100` this is the timestamp.
/// Returns `None` for keys without a separator such as `METADATA`.
pub fn sort_key_segment(sk: &str) -> Option<&str> {
    sk.split(KEY_SEPARATOR).nth(1)
}

/// Format a timestamp the way sort keys embed it.
///
/// UTC, millisecond precision and a `Z` suffix, so that timestamps compare
/// lexicographically in chronological order.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
