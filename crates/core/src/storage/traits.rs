use async_trait::async_trait;

use super::{Item, Result};

/// Read access to the partitioned item store.
///
/// Implementations propagate store failures as [`RepositoryError`]s and never
/// retry.
///
/// [`RepositoryError`]: super::RepositoryError
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Gets a single item by its exact key. Absent items are `Ok(None)`.
    async fn get_item(&self, pk: &str, sk: &str) -> Result<Option<Item>>;

    /// Gets up to `limit` items whose sort key begins with `sk_prefix`,
    /// newest first.
    async fn query_by_prefix(&self, pk: &str, sk_prefix: &str, limit: usize)
        -> Result<Vec<Item>>;

    /// Counts items whose sort key is newer than `sk_prefix` followed by the
    /// timestamp 30 days before now.
    async fn count_after(&self, pk: &str, sk_prefix: &str) -> Result<u64>;
}

/// Repository for company metadata.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Gets the metadata item of a company, if it exists.
    async fn get_company_metadata(&self, company_id: &str) -> Result<Option<Item>>;
}

/// Repository for company transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Gets the most recent transactions, newest first.
    async fn get_latest_transactions(&self, company_id: &str, limit: usize) -> Result<Vec<Item>>;

    /// Counts the transactions of the last 30 days.
    async fn get_recent_transactions_count(&self, company_id: &str) -> Result<u64>;
}

/// Repository for company invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Gets the most recent invoices, newest first.
    async fn get_latest_invoices(&self, company_id: &str, limit: usize) -> Result<Vec<Item>>;
}
