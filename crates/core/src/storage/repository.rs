//! Repositories backed by an [`ItemStore`].
//!
//! The repositories hold no logic of their own: they translate a company id
//! into keys and forward to the store.

use std::sync::Arc;

use async_trait::async_trait;

use super::keys::{self, EntityKind};
use super::{
    CompanyRepository, InvoiceRepository, Item, ItemStore, Result, TransactionRepository,
};

/// Number of transactions shown on the dashboard.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 3;

/// Number of invoices inspected for the overdue flag.
pub const DEFAULT_INVOICE_LIMIT: usize = 5;

/// Implements every repository trait on top of a shared [`ItemStore`].
#[derive(Clone)]
pub struct KeyedRepository {
    store: Arc<dyn ItemStore>,
}

impl KeyedRepository {
    /// Creates a repository over the given store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    async fn latest(&self, company_id: &str, kind: EntityKind, limit: usize) -> Result<Vec<Item>> {
        let pk = keys::company_pk(company_id);
        self.store
            .query_by_prefix(&pk, kind.sort_key_prefix(), limit)
            .await
    }
}

#[async_trait]
impl CompanyRepository for KeyedRepository {
    async fn get_company_metadata(&self, company_id: &str) -> Result<Option<Item>> {
        let pk = keys::company_pk(company_id);
        self.store.get_item(&pk, keys::metadata_sk()).await
    }
}

#[async_trait]
impl TransactionRepository for KeyedRepository {
    async fn get_latest_transactions(&self, company_id: &str, limit: usize) -> Result<Vec<Item>> {
        self.latest(company_id, EntityKind::Transaction, limit).await
    }

    async fn get_recent_transactions_count(&self, company_id: &str) -> Result<u64> {
        let pk = keys::company_pk(company_id);
        self.store
            .count_after(&pk, EntityKind::Transaction.sort_key_prefix())
            .await
    }
}

#[async_trait]
impl InvoiceRepository for KeyedRepository {
    async fn get_latest_invoices(&self, company_id: &str, limit: usize) -> Result<Vec<Item>> {
        self.latest(company_id, EntityKind::Invoice, limit).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::storage::RepositoryError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Get(String, String),
        Query(String, String, usize),
        Count(String, String),
    }

    /// Store double that records every call and answers with fixed data.
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<Call>>,
        fail: Option<RepositoryError>,
    }

    impl RecordingStore {
        fn failing(error: RepositoryError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: Some(error),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            match &self.fail {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ItemStore for RecordingStore {
        async fn get_item(&self, pk: &str, sk: &str) -> Result<Option<Item>> {
            self.record(Call::Get(pk.to_string(), sk.to_string()))?;
            let item = json!({ "companyName": "Test Corp" });
            Ok(item.as_object().cloned())
        }

        async fn query_by_prefix(
            &self,
            pk: &str,
            sk_prefix: &str,
            limit: usize,
        ) -> Result<Vec<Item>> {
            self.record(Call::Query(pk.to_string(), sk_prefix.to_string(), limit))?;
            Ok(Vec::new())
        }

        async fn count_after(&self, pk: &str, sk_prefix: &str) -> Result<u64> {
            self.record(Call::Count(pk.to_string(), sk_prefix.to_string()))?;
            Ok(57)
        }
    }

    fn repository(store: &Arc<RecordingStore>) -> KeyedRepository {
        KeyedRepository::new(store.clone())
    }

    #[tokio::test]
    async fn test_company_metadata_uses_metadata_key() {
        let store = Arc::new(RecordingStore::default());

        let company = repository(&store)
            .get_company_metadata("uuid-123")
            .await
            .unwrap();

        assert_eq!(company.unwrap()["companyName"], "Test Corp");
        assert_eq!(
            store.calls(),
            vec![Call::Get("COMPANY#uuid-123".into(), "METADATA".into())]
        );
    }

    #[tokio::test]
    async fn test_latest_transactions_queries_transaction_prefix() {
        let store = Arc::new(RecordingStore::default());

        repository(&store)
            .get_latest_transactions("uuid-123", DEFAULT_TRANSACTION_LIMIT)
            .await
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::Query("COMPANY#uuid-123".into(), "TX#".into(), 3)]
        );
    }

    #[tokio::test]
    async fn test_recent_transactions_count_returns_store_count() {
        let store = Arc::new(RecordingStore::default());

        let count = repository(&store)
            .get_recent_transactions_count("test-company-id")
            .await
            .unwrap();

        assert_eq!(count, 57);
        assert_eq!(
            store.calls(),
            vec![Call::Count("COMPANY#test-company-id".into(), "TX#".into())]
        );
    }

    #[tokio::test]
    async fn test_latest_invoices_queries_invoice_prefix() {
        let store = Arc::new(RecordingStore::default());

        repository(&store)
            .get_latest_invoices("uuid-123", DEFAULT_INVOICE_LIMIT)
            .await
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::Query("COMPANY#uuid-123".into(), "INVOICE#".into(), 5)]
        );
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let error = RepositoryError::Throttled("Throughput exceeded".to_string());
        let store = Arc::new(RecordingStore::failing(error.clone()));
        let repo = repository(&store);

        assert_eq!(repo.get_company_metadata("c").await.unwrap_err(), error);
        assert_eq!(
            repo.get_recent_transactions_count("c").await.unwrap_err(),
            error
        );
        assert_eq!(repo.get_latest_invoices("c", 5).await.unwrap_err(), error);
    }
}
