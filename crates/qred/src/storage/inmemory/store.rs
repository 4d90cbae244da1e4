//! In-memory item store implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use qred_core::storage::{
    CountQuery, Item, ItemStore, PrefixQuery, RepositoryError, Result, PARTITION_KEY_ATTRIBUTE,
    SORT_KEY_ATTRIBUTE,
};

/// Sort keys of one partition, in byte order like DynamoDB range keys.
type Partition = BTreeMap<String, Item>;

/// In-memory item store.
///
/// Uses a map of ordered partitions wrapped in `Arc<RwLock<_>>`. Prefix,
/// ordering, limit and threshold semantics match the DynamoDB queries.
/// Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    partitions: Arc<RwLock<HashMap<String, Partition>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given items.
    pub async fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let store = Self::new();
        for item in items {
            store.put_item(item).await?;
        }
        Ok(store)
    }

    /// Stores an item under the `PK`/`SK` attributes it carries, replacing
    /// any item with the same key.
    pub async fn put_item(&self, item: Item) -> Result<()> {
        let pk = key_attribute(&item, PARTITION_KEY_ATTRIBUTE)?;
        let sk = key_attribute(&item, SORT_KEY_ATTRIBUTE)?;

        let mut partitions = self.partitions.write().await;
        partitions.entry(pk).or_default().insert(sk, item);
        Ok(())
    }

    /// Number of stored items across all partitions.
    pub async fn item_count(&self) -> usize {
        let partitions = self.partitions.read().await;
        partitions.values().map(BTreeMap::len).sum()
    }
}

fn key_attribute(item: &Item, name: &str) -> Result<String> {
    item.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid key: {}", name)))
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn get_item(&self, pk: &str, sk: &str) -> Result<Option<Item>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(pk)
            .and_then(|partition| partition.get(sk))
            .cloned())
    }

    async fn query_by_prefix(&self, pk: &str, sk_prefix: &str, limit: usize) -> Result<Vec<Item>> {
        let query = PrefixQuery::new(pk, sk_prefix, limit);
        let partitions = self.partitions.read().await;

        let Some(partition) = partitions.get(&query.pk) else {
            return Ok(Vec::new());
        };

        Ok(partition
            .iter()
            .rev()
            .filter(|(sk, _)| query.matches(sk))
            .take(query.limit)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn count_after(&self, pk: &str, sk_prefix: &str) -> Result<u64> {
        let query = CountQuery::recent(pk, sk_prefix, Utc::now());
        let partitions = self.partitions.read().await;

        Ok(partitions
            .get(&query.pk)
            .map(|partition| partition.keys().filter(|sk| query.matches(sk)).count() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use qred_core::storage::keys;
    use serde_json::json;

    const PK: &str = "COMPANY#019bffec-3afb-7b63-8461-a89366547b11";

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    fn transaction(at: DateTime<Utc>, suffix: &str) -> Item {
        let sk = format!("TX#{}#{}", keys::iso_timestamp(at), suffix);
        item(json!({ "PK": PK, "SK": sk, "amount": 100 }))
    }

    fn invoice(due: &str, suffix: &str) -> Item {
        let sk = format!("INVOICE#{}#{}", due, suffix);
        item(json!({ "PK": PK, "SK": sk, "dueDate": due, "isPaid": false }))
    }

    async fn seeded_store() -> InMemoryStore {
        let now = Utc::now();
        let mut items = vec![
            item(json!({ "PK": PK, "SK": "METADATA", "companyName": "Test Corp" })),
            invoice("2025-11-10", "a"),
            invoice("2025-12-10", "b"),
        ];
        items.extend((1..=4).map(|i| transaction(now - Duration::days(i), &format!("r{i}"))));
        items.extend((1..=2).map(|i| transaction(now - Duration::days(40 + i), &format!("o{i}"))));

        InMemoryStore::with_items(items).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_item() {
        let store = seeded_store().await;

        let company = store.get_item(PK, "METADATA").await.unwrap().unwrap();
        assert_eq!(company["companyName"], "Test Corp");

        assert!(store.get_item(PK, "MISSING").await.unwrap().is_none());
        assert!(store.get_item("COMPANY#other", "METADATA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_by_prefix_is_newest_first_and_limited() {
        let store = seeded_store().await;

        let transactions = store.query_by_prefix(PK, "TX#", 3).await.unwrap();

        let sks: Vec<&str> = transactions
            .iter()
            .map(|t| t["SK"].as_str().unwrap())
            .collect();
        assert_eq!(sks.len(), 3);
        assert!(sks.windows(2).all(|pair| pair[0] > pair[1]));
        assert!(sks[0].ends_with("#r1"));
    }

    #[tokio::test]
    async fn test_query_by_prefix_only_matches_prefix() {
        let store = seeded_store().await;

        let invoices = store.query_by_prefix(PK, "INVOICE#", 5).await.unwrap();

        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0]["dueDate"], "2025-12-10");
        assert_eq!(invoices[1]["dueDate"], "2025-11-10");
    }

    #[tokio::test]
    async fn test_query_by_prefix_empty() {
        let store = seeded_store().await;

        assert!(store.query_by_prefix(PK, "TX#", 0).await.unwrap().is_empty());
        assert!(store
            .query_by_prefix("COMPANY#other", "TX#", 3)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_count_after_counts_last_thirty_days() {
        let store = seeded_store().await;

        assert_eq!(store.count_after(PK, "TX#").await.unwrap(), 4);
        assert_eq!(store.count_after("COMPANY#other", "TX#").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_item_requires_keys() {
        let store = InMemoryStore::new();

        let result = store.put_item(item(json!({ "PK": PK }))).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(store.item_count().await, 0);
    }

    #[tokio::test]
    async fn test_put_item_replaces_same_key() {
        let store = InMemoryStore::new();
        store
            .put_item(item(json!({ "PK": PK, "SK": "METADATA", "companyName": "Old" })))
            .await
            .unwrap();
        store
            .put_item(item(json!({ "PK": PK, "SK": "METADATA", "companyName": "New" })))
            .await
            .unwrap();

        assert_eq!(store.item_count().await, 1);
        let company = store.get_item(PK, "METADATA").await.unwrap().unwrap();
        assert_eq!(company["companyName"], "New");
    }
}
