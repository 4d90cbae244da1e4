//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds repository trait objects so handlers never see
//! which store backs them.

use std::{path::Path, sync::Arc};

use anyhow::Context;

use qred_core::storage::{
    CompanyRepository, InvoiceRepository, Item, ItemStore, KeyedRepository, TransactionRepository,
};

use crate::config::{Config, StorageBackend};
#[cfg(feature = "dynamodb")]
use crate::storage::DynamoDbStore;
use crate::storage::InMemoryStore;

/// Shared application state.
///
/// This is cloned for each request handler. The store behind the repositories
/// is created once per process and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub company_repo: Arc<dyn CompanyRepository>,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub invoice_repo: Arc<dyn InvoiceRepository>,
}

impl AppState {
    /// Creates AppState from the configured storage backend.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn ItemStore> = match config.storage {
            #[cfg(feature = "dynamodb")]
            StorageBackend::DynamoDb => {
                tracing::info!(
                    table = %config.table_name,
                    region = %config.region,
                    endpoint = ?config.dynamodb_endpoint,
                    "Using DynamoDB storage"
                );
                Arc::new(DynamoDbStore::from_config(config).await)
            }
            StorageBackend::Memory => {
                let store = match &config.seed_file {
                    Some(path) => load_seed_file(path).await?,
                    None => InMemoryStore::new(),
                };
                tracing::info!(items = store.item_count().await, "Using in-memory storage");
                Arc::new(store)
            }
        };

        Ok(Self::from_store(store))
    }

    /// Creates AppState whose repositories all read from `store`.
    pub fn from_store(store: Arc<dyn ItemStore>) -> Self {
        let repo = Arc::new(KeyedRepository::new(store));
        Self::with_repositories(repo.clone(), repo.clone(), repo)
    }

    /// Creates AppState from individual repositories.
    pub fn with_repositories(
        company_repo: Arc<dyn CompanyRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        invoice_repo: Arc<dyn InvoiceRepository>,
    ) -> Self {
        Self {
            company_repo,
            transaction_repo,
            invoice_repo,
        }
    }
}

/// Load a JSON array of items into a fresh in-memory store.
async fn load_seed_file(path: &Path) -> Result<InMemoryStore, anyhow::Error> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_str(&raw)
        .with_context(|| format!("Seed file {} is not a JSON array of items", path.display()))?;

    Ok(InMemoryStore::with_items(items).await?)
}
