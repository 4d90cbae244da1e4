//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the `ItemStore` trait
//! that keeps every partition in an ordered map. It backs the test suite and
//! local runs without DynamoDB (`STORAGE_BACKEND=memory`).
//!
//! # Example
//!
//! ```rust,ignore
//! use qred::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.put_item(item).await?;
//! ```

mod store;

pub use store::InMemoryStore;
