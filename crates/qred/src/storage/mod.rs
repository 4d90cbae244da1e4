//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ItemStore` trait
//! defined in `qred_core::storage`. The backend is selected at startup from
//! the `STORAGE_BACKEND` environment variable.
//!
//! - `dynamodb` (default): AWS DynamoDB using `aws-sdk-dynamodb`, compiled
//!   in by the `dynamodb` feature
//! - `memory`: in-process ordered maps, optionally seeded from a JSON file
//!
//! Build without the DynamoDB client:
//! ```bash
//! cargo build -p qred --no-default-features
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;
