mod error;
pub mod keys;
pub mod query;
mod repository;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use keys::EntityKind;
pub use query::{CountQuery, PointGet, PrefixQuery, RECENT_WINDOW_DAYS};
pub use repository::{KeyedRepository, DEFAULT_INVOICE_LIMIT, DEFAULT_TRANSACTION_LIMIT};
pub use traits::{CompanyRepository, InvoiceRepository, ItemStore, TransactionRepository};
pub use types::{Item, PARTITION_KEY_ATTRIBUTE, SORT_KEY_ATTRIBUTE};
