//! Dashboard aggregation rules.
//!
//! The server fetches the raw items; this module turns them into the response
//! shown to the client.

mod summary;
mod types;

pub use summary::{
    additional_items_count, assemble_dashboard, has_overdue_invoice, is_overdue, is_paid,
    parse_due_date,
};
pub use types::{Dashboard, DashboardOutcome, InvoiceSummary, TransactionsSummary};
