use serde::{Deserialize, Serialize};

use crate::storage::Item;

/// The aggregated dashboard of one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Company metadata item, passed through as stored.
    pub company: Item,
    pub recent_transactions: TransactionsSummary,
    pub invoice_summary: InvoiceSummary,
}

/// The latest transactions plus how many more happened in the last 30 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsSummary {
    pub items: Vec<Item>,
    /// Number of transactions in the last 30 days.
    pub total_count: u64,
    /// Transactions in the window that are not part of `items`. Never negative.
    pub additional_items_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub has_overdue_invoice: bool,
}

/// Result of assembling a dashboard from the fetched items.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardOutcome {
    Found(Dashboard),
    /// The company has no metadata item.
    NotFound,
}
