use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::storage::Item;

use super::{Dashboard, DashboardOutcome, InvoiceSummary, TransactionsSummary};

const IS_PAID_ATTRIBUTE: &str = "isPaid";
const DUE_DATE_ATTRIBUTE: &str = "dueDate";

/// Number of transactions in the window beyond the ones returned.
///
/// Clamped at zero when more items came back than were counted.
pub fn additional_items_count(total_count: u64, returned: usize) -> u64 {
    total_count.saturating_sub(returned as u64)
}

/// Naive timestamp layouts read as UTC. `%.f` also matches no fraction.
const NAIVE_DUE_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an invoice due date.
///
/// Accepts RFC 3339 timestamps, naive timestamps with a `T` or space
/// separator and optional seconds (read as UTC), and plain `YYYY-MM-DD`
/// dates (UTC midnight).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Some(at) = NAIVE_DUE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Whether an `isPaid` attribute marks the invoice as paid.
///
/// Missing and null values count as unpaid.
pub fn is_paid(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(paid)) => *paid,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// An invoice is overdue when it is unpaid and its due date is strictly
/// before `now`. Invoices without a readable due date are never overdue.
pub fn is_overdue(invoice: &Item, now: DateTime<Utc>) -> bool {
    if is_paid(invoice.get(IS_PAID_ATTRIBUTE)) {
        return false;
    }

    invoice
        .get(DUE_DATE_ATTRIBUTE)
        .and_then(Value::as_str)
        .and_then(parse_due_date)
        .is_some_and(|due| due < now)
}

pub fn has_overdue_invoice(invoices: &[Item], now: DateTime<Utc>) -> bool {
    invoices.iter().any(|invoice| is_overdue(invoice, now))
}

/// Assemble the dashboard from the results of the four reads.
///
/// A missing company yields [`DashboardOutcome::NotFound`] whatever the other
/// reads returned.
pub fn assemble_dashboard(
    company: Option<Item>,
    transactions: Vec<Item>,
    total_count: u64,
    invoices: &[Item],
    now: DateTime<Utc>,
) -> DashboardOutcome {
    let Some(company) = company else {
        return DashboardOutcome::NotFound;
    };

    let additional_items_count = additional_items_count(total_count, transactions.len());

    DashboardOutcome::Found(Dashboard {
        company,
        recent_transactions: TransactionsSummary {
            items: transactions,
            total_count,
            additional_items_count,
        },
        invoice_summary: InvoiceSummary {
            has_overdue_invoice: has_overdue_invoice(invoices, now),
        },
    })
}
