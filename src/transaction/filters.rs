//! Pure filtering over the transaction collection.
//!
//! Every function here takes a snapshot and returns a new vector; the
//! underlying collection is never touched. The history and dashboard pages
//! recompute these on every request.

use time::{Date, Duration};

use crate::transaction::{Transaction, TransactionType};

/// Transactions whose date falls within the last `window_days` days.
///
/// The window is inclusive on both ends: `[today - window_days, today]`.
/// Results are sorted newest-first by creation timestamp, falling back to
/// the transaction date and finally to the ID for a stable order.
/// Transactions whose date does not parse are left out.
pub(crate) fn recent(
    transactions: &[Transaction],
    window_days: i64,
    today: Date,
) -> Vec<Transaction> {
    let window_start = today - Duration::days(window_days);

    let mut matches: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction
                .occurred_on()
                .map(|date| date >= window_start && date <= today)
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    matches.sort_by(|a, b| {
        b.recorded_at()
            .cmp(&a.recorded_at())
            .then_with(|| b.occurred_on().cmp(&a.occurred_on()))
            .then_with(|| b.id.cmp(&a.id))
    });

    matches
}

/// Transactions matching a free-text search.
///
/// The query matches case-insensitively against the description, or as a
/// plain substring of the amount's decimal form, so searching "50" finds
/// both an amount of 150 and "lunch 50% off". An empty query matches
/// everything.
pub(crate) fn search(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|transaction| {
            transaction.description.to_lowercase().contains(&query)
                || transaction.amount.to_string().contains(&query)
        })
        .cloned()
        .collect()
}

/// Transactions matching the selected type and category exactly.
///
/// `None` (or an empty category string) leaves that dimension unfiltered.
pub(crate) fn by_type_and_category(
    transactions: &[Transaction],
    transaction_type: Option<TransactionType>,
    category: Option<&str>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction_type
                .map(|wanted| transaction.transaction_type == wanted)
                .unwrap_or(true)
        })
        .filter(|transaction| match category {
            Some(wanted) if !wanted.is_empty() => transaction.category == wanted,
            _ => true,
        })
        .cloned()
        .collect()
}
