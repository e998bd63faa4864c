//! Balance aggregation over the transaction collection.

use crate::transaction::{Transaction, TransactionType};

/// Sum of all income amounts.
///
/// Amounts that are not finite numbers contribute nothing to the sum, so a
/// damaged record never poisons the balance card.
pub(crate) fn total_income(transactions: &[Transaction]) -> f64 {
    sum_amounts(transactions, TransactionType::Income)
}

/// Sum of all expense amounts.
pub(crate) fn total_expense(transactions: &[Transaction]) -> f64 {
    sum_amounts(transactions, TransactionType::Expense)
}

/// Income minus expenses.
pub(crate) fn remaining_balance(transactions: &[Transaction]) -> f64 {
    total_income(transactions) - total_expense(transactions)
}

fn sum_amounts(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .filter(|transaction| transaction.amount.is_finite())
        .map(|transaction| transaction.amount)
        .sum()
}
