//! Card components for the dashboard: the balance summary and recent activity.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, format_currency},
    transaction::{Transaction, remaining_balance, total_expense, total_income, transaction_card},
};

/// The three headline figures shown on the balance card.
#[derive(Debug, PartialEq)]
pub(super) struct BalanceSummary {
    pub(super) total_income: f64,
    pub(super) total_expense: f64,
    pub(super) remaining_balance: f64,
}

impl BalanceSummary {
    /// Compute the summary from a snapshot of the collection.
    pub(super) fn from_transactions(transactions: &[Transaction]) -> Self {
        Self {
            total_income: total_income(transactions),
            total_expense: total_expense(transactions),
            remaining_balance: remaining_balance(transactions),
        }
    }
}

/// Renders the balance card with income, expense and remaining balance.
pub(super) fn balance_card(summary: &BalanceSummary) -> Markup {
    html! {
        section
            class="w-full rounded-xl border border-gray-200 bg-white p-6 shadow-md
            dark:border-gray-700 dark:bg-gray-800"
            aria-label=(format!(
                "Balance: {} income, {} expenses, {} remaining",
                format_currency(summary.total_income),
                format_currency(summary.total_expense),
                format_currency(summary.remaining_balance),
            ))
        {
            div class="grid grid-cols-1 gap-4 sm:grid-cols-3"
            {
                (stat("Total Income", summary.total_income, "text-green-700 dark:text-green-300"))
                (stat("Total Expense", summary.total_expense, "text-red-700 dark:text-red-300"))
                (stat(
                    "Remaining Balance",
                    summary.remaining_balance,
                    "text-gray-900 dark:text-white",
                ))
            }
        }
    }
}

fn stat(label: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            p class=(format!("text-2xl font-bold {amount_style}")) { (format_currency(amount)) }
        }
    }
}

/// Renders the recent-transactions section of the dashboard.
pub(super) fn recent_transactions_view(recent: &[Transaction], window_days: i64) -> Markup {
    html! {
        section class="w-full"
        {
            div class="mb-2 flex items-baseline justify-between border-b border-gray-300 pb-2 dark:border-gray-600"
            {
                h2 class="text-lg font-semibold" { "Recent Transactions" }
                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Last " (window_days) " days"
                }
            }

            @if recent.is_empty() {
                p class="py-6 text-center text-gray-600 dark:text-gray-400"
                {
                    "Nothing in the last " (window_days) " days. "
                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add a transaction"
                    }
                }
            } @else {
                ul class="space-y-2"
                {
                    @for transaction in recent {
                        (transaction_card(transaction, None))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod cards_tests {
    use super::{BalanceSummary, balance_card, recent_transactions_view};
    use crate::transaction::{Transaction, TransactionType};

    fn row(transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: "1".to_owned(),
            transaction_type,
            category: "food".to_owned(),
            amount,
            description: String::new(),
            date: "2024-01-05".to_owned(),
            created_at: "2024-01-05T10:30:00Z".to_owned(),
        }
    }

    #[test]
    fn summary_matches_the_scenario_from_the_mobile_app() {
        let transactions = vec![
            row(TransactionType::Expense, 100.0),
            row(TransactionType::Income, 500.0),
        ];

        let summary = BalanceSummary::from_transactions(&transactions);

        assert_eq!(summary.total_expense, 100.0);
        assert_eq!(summary.total_income, 500.0);
        assert_eq!(summary.remaining_balance, 400.0);
    }

    #[test]
    fn balance_card_shows_all_three_figures() {
        let html = balance_card(&BalanceSummary {
            total_income: 500.0,
            total_expense: 100.0,
            remaining_balance: 400.0,
        })
        .into_string();

        assert!(html.contains("₹500.00"));
        assert!(html.contains("₹100.00"));
        assert!(html.contains("₹400.00"));
        assert!(html.contains("Remaining Balance"));
    }

    #[test]
    fn recent_view_shows_empty_state() {
        let html = recent_transactions_view(&[], 7).into_string();

        assert!(html.contains("Nothing in the last 7 days."));
        assert!(html.contains("Add a transaction"));
    }

    #[test]
    fn recent_view_lists_transactions() {
        let transactions = vec![row(TransactionType::Expense, 100.0)];

        let html = recent_transactions_view(&transactions, 7).into_string();

        assert!(html.contains("-₹100.00"));
        assert!(!html.contains("Nothing in the last"));
    }
}
