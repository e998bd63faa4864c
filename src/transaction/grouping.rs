//! Grouping logic for the month-by-month history view.

use time::{Date, Month};

use crate::transaction::Transaction;

/// All transactions that fall within one calendar month of one year.
#[derive(Debug, PartialEq)]
pub(crate) struct MonthGroup {
    /// The calendar year of the group.
    pub(crate) year: i32,
    /// The calendar month of the group.
    pub(crate) month: Month,
    /// The group's transactions, newest first.
    pub(crate) transactions: Vec<Transaction>,
}

impl MonthGroup {
    /// The section heading, e.g. "January 2024".
    pub(crate) fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Bucket transactions by the calendar month of their date, newest month first.
///
/// The same month in different years forms distinct groups. Within a group,
/// transactions are ordered newest first by date, then by creation
/// timestamp. A transaction whose date does not parse is logged and dropped
/// from the grouping; the underlying collection is not modified.
pub(crate) fn group_by_month(transactions: &[Transaction]) -> Vec<MonthGroup> {
    let mut dated: Vec<(&Transaction, Date)> = transactions
        .iter()
        .filter_map(|transaction| match transaction.occurred_on() {
            Some(date) => Some((transaction, date)),
            None => {
                tracing::warn!(
                    "Invalid date \"{}\" for transaction {}, leaving it out of the month grouping",
                    transaction.date,
                    transaction.id
                );
                None
            }
        })
        .collect();

    dated.sort_by(|(a, a_date), (b, b_date)| {
        b_date
            .cmp(a_date)
            .then_with(|| b.recorded_at().cmp(&a.recorded_at()))
    });

    let mut groups: Vec<MonthGroup> = Vec::new();

    for (transaction, date) in dated {
        let group = match groups.last_mut() {
            Some(current) if current.year == date.year() && current.month == date.month() => {
                current
            }
            _ => {
                groups.push(MonthGroup {
                    year: date.year(),
                    month: date.month(),
                    transactions: Vec::new(),
                });
                groups.last_mut().expect("group just added")
            }
        };

        group.transactions.push(transaction.clone());
    }

    // The input sort is by exact date, which already puts whole months in
    // descending calendar order, so the groups come out sorted.
    groups
}

#[cfg(test)]
mod grouping_tests {
    use time::Month;

    use super::group_by_month;
    use crate::transaction::{Transaction, TransactionType};

    fn row(id: &str, date: &str, created_at: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            transaction_type: TransactionType::Expense,
            category: "food".to_owned(),
            amount: 100.0,
            description: String::new(),
            date: date.to_owned(),
            created_at: created_at.to_owned(),
        }
    }

    #[test]
    fn buckets_by_month_newest_first() {
        let transactions = vec![
            row("1", "2024-01-05", "2024-01-05T08:00:00Z"),
            row("2", "2024-03-10", "2024-03-10T08:00:00Z"),
            row("3", "2024-01-20", "2024-01-20T08:00:00Z"),
        ];

        let groups = group_by_month(&transactions);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title(), "March 2024");
        assert_eq!(groups[1].title(), "January 2024");
        assert_eq!(groups[1].transactions.len(), 2);
    }

    #[test]
    fn same_month_different_years_are_distinct_groups() {
        let transactions = vec![
            row("1", "2024-01-05", "2024-01-05T08:00:00Z"),
            row("2", "2025-01-05", "2025-01-05T08:00:00Z"),
        ];

        let groups = group_by_month(&transactions);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title(), "January 2025");
        assert_eq!(groups[1].title(), "January 2024");
    }

    #[test]
    fn groups_are_a_partition_of_the_valid_input() {
        let transactions = vec![
            row("1", "2024-01-05", "2024-01-05T08:00:00Z"),
            row("2", "2024-02-05", "2024-02-05T08:00:00Z"),
            row("3", "2024-02-25", "2024-02-25T08:00:00Z"),
        ];

        let groups = group_by_month(&transactions);

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|group| group.transactions.iter().map(|t| t.id.as_str()))
            .collect();
        seen.sort();

        assert_eq!(seen, vec!["1", "2", "3"]);
    }

    #[test]
    fn transactions_within_a_group_are_newest_first() {
        let transactions = vec![
            row("older", "2024-01-05", "2024-01-05T08:00:00Z"),
            row("newer", "2024-01-20", "2024-01-20T08:00:00Z"),
            row("same-day-late", "2024-01-20", "2024-01-20T19:00:00Z"),
        ];

        let groups = group_by_month(&transactions);

        let ids: Vec<&str> = groups[0]
            .transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["same-day-late", "newer", "older"]);
    }

    #[test]
    fn invalid_dates_are_dropped_from_the_grouping_only() {
        let transactions = vec![
            row("good", "2024-01-05", "2024-01-05T08:00:00Z"),
            row("bad", "not-a-date", "2024-01-06T08:00:00Z"),
        ];

        let groups = group_by_month(&transactions);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].transactions.len(), 1);
        assert_eq!(groups[0].transactions[0].id, "good");
        // The source collection is untouched; only the view dropped the record.
        assert_eq!(transactions.len(), 2);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn month_enum_carries_the_display_name() {
        let groups = group_by_month(&[row("1", "2024-12-31", "2024-12-31T08:00:00Z")]);

        assert_eq!(groups[0].month, Month::December);
        assert_eq!(groups[0].title(), "December 2024");
    }
}
