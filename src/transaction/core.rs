//! Defines the core data models for transactions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

/// The format transaction dates are stored and displayed in, e.g. "2024-01-05".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

/// Whether a transaction took money out of the wallet or put money into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

/// A category the transaction form suggests for a transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CategoryOption {
    /// The label shown in the category dropdown.
    pub(crate) label: &'static str,
    /// The value stored on the transaction.
    pub(crate) value: &'static str,
}

const EXPENSE_CATEGORIES: [CategoryOption; 6] = [
    CategoryOption { label: "Food", value: "food" },
    CategoryOption { label: "Transport", value: "transport" },
    CategoryOption { label: "Shopping", value: "shopping" },
    CategoryOption { label: "Bills", value: "bills" },
    CategoryOption { label: "Entertainment", value: "entertainment" },
    CategoryOption { label: "Other", value: "other_expense" },
];

const INCOME_CATEGORIES: [CategoryOption; 5] = [
    CategoryOption { label: "Salary", value: "salary" },
    CategoryOption { label: "Bonus", value: "bonus" },
    CategoryOption { label: "Investment", value: "investment" },
    CategoryOption { label: "Gift", value: "gift" },
    CategoryOption { label: "Other", value: "other_income" },
];

/// The categories the form suggests for `transaction_type`.
///
/// The vocabulary only drives the dropdown. Storage accepts any category
/// string, so records written by older versions of the app still load.
pub(crate) fn categories_for(transaction_type: TransactionType) -> &'static [CategoryOption] {
    match transaction_type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Dates and creation timestamps are stored as text, exactly as they appear
/// in the persisted JSON. They are parsed on demand via [Transaction::occurred_on]
/// and [Transaction::recorded_at] so one malformed record degrades a derived
/// view instead of making the whole collection unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned when the record is created.
    pub id: String,
    /// Whether the transaction is an expense or income.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to, e.g. "food", "salary".
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// When the transaction happened, as "YYYY-MM-DD".
    pub date: String,
    /// When the record was created, as an RFC 3339 timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Transaction {
    /// The calendar date the transaction happened, if `date` parses.
    pub fn occurred_on(&self) -> Option<Date> {
        Date::parse(&self.date, DATE_FORMAT).ok()
    }

    /// The timestamp the record was created, if `created_at` parses.
    pub fn recorded_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(
            &self.created_at,
            &time::format_description::well_known::Rfc3339,
        )
        .ok()
    }
}

/// A validated transaction waiting for an ID and creation timestamp.
///
/// Drafts only come out of the form layer, which has already checked the
/// amount, description length and date, so the repository can persist them
/// without re-validating.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Whether the transaction is an expense or income.
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// The amount of money spent or earned, greater than zero.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

impl TransactionDraft {
    /// Finalize the draft into a [Transaction] with the given identity.
    pub(crate) fn into_transaction(self, id: String, created_at: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self
                .date
                .format(DATE_FORMAT)
                .expect("dates always format as year-month-day"),
            created_at: created_at
                .format(&time::format_description::well_known::Rfc3339)
                .expect("UTC timestamps always format as RFC 3339"),
        }
    }
}
