//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, `TransactionDraft` and the category vocabulary
//! - Pure functions for totals, filtering and month grouping
//! - View handlers for the transaction-related web pages

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_page;
mod filters;
mod form;
mod grouping;
mod history_page;
mod totals;
mod update_endpoint;
mod view;

pub use core::{Transaction, TransactionDraft, TransactionType};
pub(crate) use core::{DATE_FORMAT, categories_for};
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use create_page::get_create_transaction_page;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use edit_page::get_edit_transaction_page;
pub(crate) use filters::{by_type_and_category, recent, search};
pub(crate) use grouping::group_by_month;
pub(crate) use history_page::get_history_page;
pub(crate) use totals::{remaining_balance, total_expense, total_income};
pub(crate) use update_endpoint::update_transaction_endpoint;
pub(crate) use view::{stale_data_banner, transaction_card};
