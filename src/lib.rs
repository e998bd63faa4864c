//! Kharcha is a self-hosted web app for tracking day-to-day income and
//! expenses: record transactions, watch the running balance, browse history
//! grouped by month, and download everything as CSV.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod repository;
mod routing;
mod store;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use repository::TransactionRepository;
pub use routing::build_router;
pub use store::{JsonFileStore, MemoryStore, TransactionStore};
pub use transaction::{Transaction, TransactionDraft, TransactionType};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No transaction type was selected on the transaction form.
    #[error("a transaction type must be selected")]
    MissingTransactionType,

    /// The transaction type was not one of "expense" or "income".
    #[error("\"{0}\" is not a valid transaction type")]
    InvalidTransactionType(String),

    /// No category was selected on the transaction form.
    #[error("a category must be selected")]
    MissingCategory,

    /// The amount field could not be parsed as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero, negative, or not a finite number.
    ///
    /// Transactions record money that actually moved, so every amount must
    /// be strictly positive.
    #[error("the amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The description exceeded the length allowed on the transaction form.
    #[error("the description must be at most {max} characters, got {got}")]
    DescriptionTooLong {
        /// The maximum number of characters allowed.
        max: usize,
        /// The number of characters submitted.
        got: usize,
    },

    /// A date string could not be parsed as a calendar date.
    #[error("could not parse \"{0}\" as a calendar date")]
    InvalidDate(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// The stored transaction data could not be read or parsed.
    #[error("could not read the transaction store: {0}")]
    StorageRead(String),

    /// The transaction data could not be written back to storage.
    #[error("could not write the transaction store: {0}")]
    StorageWrite(String),

    /// The CSV export could not be built from the transaction collection.
    #[error("could not build the CSV export: {0}")]
    ExportFailed(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub(crate) fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingTransactionType => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing transaction type".to_owned(),
                    details: "Select either expense or income.".to_owned(),
                },
            ),
            Error::InvalidTransactionType(value) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction type".to_owned(),
                    details: format!("\"{value}\" is not a valid transaction type."),
                },
            ),
            Error::MissingCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing category".to_owned(),
                    details: "Select a category for the transaction.".to_owned(),
                },
            ),
            Error::InvalidAmount(value) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("\"{value}\" is not a valid amount."),
                },
            ),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("The amount must be greater than zero, got {amount}."),
                },
            ),
            Error::DescriptionTooLong { max, got } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Description too long".to_owned(),
                    details: format!(
                        "The description must be at most {max} characters, got {got}."
                    ),
                },
            ),
            Error::InvalidDate(value) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid date".to_owned(),
                    details: format!("Could not parse \"{value}\" as a calendar date."),
                },
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: "The transaction could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::StorageRead(details) => {
                tracing::error!("could not read the transaction store: {details}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Could not load your transactions".to_owned(),
                        details: "Try again later or check the server logs.".to_owned(),
                    },
                )
            }
            Error::StorageWrite(details) => {
                tracing::error!("could not write the transaction store: {details}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Could not save your transaction".to_owned(),
                        details: "Nothing was saved. Try again later or check the server logs."
                            .to_owned(),
                    },
                )
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
