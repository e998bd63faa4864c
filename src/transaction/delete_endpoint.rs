//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error, alert::Alert, app_state::RepositoryState, store::TransactionStore,
};

/// A route handler for deleting a transaction, responds with an alert.
///
/// On success the response body is empty apart from the out-of-band alert,
/// so htmx removes the targeted card from the list.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<RepositoryState<S>>,
    Path(transaction_id): Path<String>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    let mut repository = state.repository.lock().await;

    match repository.delete(&transaction_id).await {
        // The status code has to be 200 OK or HTMX will not remove the card.
        Ok(()) => (
            StatusCode::OK,
            Alert::Success {
                message: "Transaction deleted".to_owned(),
                details: String::new(),
            }
            .into_html(),
        )
            .into_response(),
        Err(error @ Error::DeleteMissingTransaction) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
