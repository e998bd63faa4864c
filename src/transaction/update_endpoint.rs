//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    Error, app_state::RepositoryState, endpoints, store::TransactionStore,
    transaction::form::TransactionForm,
};

/// Query parameters accepted by the update endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryParams {
    /// Where to send the user after a successful save, defaults to history.
    #[serde(default)]
    redirect_url: Option<String>,
}

/// A route handler for updating a transaction, redirects back to where the
/// edit started (the history page by default) on success.
///
/// Every field except the ID and creation timestamp is replaced with the
/// submitted values. An unknown ID responds with a not-found alert rather
/// than silently dropping the edit.
pub async fn update_transaction_endpoint<S>(
    State(state): State<RepositoryState<S>>,
    Path(transaction_id): Path<String>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<TransactionForm>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let mut repository = state.repository.lock().await;

    if let Err(error) = repository.fetch_all().await {
        return error.into_alert_response();
    }

    let Some(existing) = repository
        .transactions()
        .iter()
        .find(|transaction| transaction.id == transaction_id)
        .cloned()
    else {
        return Error::UpdateMissingTransaction.into_alert_response();
    };

    let mut updated = draft.into_transaction(existing.id, time::OffsetDateTime::now_utc());
    updated.created_at = existing.created_at;

    if let Err(error) = repository.update(updated).await {
        return error.into_alert_response();
    }

    let redirect_url = query_params
        .redirect_url
        .unwrap_or(endpoints::HISTORY_VIEW.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
