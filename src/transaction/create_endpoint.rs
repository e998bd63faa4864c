//! Defines the endpoint for recording a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    app_state::RepositoryState, endpoints, store::TransactionStore,
    transaction::form::TransactionForm,
};

/// A route handler for recording a new transaction, redirects to the
/// dashboard on success.
///
/// Validation failures and storage failures respond with an HTML alert and
/// never touch the in-memory collection.
pub async fn create_transaction_endpoint<S>(
    State(state): State<RepositoryState<S>>,
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

    if let Err(error) = repository.add(draft).await {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use tokio::sync::Mutex;

    use super::create_transaction_endpoint;
    use crate::{
        MemoryStore, TransactionRepository,
        app_state::RepositoryState,
        store::TransactionStore,
        transaction::form::TransactionForm,
    };

    fn test_state() -> RepositoryState<MemoryStore> {
        RepositoryState {
            repository: Arc::new(Mutex::new(TransactionRepository::new(MemoryStore::new()))),
        }
    }

    fn valid_form() -> TransactionForm {
        TransactionForm {
            type_: Some("expense".to_owned()),
            category: Some("food".to_owned()),
            amount: "120.50".to_owned(),
            description: "lunch".to_owned(),
            date: "2024-01-05".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(valid_form()))
            .await
            .into_response();

        assert_redirects_to_dashboard(response);

        let repository = state.repository.lock().await;
        let transactions = repository.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 120.50);
        assert_eq!(transactions[0].description, "lunch");
        assert!(!transactions[0].id.is_empty());
    }

    #[tokio::test]
    async fn created_transaction_is_persisted() {
        let store = MemoryStore::new();
        let state = RepositoryState {
            repository: Arc::new(Mutex::new(TransactionRepository::new(store.clone()))),
        };

        create_transaction_endpoint(State(state), Form(valid_form())).await;

        let stored = store.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].category, "food");
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_before_the_repository() {
        let state = test_state();
        let form = TransactionForm {
            amount: "-5".to_owned(),
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

        let repository = state.repository.lock().await;
        assert!(repository.transactions().is_empty());
    }

    #[tokio::test]
    async fn missing_category_is_rejected_before_the_repository() {
        let state = test_state();
        let form = TransactionForm {
            category: None,
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

        let repository = state.repository.lock().await;
        assert!(repository.transactions().is_empty());
    }

    #[track_caller]
    fn assert_redirects_to_dashboard(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/dashboard",
            "got redirect to {location:?}, want redirect to /dashboard"
        );
    }
}
