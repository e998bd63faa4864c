//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    export::export_transactions_csv,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    store::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_edit_transaction_page, get_history_page, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page::<S>))
        .route(endpoints::HISTORY_VIEW, get(get_history_page::<S>))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page::<S>),
        )
        .route(endpoints::EXPORT_CSV, get(export_transactions_csv::<S>))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint::<S>),
        )
        .route(
            endpoints::UPDATE_TRANSACTION,
            put(update_transaction_endpoint::<S>),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint::<S>),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod routing_tests {
    use super::build_router;
    use crate::{AppState, MemoryStore};

    #[test]
    fn router_builds_with_the_memory_store() {
        let state = AppState::new(MemoryStore::new(), "Etc/UTC");

        let _router = build_router(state);
    }
}
