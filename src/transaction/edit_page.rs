//! Defines the route handler for the page for editing an existing transaction.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    app_state::LocalizedRepositoryState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner, rupee_input_styles,
    },
    navigation::NavBar,
    store::TransactionStore,
    timezone::current_local_date,
    transaction::{
        Transaction,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// Query parameters accepted by the edit page.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EditPageQuery {
    /// Where to send the user after a successful save.
    #[serde(default)]
    redirect_url: Option<String>,
}

fn edit_transaction_view(
    transaction: &Transaction,
    max_date: Date,
    redirect_url: Option<&str>,
) -> Markup {
    let mut update_route =
        endpoints::format_endpoint(endpoints::UPDATE_TRANSACTION, &transaction.id);
    if let Some(redirect_url) = redirect_url {
        match serde_urlencoded::to_string([("redirect_url", redirect_url)]) {
            Ok(param) => update_route = format!("{update_route}?{param}"),
            Err(error) => {
                tracing::error!("Could not encode redirect URL {redirect_url}: {error}");
            }
        }
    }
    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW).into_html();
    let spinner = loading_spinner();

    // Fall back to today when the stored date does not parse, so the record
    // can still be repaired through this form.
    let date = transaction.occurred_on().unwrap_or(max_date);

    let fields = transaction_form_fields(&TransactionFormDefaults {
        transaction_type: transaction.transaction_type,
        category: Some(&transaction.category),
        amount: Some(transaction.amount),
        description: (!transaction.description.is_empty())
            .then_some(transaction.description.as_str()),
        date,
        max_date,
        autofocus_amount: true,
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Added on " (transaction.created_at)
                }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Changes"
                }
            }
        }
    };

    base("Edit Transaction", &[rupee_input_styles()], &content)
}

/// Renders the page for editing the transaction with the given ID.
pub async fn get_edit_transaction_page<S>(
    State(state): State<LocalizedRepositoryState<S>>,
    Path(transaction_id): Path<String>,
    Query(query): Query<EditPageQuery>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let max_date = current_local_date(&state.local_timezone)?;

    let mut repository = state.repository.lock().await;
    repository
        .fetch_all()
        .await
        .inspect_err(|error| tracing::error!("could not refresh transactions: {error}"))?;

    let transaction = repository
        .transactions()
        .iter()
        .find(|transaction| transaction.id == transaction_id)
        .cloned()
        .ok_or(Error::NotFound)?;

    drop(repository);

    Ok(
        edit_transaction_view(&transaction, max_date, query.redirect_url.as_deref())
            .into_response(),
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::{Html, Selector};
    use tokio::sync::Mutex;

    use super::{EditPageQuery, get_edit_transaction_page};
    use crate::{
        Error, MemoryStore, TransactionRepository,
        app_state::LocalizedRepositoryState,
        transaction::{Transaction, TransactionType},
    };

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "1704450600000".to_owned(),
            transaction_type: TransactionType::Income,
            category: "salary".to_owned(),
            amount: 500.0,
            description: "January pay".to_owned(),
            date: "2024-01-10".to_owned(),
            created_at: "2024-01-10T09:00:00Z".to_owned(),
        }
    }

    fn state_with(transactions: Vec<Transaction>) -> LocalizedRepositoryState<MemoryStore> {
        LocalizedRepositoryState {
            repository: Arc::new(Mutex::new(TransactionRepository::new(
                MemoryStore::with_transactions(transactions),
            ))),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn edit_page_prefills_the_form() {
        let state = state_with(vec![sample_transaction()]);

        let response = get_edit_transaction_page(
            State(state),
            Path("1704450600000".to_owned()),
            Query(EditPageQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().unwrap();
        assert_eq!(
            form.value().attr("hx-put"),
            Some("/api/transactions/1704450600000")
        );

        let amount_selector = Selector::parse("input[name=amount]").unwrap();
        let amount = document.select(&amount_selector).next().unwrap();
        assert_eq!(amount.value().attr("value"), Some("500.00"));

        let date_selector = Selector::parse("input[name=date]").unwrap();
        let date = document.select(&date_selector).next().unwrap();
        assert_eq!(date.value().attr("value"), Some("2024-01-10"));

        let selected_selector = Selector::parse("option[selected]").unwrap();
        let selected = document.select(&selected_selector).next().unwrap();
        assert_eq!(selected.value().attr("value"), Some("salary"));
    }

    #[tokio::test]
    async fn edit_form_targets_the_redirect_url() {
        let state = state_with(vec![sample_transaction()]);
        let query = EditPageQuery {
            redirect_url: Some("/history?q=pay".to_owned()),
        };

        let response = get_edit_transaction_page(
            State(state),
            Path("1704450600000".to_owned()),
            Query(query),
        )
        .await
        .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().unwrap();
        assert_eq!(
            form.value().attr("hx-put"),
            Some("/api/transactions/1704450600000?redirect_url=%2Fhistory%3Fq%3Dpay")
        );
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let state = state_with(vec![sample_transaction()]);

        let result = get_edit_transaction_page(
            State(state),
            Path("does-not-exist".to_owned()),
            Query(EditPageQuery::default()),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound));
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
