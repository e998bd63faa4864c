//! Defines the route handler for the month-grouped transaction history page.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::RepositoryState,
    endpoints,
    html::{FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::TransactionStore,
    transaction::{
        TransactionType, by_type_and_category, categories_for, group_by_month,
        grouping::MonthGroup, search,
        view::{month_section, stale_data_banner},
    },
};

/// The filter controls as they arrive in the query string.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct HistoryQuery {
    /// Free-text search over descriptions and amounts.
    #[serde(default)]
    pub(crate) q: Option<String>,
    /// "expense", "income", or empty for all.
    #[serde(default)]
    pub(crate) type_: Option<String>,
    /// A category value, or empty for all.
    #[serde(default)]
    pub(crate) category: Option<String>,
}

impl HistoryQuery {
    fn selected_type(&self) -> Option<TransactionType> {
        match self.type_.as_deref() {
            None | Some("") | Some("all") => None,
            Some(raw) => match raw.parse() {
                Ok(transaction_type) => Some(transaction_type),
                Err(_) => {
                    tracing::debug!("Ignoring unknown type filter {raw:?}");
                    None
                }
            },
        }
    }

    fn selected_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }

    fn search_query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// The URL of the history page with these filters applied.
    fn self_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query_string) if !query_string.is_empty() => {
                format!("{}?{query_string}", endpoints::HISTORY_VIEW)
            }
            Ok(_) => endpoints::HISTORY_VIEW.to_owned(),
            Err(error) => {
                tracing::error!("Could not encode history filters: {error}");
                endpoints::HISTORY_VIEW.to_owned()
            }
        }
    }
}

/// Encode `redirect_url` as a query-string parameter for edit links.
fn build_redirect_param(redirect_url: &str) -> Option<String> {
    serde_urlencoded::to_string([("redirect_url", redirect_url)])
        .inspect_err(|error| {
            tracing::error!(
                "Could not set redirect URL {redirect_url} due to encoding error: {error}"
            );
        })
        .ok()
}

/// Render the transaction history, filtered and grouped by month.
pub async fn get_history_page<S>(
    State(state): State<RepositoryState<S>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    let mut repository = state.repository.lock().await;

    // Refresh from storage like the mobile screens did on mount; a failed
    // load falls back to the last known collection with a warning banner.
    let load_error = repository.fetch_all().await.err();

    let filtered = by_type_and_category(
        repository.transactions(),
        query.selected_type(),
        query.selected_category(),
    );
    let filtered = search(&filtered, query.search_query());
    let groups = group_by_month(&filtered);

    drop(repository);

    history_view(
        &groups,
        &query,
        load_error.map(|error| error.to_string()),
    )
    .into_response()
}

fn history_view(
    groups: &[MonthGroup],
    query: &HistoryQuery,
    load_error: Option<String>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW).into_html();
    let redirect_param = build_redirect_param(&query.self_url());

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-4"
            {
                header class="flex flex-wrap items-end justify-between"
                {
                    h1 class="text-xl font-bold" { "History" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                @if let Some(details) = &load_error {
                    (stale_data_banner(details))
                }

                (filter_controls(query))

                @if groups.is_empty() {
                    p class="py-8 text-center text-gray-600 dark:text-gray-400"
                    {
                        "No transactions found"
                    }
                } @else {
                    @for group in groups {
                        (month_section(group, redirect_param.as_deref()))
                    }
                }
            }
        }
    };

    base("History", &[], &content)
}

fn filter_controls(query: &HistoryQuery) -> Markup {
    let selected_type = query.selected_type();
    let selected_category = query.selected_category();

    html! {
        form
            method="get"
            action=(endpoints::HISTORY_VIEW)
            class="flex flex-col gap-3 sm:flex-row"
        {
            input
                name="q"
                type="search"
                placeholder="Search by description or amount"
                value=[query.q.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);

            select name="type_" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "All types" }
                option value="expense" selected[selected_type == Some(TransactionType::Expense)]
                {
                    "Expense"
                }
                option value="income" selected[selected_type == Some(TransactionType::Income)]
                {
                    "Income"
                }
            }

            select name="category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "All categories" }

                @for group_type in [TransactionType::Expense, TransactionType::Income] {
                    @for category in categories_for(group_type) {
                        option
                            value=(category.value)
                            selected[selected_category == Some(category.value)]
                        {
                            (category.label)
                        }
                    }
                }
            }

            button
                type="submit"
                class="rounded bg-blue-500 px-4 py-2 text-white hover:bg-blue-600
                dark:bg-blue-600 dark:hover:bg-blue-700"
            {
                "Filter"
            }
        }
    }
}

#[cfg(test)]
mod history_page_tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use tokio::sync::Mutex;

    use super::{HistoryQuery, get_history_page};
    use crate::{
        MemoryStore, TransactionRepository,
        app_state::RepositoryState,
        transaction::{Transaction, TransactionType},
    };

    fn row(id: &str, transaction_type: TransactionType, description: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            transaction_type,
            category: "food".to_owned(),
            amount: 100.0,
            description: description.to_owned(),
            date: date.to_owned(),
            created_at: format!("{date}T10:00:00Z"),
        }
    }

    fn state_with(transactions: Vec<Transaction>) -> RepositoryState<MemoryStore> {
        let store = MemoryStore::with_transactions(transactions);
        RepositoryState {
            repository: Arc::new(Mutex::new(TransactionRepository::new(store))),
        }
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn groups_transactions_under_month_headings() {
        let state = state_with(vec![
            row("1", TransactionType::Expense, "lunch", "2024-01-05"),
            row("2", TransactionType::Income, "pay", "2024-03-10"),
        ]);

        let response = get_history_page(State(state), Query(HistoryQuery::default())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        let headings: Vec<String> = document
            .select(&Selector::parse("h2").unwrap())
            .map(|heading| heading.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(headings, vec!["March 2024", "January 2024"]);
    }

    #[tokio::test]
    async fn type_filter_narrows_the_list() {
        let state = state_with(vec![
            row("1", TransactionType::Expense, "lunch", "2024-01-05"),
            row("2", TransactionType::Income, "pay", "2024-01-10"),
        ]);
        let query = HistoryQuery {
            type_: Some("income".to_owned()),
            ..Default::default()
        };

        let response = get_history_page(State(state), Query(query)).await;

        let document = parse_html(response).await;
        let cards = document
            .select(&Selector::parse("ul.space-y-2 > li").unwrap())
            .count();
        assert_eq!(cards, 1);
    }

    #[tokio::test]
    async fn search_filter_narrows_the_list() {
        let state = state_with(vec![
            row("1", TransactionType::Expense, "lunch at the dhaba", "2024-01-05"),
            row("2", TransactionType::Expense, "auto fare", "2024-01-06"),
        ]);
        let query = HistoryQuery {
            q: Some("dhaba".to_owned()),
            ..Default::default()
        };

        let response = get_history_page(State(state), Query(query)).await;

        let document = parse_html(response).await;
        let cards = document
            .select(&Selector::parse("ul.space-y-2 > li").unwrap())
            .count();
        assert_eq!(cards, 1);
    }

    #[tokio::test]
    async fn edit_links_carry_the_current_filters() {
        let state = state_with(vec![row("1", TransactionType::Income, "pay", "2024-01-10")]);
        let query = HistoryQuery {
            type_: Some("income".to_owned()),
            ..Default::default()
        };

        let response = get_history_page(State(state), Query(query)).await;

        let document = parse_html(response).await;
        let edit = document
            .select(&Selector::parse("ul.space-y-2 a").unwrap())
            .next()
            .unwrap();
        let href = edit.value().attr("href").unwrap();
        assert!(
            href.starts_with("/transactions/1/edit?redirect_url="),
            "unexpected edit link {href}"
        );
        assert!(href.contains("income"));
    }

    #[tokio::test]
    async fn empty_collection_shows_the_empty_state() {
        let state = state_with(Vec::new());

        let response = get_history_page(State(state), Query(HistoryQuery::default())).await;

        let document = parse_html(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("No transactions found"));
    }
}
