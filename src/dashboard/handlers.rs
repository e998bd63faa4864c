//! Dashboard HTTP handler and page rendering.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::LocalizedRepositoryState,
    dashboard::cards::{BalanceSummary, balance_card, recent_transactions_view},
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::TransactionStore,
    timezone::current_local_date,
    transaction::{Transaction, recent, stale_data_banner},
};

/// Number of days of activity to show in the recent-transactions list.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Display the landing page: the balance card and recent activity.
pub async fn get_dashboard_page<S>(
    State(state): State<LocalizedRepositoryState<S>>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let today = current_local_date(&state.local_timezone)?;

    let mut repository = state.repository.lock().await;

    // Refresh from storage like the mobile home screen did on mount; a
    // failed load falls back to the last known collection with a warning.
    let load_error = repository.fetch_all().await.err();

    let summary = BalanceSummary::from_transactions(repository.transactions());
    let recent_transactions = recent(repository.transactions(), RECENT_WINDOW_DAYS, today);

    drop(repository);

    Ok(dashboard_view(
        &summary,
        &recent_transactions,
        load_error.map(|error| error.to_string()),
    )
    .into_response())
}

fn dashboard_view(
    summary: &BalanceSummary,
    recent_transactions: &[Transaction],
    load_error: Option<String>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl space-y-6"
            {
                @if let Some(details) = &load_error {
                    (stale_data_banner(details))
                }

                (balance_card(summary))

                (recent_transactions_view(recent_transactions, RECENT_WINDOW_DAYS))

                a
                    href=(endpoints::NEW_TRANSACTION_VIEW)
                    class="fixed bottom-24 right-6 z-30 flex h-14 w-14 items-center
                    justify-center rounded-full bg-blue-600 text-3xl text-white
                    shadow-lg hover:bg-blue-700 lg:bottom-10"
                    aria-label="Add transaction"
                {
                    "+"
                }
            }
        }
    };

    base("Home", &[], &content)
}
