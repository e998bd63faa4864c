//! Defines the route handler for the page for recording a new transaction.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    app_state::TimezoneState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner, rupee_input_styles,
    },
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{
        TransactionType,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

fn create_transaction_view(max_date: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let fields = transaction_form_fields(&TransactionFormDefaults {
        transaction_type: TransactionType::Expense,
        category: None,
        amount: None,
        description: None,
        date: max_date,
        max_date,
        autofocus_amount: true,
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("Add Transaction", &[rupee_input_styles()], &content)
}

/// Renders the page for recording a transaction.
pub async fn get_create_transaction_page(
    State(state): State<TimezoneState>,
) -> Result<Response, Error> {
    let max_date = current_local_date(&state.local_timezone)?;

    Ok(create_transaction_view(max_date).into_response())
}
