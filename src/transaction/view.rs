//! HTML rendering shared by the history and dashboard transaction lists.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, format_currency},
    transaction::{Transaction, TransactionType, grouping::MonthGroup},
};

fn amount_class(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Expense => "text-red-700 dark:text-red-300",
        TransactionType::Income => "text-green-700 dark:text-green-300",
    }
}

fn signed_amount(transaction: &Transaction) -> String {
    match transaction.transaction_type {
        TransactionType::Expense => format!("-{}", format_currency(transaction.amount)),
        TransactionType::Income => format!("+{}", format_currency(transaction.amount)),
    }
}

/// A single transaction rendered as a list card with edit and delete actions.
///
/// `redirect_param` is an already-encoded "redirect_url=..." query string
/// appended to the edit link so that saving the edit returns the user to
/// the page (and filters) they came from.
pub(crate) fn transaction_card(transaction: &Transaction, redirect_param: Option<&str>) -> Markup {
    let mut edit_url =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
    if let Some(redirect_param) = redirect_param {
        edit_url = format!("{edit_url}?{redirect_param}");
    }
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id);

    html! {
        li
            class="flex items-center justify-between gap-4 rounded-lg border
            border-gray-200 bg-white p-4 shadow-sm dark:border-gray-700
            dark:bg-gray-800"
        {
            div class="min-w-0"
            {
                p class="truncate font-medium"
                {
                    @if transaction.description.is_empty() {
                        span class="text-gray-500 dark:text-gray-400" { "No description" }
                    } @else {
                        (transaction.description)
                    }
                }

                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (transaction.date)
                    " · "
                    span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                }
            }

            div class="flex shrink-0 items-center gap-4"
            {
                span class=(format!("font-semibold {}", amount_class(transaction.transaction_type)))
                {
                    (signed_amount(transaction))
                }

                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target="closest li"
                    hx-swap="outerHTML"
                {
                    "Delete"
                }
            }
        }
    }
}

/// A month of transactions with a sticky section heading.
pub(crate) fn month_section(group: &MonthGroup, redirect_param: Option<&str>) -> Markup {
    html! {
        section class="w-full"
        {
            h2
                class="sticky top-0 z-10 mb-2 rounded bg-gray-100 px-3 py-2
                text-sm font-semibold uppercase tracking-wide text-gray-700
                dark:bg-gray-800 dark:text-gray-300"
            {
                (group.title())
            }

            ul class="space-y-2"
            {
                @for transaction in &group.transactions {
                    (transaction_card(transaction, redirect_param))
                }
            }
        }
    }
}

/// An inline banner shown when the stored collection could not be loaded and
/// the page is rendering stale data.
pub(crate) fn stale_data_banner(details: &str) -> Markup {
    html! {
        div
            class="w-full rounded-lg border border-red-300 bg-red-50 p-4
            text-red-800 dark:border-red-800 dark:bg-gray-800 dark:text-red-400"
            role="alert"
        {
            span class="font-medium" { "Could not load your transactions." }
            " Showing the last known data. "
            span class="text-sm" { (details) }
        }
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};

    use super::{month_section, transaction_card};
    use crate::transaction::{Transaction, TransactionType, group_by_month};

    fn row(id: &str, transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: id.to_owned(),
            transaction_type,
            category: "food".to_owned(),
            amount,
            description: "lunch".to_owned(),
            date: "2024-01-05".to_owned(),
            created_at: "2024-01-05T10:30:00Z".to_owned(),
        }
    }

    #[test]
    fn expense_card_shows_negative_rupee_amount() {
        let html = transaction_card(&row("1", TransactionType::Expense, 100.0), None).into_string();

        assert!(html.contains("-₹100.00"));
    }

    #[test]
    fn income_card_shows_positive_rupee_amount() {
        let html = transaction_card(&row("1", TransactionType::Income, 500.0), None).into_string();

        assert!(html.contains("+₹500.00"));
    }

    #[test]
    fn card_wires_up_edit_and_delete_for_its_id() {
        let markup =
            transaction_card(&row("1704450600000", TransactionType::Expense, 100.0), None);
        let document = Html::parse_fragment(&markup.into_string());

        let edit_selector = Selector::parse("a").unwrap();
        let edit = document.select(&edit_selector).next().unwrap();
        assert_eq!(
            edit.value().attr("href"),
            Some("/transactions/1704450600000/edit")
        );

        let delete_selector = Selector::parse("button[hx-delete]").unwrap();
        let delete = document.select(&delete_selector).next().unwrap();
        assert_eq!(
            delete.value().attr("hx-delete"),
            Some("/api/transactions/1704450600000")
        );
        assert!(delete.value().attr("hx-confirm").is_some());
    }

    #[test]
    fn edit_link_carries_the_redirect_back() {
        let markup = transaction_card(
            &row("1", TransactionType::Expense, 100.0),
            Some("redirect_url=%2Fhistory%3Fq%3Dlunch"),
        );
        let document = Html::parse_fragment(&markup.into_string());

        let edit_selector = Selector::parse("a").unwrap();
        let edit = document.select(&edit_selector).next().unwrap();
        assert_eq!(
            edit.value().attr("href"),
            Some("/transactions/1/edit?redirect_url=%2Fhistory%3Fq%3Dlunch")
        );
    }

    #[test]
    fn month_section_renders_heading_and_cards() {
        let groups = group_by_month(&[
            row("1", TransactionType::Expense, 100.0),
            row("2", TransactionType::Income, 500.0),
        ]);

        let html = month_section(&groups[0], None).into_string();

        assert!(html.contains("January 2024"));
        let document = Html::parse_fragment(&html);
        let card_selector = Selector::parse("li").unwrap();
        assert_eq!(document.select(&card_selector).count(), 2);
    }
}
