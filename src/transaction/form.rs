//! The shared transaction form: field rendering and draft validation.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{
        TransactionDraft, TransactionType,
        core::{DATE_FORMAT, categories_for},
    },
};

/// The longest description the form accepts, in characters.
pub(crate) const MAX_DESCRIPTION_CHARS: usize = 50;

/// The raw form data for creating or editing a transaction.
///
/// Everything arrives as text so that a bad amount or date surfaces as a
/// validation alert instead of a form-decoding rejection.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransactionForm {
    /// The selected transaction type, "expense" or "income".
    #[serde(default)]
    pub(crate) type_: Option<String>,
    /// The selected category value.
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// The amount as typed into the number input.
    #[serde(default)]
    pub(crate) amount: String,
    /// The free-text description.
    #[serde(default)]
    pub(crate) description: String,
    /// The selected date as "YYYY-MM-DD".
    #[serde(default)]
    pub(crate) date: String,
}

impl TransactionForm {
    /// Check the form and turn it into a draft the repository can persist.
    ///
    /// # Errors
    /// Returns the first validation error found: a missing type or category,
    /// a non-numeric or non-positive amount, an over-long description, or an
    /// unparseable date. Nothing reaches storage when this fails.
    pub(crate) fn validate(self) -> Result<TransactionDraft, Error> {
        let transaction_type: TransactionType = match self.type_.as_deref() {
            None | Some("") => return Err(Error::MissingTransactionType),
            Some(raw) => raw.parse()?,
        };

        let category = match self.category {
            None => return Err(Error::MissingCategory),
            Some(category) if category.is_empty() => return Err(Error::MissingCategory),
            Some(category) => category,
        };

        let raw_amount = self.amount.trim();
        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| Error::InvalidAmount(raw_amount.to_owned()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        let description_chars = self.description.chars().count();
        if description_chars > MAX_DESCRIPTION_CHARS {
            return Err(Error::DescriptionTooLong {
                max: MAX_DESCRIPTION_CHARS,
                got: description_chars,
            });
        }

        let date = Date::parse(&self.date, DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(self.date.clone()))?;

        Ok(TransactionDraft {
            transaction_type,
            category,
            amount,
            description: self.description,
            date,
        })
    }
}

/// Prefilled values for rendering the transaction form fields.
pub(crate) struct TransactionFormDefaults<'a> {
    pub(crate) transaction_type: TransactionType,
    pub(crate) category: Option<&'a str>,
    pub(crate) amount: Option<f64>,
    pub(crate) description: Option<&'a str>,
    pub(crate) date: Date,
    pub(crate) max_date: Date,
    pub(crate) autofocus_amount: bool,
}

pub(crate) fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.abs()));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");
    let description_placeholder = "Optional description";
    let date_str = defaults
        .date
        .format(DATE_FORMAT)
        .expect("dates always format as year-month-day");
    let max_date_str = defaults
        .max_date
        .format(DATE_FORMAT)
        .expect("dates always format as year-month-day");

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for group_type in [TransactionType::Expense, TransactionType::Income] {
                    optgroup label=(match group_type {
                        TransactionType::Expense => "Expense",
                        TransactionType::Income => "Income",
                    })
                    {
                        @for category in categories_for(group_type) {
                            @if Some(category.value) == defaults.category {
                                option value=(category.value) selected { (category.label) }
                            } @else {
                                option value=(category.value) { (category.label) }
                            }
                        }
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder=(amount_placeholder)
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(max_date_str)
                value=(date_str)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder=(description_placeholder)
                maxlength=(MAX_DESCRIPTION_CHARS)
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
