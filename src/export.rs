//! Builds the CSV download of the transaction collection.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    app_state::LocalizedRepositoryState,
    store::TransactionStore,
    timezone::current_local_date,
    transaction::{DATE_FORMAT, Transaction},
};

/// The fixed column order of the export.
const CSV_HEADER: [&str; 6] = ["ID", "Type", "Category", "Amount", "Description", "Date"];

/// Serialize the collection as CSV text.
///
/// Fields containing commas, quotes or newlines come out double-quote
/// escaped, courtesy of the writer.
pub(crate) fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::ExportFailed(error.to_string()))?;

    for transaction in transactions {
        let transaction_type = transaction.transaction_type.to_string();
        let amount = transaction.amount.to_string();

        writer
            .write_record([
                transaction.id.as_str(),
                transaction_type.as_str(),
                transaction.category.as_str(),
                amount.as_str(),
                transaction.description.as_str(),
                transaction.date.as_str(),
            ])
            .map_err(|error| Error::ExportFailed(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::ExportFailed(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::ExportFailed(error.to_string()))
}

/// A route handler that downloads the full transaction collection as a CSV
/// attachment, the web counterpart of the mobile app's share action.
pub async fn export_transactions_csv<S>(
    State(state): State<LocalizedRepositoryState<S>>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let today = current_local_date(&state.local_timezone)?;

    let mut repository = state.repository.lock().await;

    // Export straight from storage; stale in-memory data would silently
    // leave out edits made by another process.
    repository.fetch_all().await?;

    let csv_text = transactions_to_csv(repository.transactions())?;

    drop(repository);

    let file_name = format!(
        "kharcha-export-{}.csv",
        today
            .format(DATE_FORMAT)
            .expect("dates always format as year-month-day")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv_text,
    )
        .into_response())
}
