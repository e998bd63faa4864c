//! Defines the 404 Not Found page and its route handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The requested resource does not exist.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            error_view(
                "Not Found",
                "404",
                "The page you were looking for does not exist.",
                "Check the address for typos, or head back home.",
            ),
        )
            .into_response()
    }
}

/// A fallback route handler that renders the 404 page.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::NotFoundError;

    #[test]
    fn renders_with_404_status() {
        let response = NotFoundError.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
