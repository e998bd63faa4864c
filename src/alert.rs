//! Alert system for displaying success and error messages to users.
//!
//! This module provides a unified way to display alert messages across the
//! application with proper styling and dismissal functionality. Alerts are
//! rendered into the fixed alert container in the page shell, which htmx
//! swaps in out-of-band, giving the toast behaviour of the mobile app.

use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation succeeded.
    Success {
        /// The headline of the alert.
        message: String,
        /// Extra detail displayed under the headline.
        details: String,
    },
    /// The operation failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// Extra detail displayed under the headline.
        details: String,
    },
}

impl Alert {
    /// Create an error alert without details.
    #[allow(dead_code)]
    pub fn error_simple(message: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: String::new(),
        }
    }

    /// Render the alert as an HTML fragment targeting the alert container.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "border-green-300 bg-green-50 text-green-800 dark:border-green-800 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "border-red-300 bg-red-50 text-red-800 dark:border-red-800 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class=(format!("flex flex-col p-4 mb-4 border rounded-lg shadow {container_style}"))
                    role="alert"
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span class="text-sm" { (details) }
                    }

                    button
                        type="button"
                        class="self-end text-sm underline cursor-pointer"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "Dismiss"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    #[test]
    fn error_alert_renders_message_and_details() {
        let html = Alert::Error {
            message: "Could not save your transaction".to_owned(),
            details: "Nothing was saved.".to_owned(),
        }
        .into_html()
        .into_string();

        assert!(html.contains("Could not save your transaction"));
        assert!(html.contains("Nothing was saved."));
        assert!(html.contains("role=\"alert\""));
    }

    #[test]
    fn simple_error_alert_omits_details() {
        let html = Alert::error_simple("Something went wrong")
            .into_html()
            .into_string();

        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("class=\"text-sm\""));
    }
}
