//! The dashboard: balance card and recent activity.
//!
//! This module contains:
//! - The route handler for the landing page
//! - The balance card and recent-transactions views

mod cards;
mod handlers;

pub(crate) use handlers::get_dashboard_page;
