// Presentation layer - Read-only HTTP access to rendered dashboards
pub mod app_state;
pub mod handlers;
