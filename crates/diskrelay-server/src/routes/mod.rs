//! HTTP route handlers.

pub mod auth;
pub mod files;

pub use auth::{callback_handler, login_handler, logout_handler};
pub use files::{
    dashboard_get_handler, dashboard_post_handler, download_handler, index_handler,
};
