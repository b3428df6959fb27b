//! HTTP surface of the diskrelay gateway.
//!
//! Routes:
//!
//! - `GET /` - landing view
//! - `GET /login` - redirect to the provider authorize URL
//! - `GET /oauth/callback` - code exchange, session creation
//! - `GET|POST /dashboard` - public-resource listing (POST adds a filter)
//! - `GET /download` - resolve and stream one file
//! - `GET /logout` - session destruction
//!
//! The session cookie is the only caller identity; every route needing the
//! Disk API goes through [`AppState::access`] and turns `NeedsLogin` into a
//! redirect to `/login`.

pub mod error;
pub mod routes;
pub mod state;
pub mod views;

pub use error::{Result, ServerError};
pub use state::{AppState, SESSION_COOKIE};

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// The diskrelay HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a server from a pre-built application state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(routes::index_handler))
            .route("/login", get(routes::login_handler))
            .route("/oauth/callback", get(routes::callback_handler))
            .route(
                "/dashboard",
                get(routes::dashboard_get_handler).post(routes::dashboard_post_handler),
            )
            .route("/download", get(routes::download_handler))
            .route("/logout", get(routes::logout_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!("starting server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("failed to bind: {e}")))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("server error: {e}")))?;

        Ok(())
    }

    /// Run the server on the configured bind address.
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = self
            .state
            .config
            .server
            .bind
            .parse()
            .map_err(|e| ServerError::Internal(format!("invalid bind address: {e}")))?;
        self.run_on(addr).await
    }
}
