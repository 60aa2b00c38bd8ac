//! Uniform success/failure responses for axum
//!
//! [`setup`] installs the envelope on a router. Handlers extract [`Api`],
//! finish with [`Api::success`] and abort with [`Api::fail`]; the installed
//! interceptor renders every raised value.

#![allow(clippy::must_use_candidate)]

mod context;
mod demo;
mod error;
mod health;
mod intercept;
mod options;

use std::net::SocketAddr;

use anyhow::Context as _;
use axum::Router;
use envelope_config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub use context::{Api, Success};
pub use envelope_core::{ApiFail, DEFAULT_FAIL_STATUS, FailDetail};
pub use error::{ApiError, ApiResult, Diagnostic, UnexpectedError};
pub use intercept::setup;
pub use options::{ApiOptions, ApiOptionsBuilder, FailFn, FallbackFn, InvalidFailStatus, SuccessFn, default_error_response};

/// Assembled server with routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_routes(config, Router::new())
    }

    /// Build the server with extra application routes
    ///
    /// `routes` get the envelope like the built-in ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate
    pub fn with_routes(config: &Config, routes: Router) -> anyhow::Result<Self> {
        config.validate()?;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Sample routes
        if config.server.demo {
            app = app.merge(demo::demo_router());
        }

        // Envelope (innermost, so it sees every raised value first)
        let options = ApiOptions::try_from(&config.api).context("invalid api configuration")?;
        app = setup(app, options);

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self { router: app, listen_address })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.listen_address)
            .await
            .with_context(|| format!("failed to bind {}", self.listen_address))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve requests on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails
    pub async fn serve_on(self, listener: TcpListener, shutdown: CancellationToken) -> anyhow::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
