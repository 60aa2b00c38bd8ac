//! Test server wrapper that starts envelope on a random port

use std::net::SocketAddr;

use envelope_config::Config;
use envelope_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::start_with_routes(config, axum::Router::new()).await
    }

    /// Start a test server with extra application routes
    ///
    /// The listener is bound on an ephemeral port before the server task
    /// starts, so requests never race the bind.
    pub async fn start_with_routes(config: Config, routes: axum::Router) -> anyhow::Result<Self> {
        let server = Server::with_routes(&config, routes)?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let shutdown = CancellationToken::new();
        tokio::spawn(server.serve_on(listener, shutdown.clone()));

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
