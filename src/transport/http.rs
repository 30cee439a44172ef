//! HTTP transport
//!
//! Serves the API router until cancelled or interrupted.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Default port for the HTTP server
pub const DEFAULT_HTTP_PORT: u16 = 9000;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "127.0.0.1:9000")
    pub bind: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_HTTP_PORT)),
        }
    }
}

impl HttpConfig {
    /// Create a new HTTP config with the specified bind address
    pub fn new(bind: SocketAddr) -> Self {
        Self { bind }
    }

    /// Create config from host and port strings
    pub fn from_host_port(host: &str, port: u16) -> Result<Self, std::net::AddrParseError> {
        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        Ok(Self::new(addr))
    }
}

/// Serve `app` on an already bound listener until `ct` is cancelled
pub async fn serve(
    listener: TcpListener,
    app: Router,
    ct: CancellationToken,
) -> std::io::Result<()> {
    info!("HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
}

/// Bind and serve `app`, returning a token that stops the server
pub async fn run_http(
    app: Router,
    config: HttpConfig,
) -> anyhow::Result<(CancellationToken, tokio::task::JoinHandle<std::io::Result<()>>)> {
    let listener = TcpListener::bind(config.bind).await?;
    let ct = CancellationToken::new();

    let handle = tokio::spawn(serve(listener, app, ct.clone()));

    Ok((ct, handle))
}

/// Run the HTTP server and wait for shutdown
///
/// This is a convenience function that starts the server and waits
/// for a shutdown signal (Ctrl+C).
pub async fn run_http_blocking(app: Router, config: HttpConfig) -> anyhow::Result<()> {
    let (ct, handle) = run_http(app, config).await?;

    info!("Press Ctrl+C to stop the server");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        _ = ct.cancelled() => {
            info!("Server cancelled");
        }
    }

    ct.cancel();
    handle.await??;

    info!("HTTP server stopped");
    Ok(())
}
