use crate::config::ServerConfig;
use crate::error::FrameworkError;
use crate::http::{collect_body, HttpResponse, Request};
use crate::routing::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

/// HTTP server that hands every request, along with a clone of the shared
/// application state, to the router
pub struct Server<S> {
    router: Arc<Router<S>>,
    state: S,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl<S> Server<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(router: Router<S>, state: S) -> Self {
        Self {
            router: Arc::new(router),
            state,
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_size: 1024 * 1024,
        }
    }

    pub fn from_config(router: Router<S>, state: S, config: &ServerConfig) -> Self {
        Self::new(router, state)
            .host(&config.host)
            .port(config.port)
            .max_body_size(config.max_body_size)
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Requests with a larger body are answered with 413
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Accept connections until Ctrl+C
    pub async fn run(self) -> Result<(), FrameworkError> {
        let listener = TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                FrameworkError::internal(format!(
                    "Cannot bind {}:{}: {}",
                    self.host, self.port, e
                ))
            })?;

        match listener.local_addr() {
            Ok(addr) => tracing::info!("server running on http://{}", addr),
            Err(_) => tracing::info!(host = %self.host, port = self.port, "server running"),
        }

        let router = self.router;
        let state = self.state;
        let limit = self.max_body_size;

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                },
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received, stopping server");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = router.clone();
            let state = state.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    let state = state.clone();
                    async move { Ok::<_, Infallible>(handle_request(router, state, limit, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(%peer, error = %err, "connection closed with error");
                }
            });
        }
    }
}

async fn handle_request<S>(
    router: Arc<Router<S>>,
    state: S,
    limit: usize,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>>
where
    S: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let (parts, body) = req.into_parts();
    let response = match collect_body(body, limit).await {
        Ok(bytes) => router.dispatch(Request::new(parts, bytes), state).await,
        Err(e) => HttpResponse::from(e),
    };

    tracing::info!(
        %method,
        %path,
        status = response.status_code(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );

    response.into_hyper()
}
