use crate::dashboard::{pages, SubgraphService};
use crate::proxy::stats::RelayStats;
use crate::proxy::upstream::client::UpstreamClient;
use crate::proxy::ProxyConfig;
use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<UpstreamClient>,
    pub stats: Arc<RelayStats>,
    /// Dashboard client, talks to this server's own relay routes
    pub dashboard: Arc<SubgraphService>,
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(
        config: &ProxyConfig,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), String> {
        // Bind address
        let addr = format!("{}:{}", config.get_bind_address(), config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind address {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let state = AppState {
            config: Arc::new(config.clone()),
            upstream: Arc::new(UpstreamClient::new(
                config.request_timeout,
                Some(config.upstream_proxy.clone()),
            )),
            stats: Arc::new(RelayStats::new()),
            dashboard: Arc::new(SubgraphService::new(
                format!("http://127.0.0.1:{}", local_addr.port()),
                config.request_timeout,
            )),
        };

        let app = build_router(state);

        tracing::info!("Dashboard server started at http://{}", local_addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
            local_addr,
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Dashboard server stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;

    Router::new()
        // Relay
        .route("/api/subgraph", post(handlers::subgraph::handle_subgraph))
        .route("/api/messari", post(handlers::subgraph::handle_messari))
        .route("/api/stats", get(stats_handler))
        // Dashboard
        .route("/", get(pages::handle_home))
        .route("/pool", get(pages::handle_pool))
        .route("/factories", get(pages::handle_factories))
        .route("/healthz", get(health_check_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(
                    crate::proxy::middleware::logging_middleware,
                ))
                .layer(crate::proxy::middleware::cors_layer()),
        )
        .with_state(state)
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}

/// Relay counters per endpoint
async fn stats_handler(State(state): State<AppState>) -> Response {
    Json(state.stats.snapshot()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_and_shutdown() {
        let config = ProxyConfig {
            port: 0,
            ..ProxyConfig::default()
        };
        let (server, handle) = AxumServer::start(&config).await.unwrap();
        let addr = server.local_addr();
        assert!(addr.ip().is_loopback());

        let body: serde_json::Value = reqwest::get(format!("http://{}/healthz", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");

        server.stop();
        handle.await.unwrap();
    }
}
