// Subgraph relay handlers
use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::proxy::server::AppState;

/// Largest request body the relay buffers
pub const MAX_RELAY_BODY: usize = 1024 * 1024;

/// Upstream gateway a relay route forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubgraphTarget {
    Uniswap,
    Messari,
}

impl SubgraphTarget {
    pub fn label(self) -> &'static str {
        match self {
            SubgraphTarget::Uniswap => "subgraph",
            SubgraphTarget::Messari => "messari",
        }
    }

    /// Generic message returned to callers, causes stay in the log
    pub fn failure_message(self) -> &'static str {
        match self {
            SubgraphTarget::Uniswap => "Failed to fetch subgraph data",
            SubgraphTarget::Messari => "Failed to fetch Messari subgraph data",
        }
    }

    fn url(self, state: &AppState) -> &str {
        match self {
            SubgraphTarget::Uniswap => &state.config.subgraph_url,
            SubgraphTarget::Messari => &state.config.messari_url,
        }
    }
}

/// POST /api/subgraph
pub async fn handle_subgraph(State(state): State<AppState>, body: Body) -> Response {
    relay(&state, SubgraphTarget::Uniswap, body).await
}

/// POST /api/messari
pub async fn handle_messari(State(state): State<AppState>, body: Body) -> Response {
    relay(&state, SubgraphTarget::Messari, body).await
}

async fn relay(state: &AppState, target: SubgraphTarget, body: Body) -> Response {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let started = Instant::now();

    match forward(state, target, body).await {
        Ok((status, payload)) => {
            info!(
                "[{}] {} relay -> {} in {}ms",
                request_id,
                target.label(),
                status.as_u16(),
                started.elapsed().as_millis()
            );
            state.stats.record(target.label(), status.is_success());
            (status, Json(payload)).into_response()
        }
        Err(e) => {
            error!("[{}] Error fetching {} data: {}", request_id, target.label(), e);
            state.stats.record(target.label(), false);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": target.failure_message() })),
            )
                .into_response()
        }
    }
}

async fn forward(
    state: &AppState,
    target: SubgraphTarget,
    body: Body,
) -> AppResult<(StatusCode, Value)> {
    let envelope = read_envelope(body).await?;
    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("GRAPH_API_KEY is not set".to_string()))?;

    let response = state
        .upstream
        .post_query(target.url(state), api_key, &envelope)
        .await?;

    let status = response.status();
    let payload: Value = response.json().await?;
    Ok((status, payload))
}

/// Buffer and parse the caller's body. Only `query` is checked, every
/// other key is forwarded as sent.
async fn read_envelope(body: Body) -> AppResult<Value> {
    let bytes = axum::body::to_bytes(body, MAX_RELAY_BODY)
        .await
        .map_err(|e| AppError::InvalidRequest(format!("unreadable body: {}", e)))?;
    let envelope: Value = serde_json::from_slice(&bytes)?;
    if !envelope.get("query").is_some_and(Value::is_string) {
        return Err(AppError::InvalidRequest("missing string `query`".to_string()));
    }
    Ok(envelope)
}
