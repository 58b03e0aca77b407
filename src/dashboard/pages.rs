// Dashboard page handlers
use axum::{extract::State, response::Html};

use crate::dashboard::view::{Factories, PoolDashboard};
use crate::proxy::server::AppState;

const STYLE: &str = "body{font-family:sans-serif;max-width:56rem;margin:2rem auto;padding:0 1rem}\
.card{border:1px solid #ddd;border-radius:8px;padding:1rem 1.5rem;margin:1rem 0}\
.error{border-left:4px solid #c00}.warning{border-left:4px solid #c90}\
.grid{display:grid;grid-template-columns:1fr 1fr;gap:1rem}\
.mono{font-family:monospace;word-break:break-all}\
table{border-collapse:collapse;width:100%}td,th{text-align:left;padding:.25rem .5rem}\
.button{display:inline-block;margin-top:1rem}";

fn layout(body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>Uniswap Dashboard</title><style>{}</style></head><body>\
<h1>Uniswap Dashboard</h1><p>Welcome to your Uniswap analytics dashboard</p>{}\
<footer><small>Rendered {}</small></footer></body></html>",
        STYLE,
        body,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ))
}

/// GET / - both components, each fetching on its own
pub async fn handle_home(State(state): State<AppState>) -> Html<String> {
    let mut pool = PoolDashboard::new();
    let mut factories = Factories::new();
    tokio::join!(
        pool.refresh(&state.dashboard),
        factories.refresh(&state.dashboard)
    );
    layout(&format!("{}{}", pool.render(), factories.render()))
}

/// GET /pool
pub async fn handle_pool(State(state): State<AppState>) -> Html<String> {
    let mut pool = PoolDashboard::new();
    pool.refresh(&state.dashboard).await;
    layout(&pool.render())
}

/// GET /factories
pub async fn handle_factories(State(state): State<AppState>) -> Html<String> {
    let mut factories = Factories::new();
    factories.refresh(&state.dashboard).await;
    layout(&factories.render())
}
