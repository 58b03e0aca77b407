//! Dashboard components.
//!
//! Each component owns one fetch at a time: `refresh` drops whatever the
//! previous fetch left behind, goes back to `Loading`, then settles in
//! `Loaded` or `Failed`. Rendering is plain HTML fragments.

use crate::dashboard::format::{
    format_number, format_token_balance, format_usd, resolve_decimals, shorten_address,
};
use crate::dashboard::SubgraphService;
use crate::error::AppResult;
use crate::models::{FactoriesData, PoolSnapshot};

/// Component lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    fn settle(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

/// Minimal HTML escaping for text and attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn retry_link(target: &str, label: &str) -> String {
    format!(r#"<a class="button" href="{}">{}</a>"#, target, label)
}

pub struct PoolDashboard {
    state: ViewState<Option<PoolSnapshot>>,
    fetches: u32,
}

impl PoolDashboard {
    pub const ROUTE: &'static str = "/pool";

    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            fetches: 0,
        }
    }

    pub fn state(&self) -> &ViewState<Option<PoolSnapshot>> {
        &self.state
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetches
    }

    /// Mount and retry both land here
    pub async fn refresh(&mut self, service: &SubgraphService) {
        self.state = ViewState::Loading;
        self.fetches += 1;
        let result = service.get_pool_data().await;
        if let Err(e) = &result {
            tracing::warn!("Pool data fetch #{} failed: {}", self.fetches, e);
        }
        self.state = ViewState::settle(result);
    }

    pub fn render(&self) -> String {
        match &self.state {
            ViewState::Loading => r#"<section class="card loading"><h2>Loading Pool Data...</h2></section>"#
                .to_string(),
            ViewState::Failed(err) => format!(
                r#"<section class="card error"><h2>Error Loading Pool Data</h2><p>{}</p>{}</section>"#,
                escape_html(err),
                retry_link(Self::ROUTE, "Retry")
            ),
            ViewState::Loaded(None) => format!(
                r#"<section class="card warning"><h2>No Pool Data Available</h2><p>Unable to load pool information at this time.</p>{}</section>"#,
                retry_link(Self::ROUTE, "Retry")
            ),
            ViewState::Loaded(Some(pool)) => Self::render_pool(pool),
        }
    }

    fn render_pool(pool: &PoolSnapshot) -> String {
        let mut balances = String::new();
        for index in 0..2 {
            let token = pool.token(index);
            let label = token
                .and_then(|t| t.symbol.as_deref())
                .map(escape_html)
                .unwrap_or_else(|| format!("Token {}", index));
            let decimals = resolve_decimals(token.and_then(|t| t.decimals), index);
            balances.push_str(&format!(
                r#"<div class="metric"><h4>{} Balance</h4><p class="mono">{}</p></div>"#,
                label,
                format_token_balance(pool.balance(index), decimals, index)
            ));
        }

        let tvl = pool
            .total_value_locked_usd
            .as_deref()
            .map(format_usd)
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            concat!(
                r#"<section class="card pool">"#,
                r#"<header><h2>{name}</h2><p>{symbol}</p><p class="mono">ID: {short_id}</p></header>"#,
                r#"<div class="grid">"#,
                r#"<div class="metric"><h3>Cumulative Swaps</h3><p>{swaps}</p></div>"#,
                r#"<div class="metric"><h3>Total Value Locked</h3><p>{tvl}</p></div>"#,
                r#"<div class="metric"><h3>Pool ID</h3><p class="mono">{id}</p></div>"#,
                r#"</div>"#,
                r#"<h3>Token Balances</h3><div class="grid">{balances}</div>"#,
                r#"<footer>{refresh}</footer>"#,
                r#"</section>"#
            ),
            name = escape_html(pool.name.as_deref().unwrap_or("Uniswap Pool")),
            symbol = escape_html(pool.symbol.as_deref().unwrap_or("N/A")),
            short_id = escape_html(&shorten_address(&pool.id)),
            swaps = format_number(&pool.swap_count()),
            tvl = tvl,
            id = escape_html(&pool.id),
            balances = balances,
            refresh = retry_link(Self::ROUTE, "Refresh Data"),
        )
    }
}

impl Default for PoolDashboard {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Factories {
    state: ViewState<Option<FactoriesData>>,
    fetches: u32,
}

impl Factories {
    pub const ROUTE: &'static str = "/factories";

    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            fetches: 0,
        }
    }

    pub fn state(&self) -> &ViewState<Option<FactoriesData>> {
        &self.state
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetches
    }

    pub async fn refresh(&mut self, service: &SubgraphService) {
        self.state = ViewState::Loading;
        self.fetches += 1;
        let result = service.get_factories().await;
        if let Err(e) = &result {
            tracing::warn!("Factories fetch #{} failed: {}", self.fetches, e);
        }
        self.state = ViewState::settle(result);
    }

    pub fn render(&self) -> String {
        match &self.state {
            ViewState::Loading => {
                r#"<section class="card"><h1>Factories</h1><p>Loading...</p></section>"#.to_string()
            }
            ViewState::Failed(err) => format!(
                r#"<section class="card error"><h1>Factories</h1><p>Error: {}</p>{}</section>"#,
                escape_html(err),
                retry_link(Self::ROUTE, "Retry")
            ),
            ViewState::Loaded(None) => r#"<section class="card"><h1>Factories</h1></section>"#.to_string(),
            ViewState::Loaded(Some(data)) => Self::render_data(data),
        }
    }

    fn render_data(data: &FactoriesData) -> String {
        let factory_rows: String = data
            .factories
            .iter()
            .map(|f| {
                format!(
                    "<tr><td class=\"mono\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&shorten_address(&f.id)),
                    format_number(&f.pool_count),
                    format_number(&f.tx_count),
                    format_usd(&f.total_volume_usd)
                )
            })
            .collect();

        let bundle_rows: String = data
            .bundles
            .iter()
            .map(|b| {
                format!(
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&b.id),
                    format_usd(&b.eth_price_usd)
                )
            })
            .collect();

        let raw = serde_json::to_string_pretty(data).unwrap_or_default();

        format!(
            concat!(
                r#"<section class="card"><h1>Factories</h1>"#,
                "<table><thead><tr><th>Factory</th><th>Pools</th><th>Transactions</th><th>Volume (USD)</th></tr></thead>",
                "<tbody>{}</tbody></table>",
                "<h3>Bundles</h3>",
                "<table><thead><tr><th>Bundle</th><th>ETH Price (USD)</th></tr></thead>",
                "<tbody>{}</tbody></table>",
                "<pre>{}</pre>",
                "</section>"
            ),
            factory_rows,
            bundle_rows,
            escape_html(&raw)
        )
    }
}

impl Default for Factories {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::client::tests::spawn_relay;
    use crate::error::AppError;
    use axum::http::StatusCode;
    use serde_json::json;

    fn pool_reply(name: &str) -> serde_json::Value {
        json!({"data": {"liquidityPool": {
            "id": "0x357596DD7a0EF5CB703C5AAe4dA01EDFf176aE95",
            "name": name,
            "symbol": "WETH/USDC",
            "totalValueLockedUSD": "1234567.891",
            "inputTokenBalances": ["1000000000000000000000", "500000000"],
            "cumulativeSwapCount": 4821
        }}})
    }

    #[test]
    fn test_settle() {
        let ok: ViewState<u8> = ViewState::settle(Ok(1));
        assert_eq!(ok, ViewState::Loaded(1));
        let failed: ViewState<u8> =
            ViewState::settle(Err(AppError::Upstream("503 Service Unavailable".into())));
        assert_eq!(failed, ViewState::Failed("503 Service Unavailable".into()));
    }

    #[test]
    fn test_new_components_render_loading() {
        assert!(PoolDashboard::new().render().contains("Loading Pool Data..."));
        assert!(Factories::new().render().contains("Loading..."));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">&'"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;"
        );
    }

    #[tokio::test]
    async fn test_pool_dashboard_renders_formatted_fields() {
        let (base, _) = spawn_relay(vec![(StatusCode::OK, pool_reply("WETH <> USDC"))]).await;
        let service = SubgraphService::new(&base, 5);

        let mut view = PoolDashboard::new();
        view.refresh(&service).await;
        let html = view.render();

        assert!(html.contains("WETH &lt;&gt; USDC"));
        assert!(html.contains("ID: 0x3575...aE95"));
        assert!(html.contains("<p>4.82K</p>"));
        assert!(html.contains("$1,234,567.89"));
        assert!(html.contains(">1,000<"));
        assert!(html.contains(">500.00<"));
    }

    #[tokio::test]
    async fn test_pool_dashboard_uses_reported_decimals() {
        let (base, _) = spawn_relay(vec![(
            StatusCode::OK,
            json!({"data": {"liquidityPool": {
                "id": "0xpool",
                "inputTokens": [
                    {"id": "0xa", "symbol": "USDC", "decimals": 6},
                    {"id": "0xb", "symbol": "WETH", "decimals": 18}
                ],
                "inputTokenBalances": ["2500000000", "1500000000000000000"]
            }}}),
        )])
        .await;
        let service = SubgraphService::new(&base, 5);

        let mut view = PoolDashboard::new();
        view.refresh(&service).await;
        let html = view.render();

        assert!(html.contains("<h4>USDC Balance</h4><p class=\"mono\">2,500</p>"));
        assert!(html.contains("<h4>WETH Balance</h4><p class=\"mono\">1.50</p>"));
        assert!(html.contains("Uniswap Pool"));
    }

    #[tokio::test]
    async fn test_absurd_reported_decimals_use_fallback() {
        let (base, _) = spawn_relay(vec![(
            StatusCode::OK,
            json!({"data": {"liquidityPool": {
                "id": "0xpool",
                "inputTokens": [
                    {"id": "0xa", "symbol": "AAA", "decimals": 4294967295u64},
                    {"id": "0xb", "symbol": "BBB", "decimals": 300}
                ],
                "inputTokenBalances": ["1000000000000000000000", "500000000"]
            }}}),
        )])
        .await;
        let service = SubgraphService::new(&base, 5);

        let mut view = PoolDashboard::new();
        view.refresh(&service).await;
        let html = view.render();

        assert!(html.contains("<h4>AAA Balance</h4><p class=\"mono\">1,000</p>"));
        assert!(html.contains("<h4>BBB Balance</h4><p class=\"mono\">500.00</p>"));
    }

    #[tokio::test]
    async fn test_retry_fetches_again_without_stale_data() {
        let (base, seen) = spawn_relay(vec![
            (StatusCode::OK, pool_reply("First Pool")),
            (StatusCode::BAD_GATEWAY, json!({"error": "down"})),
            (StatusCode::OK, pool_reply("Second Pool")),
        ])
        .await;
        let service = SubgraphService::new(&base, 5);
        let mut view = PoolDashboard::new();

        view.refresh(&service).await;
        assert!(view.render().contains("First Pool"));

        view.refresh(&service).await;
        assert_eq!(view.state(), &ViewState::Failed("502 Bad Gateway".to_string()));
        let html = view.render();
        assert!(html.contains("Error Loading Pool Data"));
        assert!(html.contains(r#"href="/pool""#));
        assert!(!html.contains("First Pool"));

        view.refresh(&service).await;
        let html = view.render();
        assert!(html.contains("Second Pool"));
        assert!(!html.contains("First Pool"));

        assert_eq!(view.fetch_count(), 3);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_pool_dashboard_empty_result() {
        let (base, _) =
            spawn_relay(vec![(StatusCode::OK, json!({"data": {"liquidityPool": null}}))]).await;
        let service = SubgraphService::new(&base, 5);
        let mut view = PoolDashboard::new();
        view.refresh(&service).await;
        assert!(view.render().contains("No Pool Data Available"));
    }

    #[tokio::test]
    async fn test_factories_render_prices_and_raw_json() {
        let (base, _) = spawn_relay(vec![(
            StatusCode::OK,
            json!({"data": {
                "factories": [{"id": "0x1F98431c8aD98523631AE4a59f267346ea31F984", "poolCount": "1234", "txCount": "9876543", "totalVolumeUSD": "1500000000.5"}],
                "bundles": [{"id": "1", "ethPriceUSD": "3500.456"}]
            }}),
        )])
        .await;
        let service = SubgraphService::new(&base, 5);
        let mut view = Factories::new();
        view.refresh(&service).await;
        let html = view.render();

        assert!(html.contains("<td>$3,500.46</td>"));
        assert!(html.contains("<td>1.23K</td>"));
        assert!(html.contains("<td>9.88M</td>"));
        assert!(html.contains("$1,500,000,000.50"));
        assert!(html.contains("0x1F98...F984"));
        assert!(html.contains("&quot;ethPriceUSD&quot;: &quot;3500.456&quot;"));
    }

    #[tokio::test]
    async fn test_factories_retry_clears_error_panel() {
        let (base, seen) = spawn_relay(vec![
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Failed to fetch subgraph data"}),
            ),
            (
                StatusCode::OK,
                json!({"data": {
                    "factories": [],
                    "bundles": [{"id": "1", "ethPriceUSD": "3500.456"}]
                }}),
            ),
        ])
        .await;
        let service = SubgraphService::new(&base, 5);
        let mut view = Factories::new();

        view.refresh(&service).await;
        assert!(matches!(view.state(), ViewState::Failed(_)));
        assert!(view.render().contains(r#"href="/factories""#));

        view.refresh(&service).await;
        let html = view.render();
        assert!(html.contains("<td>$3,500.46</td>"));
        assert!(!html.contains("Error:"));
        assert!(!html.contains("Retry"));

        assert_eq!(view.fetch_count(), 2);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_factories_error_panel() {
        let (base, _) = spawn_relay(vec![(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Failed to fetch subgraph data"}),
        )])
        .await;
        let service = SubgraphService::new(&base, 5);
        let mut view = Factories::new();
        view.refresh(&service).await;
        assert!(view
            .render()
            .contains("Error: 500 Internal Server Error"));
    }
}
