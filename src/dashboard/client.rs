// Dashboard data access through the relay routes
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::{FactoriesData, GraphQlResponse, PoolData, PoolSnapshot, QueryEnvelope};

pub const POOL_QUERY: &str = r#"
  {
    liquidityPool(id: "0x357596DD7a0EF5CB703C5AAe4dA01EDFf176aE95") {
      name
      inputTokenBalances
      inputTokens {
        id
        symbol
        decimals
      }
      symbol
      totalValueLockedUSD
      id
      cumulativeSwapCount
    }
  }
"#;

pub const FACTORIES_QUERY: &str = r#"
  {
    factories(first: 5) {
      id
      poolCount
      txCount
      totalVolumeUSD
    }
    bundles(first: 5) {
      id
      ethPriceUSD
    }
  }
"#;

const MESSARI_ROUTE: &str = "/api/messari";
const SUBGRAPH_ROUTE: &str = "/api/subgraph";

/// Sends the dashboard's fixed queries to a relay server
pub struct SubgraphService {
    http_client: Client,
    base_url: String,
}

impl SubgraphService {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            http_client: crate::utils::http::create_client_with_proxy(timeout_secs, None),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Pool snapshot, `None` when the subgraph has no such pool
    pub async fn get_pool_data(&self) -> AppResult<Option<PoolSnapshot>> {
        let data: Option<PoolData> = self
            .query(MESSARI_ROUTE, &QueryEnvelope::new(POOL_QUERY))
            .await?;
        Ok(data.and_then(|d| d.liquidity_pool))
    }

    pub async fn get_factories(&self) -> AppResult<Option<FactoriesData>> {
        let envelope = QueryEnvelope::new(FACTORIES_QUERY)
            .with_variables(json!({}))
            .with_operation_name("Subgraphs");
        self.query(SUBGRAPH_ROUTE, &envelope).await
    }

    /// POST one envelope and return its `data` field
    async fn query<T: DeserializeOwned>(
        &self,
        route: &str,
        envelope: &QueryEnvelope,
    ) -> AppResult<Option<T>> {
        let url = format!("{}{}", self.base_url, route);
        let response = self.http_client.post(&url).json(envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()));
        }

        let body: GraphQlResponse<T> = response.json().await?;
        match (body.data, body.errors.into_iter().next()) {
            (None, Some(first)) => Err(AppError::GraphQl(first.message)),
            (data, _) => Ok(data),
        }
    }
}
