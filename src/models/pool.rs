use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `data` payload of the pool query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolData {
    #[serde(rename = "liquidityPool")]
    pub liquidity_pool: Option<PoolSnapshot>,
}

/// Messari liquidity pool, display-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: Option<String>,
    #[serde(rename = "inputTokens", default)]
    pub input_tokens: Vec<TokenInfo>,
    #[serde(rename = "inputTokenBalances", default)]
    pub input_token_balances: Vec<String>,
    /// Int on Messari schemas, BigInt (string) on some forks
    #[serde(rename = "cumulativeSwapCount")]
    pub cumulative_swap_count: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: String,
    pub symbol: Option<String>,
    /// Unbounded here, range-checked when formatting
    pub decimals: Option<u64>,
}

impl PoolSnapshot {
    /// Raw balance of the i-th input token, "0" when missing
    pub fn balance(&self, index: usize) -> &str {
        self.input_token_balances
            .get(index)
            .map(String::as_str)
            .filter(|b| !b.is_empty())
            .unwrap_or("0")
    }

    pub fn token(&self, index: usize) -> Option<&TokenInfo> {
        self.input_tokens.get(index)
    }

    pub fn swap_count(&self) -> String {
        match &self.cumulative_swap_count {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        }
    }
}

/// `data` payload of the factories query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoriesData {
    #[serde(default)]
    pub factories: Vec<Factory>,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: String,
    #[serde(rename = "poolCount")]
    pub pool_count: String,
    #[serde(rename = "txCount")]
    pub tx_count: String,
    #[serde(rename = "totalVolumeUSD")]
    pub total_volume_usd: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    #[serde(rename = "ethPriceUSD")]
    pub eth_price_usd: String,
}
