use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://gateway.thegraph.com/api/subgraphs/id/5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV";
pub const DEFAULT_MESSARI_URL: &str =
    "https://gateway.thegraph.com/api/subgraphs/id/8cLf29KxAedWLVaEqjV8qKomdwwXQxjptBZFrqWNH5u2";

/// Relay service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Allow LAN access
    /// - false: bind 127.0.0.1 only (default)
    /// - true: bind 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Gateway bearer token. Never persisted, read from GRAPH_API_KEY.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Uniswap v3 subgraph endpoint
    #[serde(default = "default_subgraph_url")]
    pub subgraph_url: String,

    /// Messari subgraph endpoint
    #[serde(default = "default_messari_url")]
    pub messari_url: String,

    /// Outbound request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Outbound proxy
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,
}

/// Outbound proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    pub enabled: bool,
    /// http://, https:// or socks5://
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            port: default_port(),
            api_key: None,
            subgraph_url: default_subgraph_url(),
            messari_url: default_messari_url(),
            request_timeout: default_request_timeout(),
            upstream_proxy: UpstreamProxyConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_subgraph_url() -> String {
    DEFAULT_SUBGRAPH_URL.to_string()
}

fn default_messari_url() -> String {
    DEFAULT_MESSARI_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl ProxyConfig {
    /// Actual listen address
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    /// Check both endpoint URLs parse and use http(s)
    pub fn validate(&self) -> Result<(), String> {
        for (name, raw) in [("subgraph_url", &self.subgraph_url), ("messari_url", &self.messari_url)] {
            let parsed = url::Url::parse(raw).map_err(|e| format!("{} is invalid: {}", name, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(format!("{} must be http(s), got {}", name, parsed.scheme()));
            }
        }
        Ok(())
    }
}
