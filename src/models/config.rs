use crate::proxy::ProxyConfig;
use serde::{Deserialize, Serialize};

/// Contents of `config.json` in the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Default tracing filter, `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Also write a rolling log file under the data directory
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxy: ProxyConfig::default(),
            log_level: default_log_level(),
            log_to_file: default_log_to_file(),
        }
    }
}
