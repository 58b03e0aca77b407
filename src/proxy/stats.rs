use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relay counters for one upstream endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProxyStats {
    pub total_requests: u64,
    pub success_count: u64,
    pub error_count: u64,
}

/// Per-endpoint relay counters, process lifetime only
#[derive(Default)]
pub struct RelayStats {
    endpoints: DashMap<&'static str, ProxyStats>,
}

impl RelayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, endpoint: &'static str, success: bool) {
        let mut entry = self.endpoints.entry(endpoint).or_default();
        entry.total_requests += 1;
        if success {
            entry.success_count += 1;
        } else {
            entry.error_count += 1;
        }
    }

    pub fn get(&self, endpoint: &str) -> ProxyStats {
        self.endpoints
            .get(endpoint)
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Sorted copy for JSON output
    pub fn snapshot(&self) -> BTreeMap<String, ProxyStats> {
        self.endpoints
            .iter()
            .map(|e| (e.key().to_string(), e.value().clone()))
            .collect()
    }
}
