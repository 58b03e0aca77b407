// Upstream client
// Posts GraphQL envelopes to the gateway with the bearer token attached

use reqwest::{header, Client, Response};
use serde::Serialize;

use crate::error::AppResult;
use crate::proxy::config::UpstreamProxyConfig;

pub struct UpstreamClient {
    http_client: Client,
}

impl UpstreamClient {
    pub fn new(timeout_secs: u64, proxy_config: Option<UpstreamProxyConfig>) -> Self {
        Self {
            http_client: crate::utils::http::create_client_with_proxy(timeout_secs, proxy_config),
        }
    }

    fn build_headers(api_key: &str) -> AppResult<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                crate::error::AppError::Config(format!("Invalid API key header: {}", e))
            })?,
        );
        Ok(headers)
    }

    /// Forward a query envelope to `url` unchanged
    pub async fn post_query<T: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        envelope: &T,
    ) -> AppResult<Response> {
        let response = self
            .http_client
            .post(url)
            .headers(Self::build_headers(api_key)?)
            .json(envelope)
            .send()
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_headers() {
        let headers = UpstreamClient::build_headers("abc123").unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_build_headers_rejects_newline() {
        assert!(UpstreamClient::build_headers("bad\nkey").is_err());
    }
}
