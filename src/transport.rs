//! Thin HTTP transport over the Atlan REST API
//!
//! One pooled `reqwest` client per [`crate::AtlanClient`], with bearer
//! authentication installed as a default header. Non-2xx responses are
//! classified into the [`AtlanError`] taxonomy; bodies of 2xx responses
//! are deserialized into the caller's type.

use std::time::Duration;

use reqwest::{header, Client as ReqwestClient, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::AtlanConfig;
use crate::error::AtlanError;

/// HTTP transport shared by all of a client's namespace caches
#[derive(Debug)]
pub struct ApiTransport {
    http_client: ReqwestClient,
    base_url: String,
}

impl ApiTransport {
    /// Build a transport from a validated configuration
    pub fn new(config: &AtlanConfig) -> Result<Self, AtlanError> {
        // Scrub the token from logs
        let api_key_scrubbed = if config.api_key.len() > 8 {
            format!("{}...[REDACTED]", &config.api_key[..8])
        } else {
            "[REDACTED]".to_string()
        };

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "Initializing Atlan API transport"
        );

        let mut auth_value =
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
                AtlanError::InvalidRequest(format!("API key is not a valid header value: {e}"))
            })?;
        auth_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(AtlanError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` with the given query pairs and deserialize the JSON body
    #[instrument(skip(self, query))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AtlanError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Check the status and deserialize, or classify the failure
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, AtlanError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("API error ({}): {}", status, body);
            return Err(AtlanError::from_status(status, body));
        }

        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> AtlanConfig {
        AtlanConfig {
            base_url: base_url.to_string(),
            api_key: "test-token".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_transport_creation() {
        let transport = ApiTransport::new(&config("https://tenant.atlan.com"));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport = ApiTransport::new(&config("https://tenant.atlan.com/")).unwrap();
        assert_eq!(transport.base_url, "https://tenant.atlan.com");
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        let cfg = AtlanConfig {
            api_key: "bad\nkey".to_string(),
            ..config("https://tenant.atlan.com")
        };
        let err = ApiTransport::new(&cfg).unwrap_err();
        assert!(matches!(err, AtlanError::InvalidRequest(_)));
    }
}
