//! HTTP client for the Equinix Metal API
//!
//! Thin `reqwest` wrapper covering the three endpoints the tool consumes:
//! device listing, usage listing, and device deletion. Every request carries
//! the `X-Auth-Token` header and a finite timeout; a stalled endpoint fails
//! the request instead of hanging the run.
//!
//! Listing calls return `Result` because a failed listing is actionable by
//! the caller (the project run ends, cost degrades to zero). `delete_device`
//! returns a `DeleteOutcome` value instead: a failed delete is one device's
//! result to report, and must never abort the sweep of the remaining
//! devices.

use crate::config::Config;
use crate::error::{ConfigError, MetalctlError, Result};
use crate::types::{DeleteOutcome, Device, UsageRecord};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Deserialize)]
struct DevicesResponse {
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
struct UsagesResponse {
    usages: Vec<UsageRecord>,
}

/// Authenticated client for one Metal API endpoint.
pub struct MetalClient {
    http: Client,
    base_url: String,
}

impl MetalClient {
    pub fn new(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut auth = HeaderValue::from_str(token).map_err(|_| {
            MetalctlError::Config(ConfigError::InvalidValue {
                field: "api.token".to_string(),
                reason: "token is not a valid header value".to_string(),
            })
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MetalctlError::transport("client setup", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from config plus an optional token override
    /// (`--token` / `METAL_AUTH_TOKEN`).
    pub fn from_config(config: &Config, token_override: Option<&str>) -> Result<Self> {
        let token = config.resolve_token(token_override)?;
        Self::new(&token, &config.api.base_url, config.request_timeout())
    }

    /// List all devices in a project.
    pub async fn list_devices(&self, project_id: &str) -> Result<Vec<Device>> {
        let operation = "list devices";
        let url = format!("{}/projects/{}/devices", self.base_url, project_id);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MetalctlError::transport(operation, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(MetalctlError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let payload: DevicesResponse = response
            .json()
            .await
            .map_err(|e| MetalctlError::transport(operation, e))?;
        Ok(payload.devices)
    }

    /// List all usage records in a project.
    pub async fn list_usages(&self, project_id: &str) -> Result<Vec<UsageRecord>> {
        let operation = "list usages";
        let url = format!("{}/projects/{}/usages", self.base_url, project_id);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MetalctlError::transport(operation, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(MetalctlError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let payload: UsagesResponse = response
            .json()
            .await
            .map_err(|e| MetalctlError::transport(operation, e))?;
        Ok(payload.usages)
    }

    /// Delete a device by ID. Irreversible at the provider.
    ///
    /// 204 -> Deleted, 404 -> NotFound, anything else (including transport
    /// faults) -> Failed with a description.
    pub async fn delete_device(&self, device_id: &str) -> DeleteOutcome {
        let url = format!("{}/devices/{}", self.base_url, device_id);
        debug!("DELETE {}", url);

        let response = match self.http.delete(&url).send().await {
            Ok(r) => r,
            Err(e) => return DeleteOutcome::Failed(e.to_string()),
        };

        match response.status() {
            StatusCode::NO_CONTENT => DeleteOutcome::Deleted,
            StatusCode::NOT_FOUND => DeleteOutcome::NotFound,
            status => {
                let body = response.text().await.unwrap_or_default();
                DeleteOutcome::Failed(format!("HTTP {} - {}", status.as_u16(), body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = MetalClient::new(
            "token",
            "https://api.example.com/metal/v1/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.example.com/metal/v1");
    }

    #[test]
    fn test_invalid_token_is_config_error() {
        let result = MetalClient::new("bad\ntoken", "https://api.example.com", Duration::from_secs(5));
        assert!(matches!(
            result,
            Err(MetalctlError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
