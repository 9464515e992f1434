//! Calendly HTTP client plumbing

use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::api;
use crate::error::{ConnectorError, Result};

use super::models::{ErrorResponse, PaginationVars};
use super::rate_limit::{extract_rate_limit, RateLimitDescription};

/// Calendly API client.
///
/// Thin typed wrapper over the REST surface. Safe to share across concurrent
/// in-flight requests; the underlying reqwest client is connection-pooled and
/// nothing here caches vendor responses.
pub struct Client {
    http: reqwest::Client,
    token: String,
    /// Custom base URL override (for testing with mock servers)
    base_url_override: Option<String>,
}

impl Client {
    /// Create a new Calendly client with optimized connection settings
    pub fn new(token: String) -> Self {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            token,
            base_url_override: None,
        }
    }

    /// Create a client with custom base URL (for testing with mock servers)
    #[cfg(test)]
    pub fn with_base_url(token: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            token,
            base_url_override: Some(base_url),
        }
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        match &self.base_url_override {
            Some(url) => url.clone(),
            None => api::BASE_URL.to_string(),
        }
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.http.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.http.post(url))
    }

    /// Create a DELETE request builder with standard headers
    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.http.delete(url))
    }

    /// Send a request and parse the JSON body, surfacing vendor errors.
    ///
    /// Any status >= 300 carries a `{title, message}` body; the message is
    /// surfaced verbatim inside the returned error, after `error_context`.
    pub(crate) async fn send_json<T>(
        &self,
        builder: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<(T, Option<RateLimitDescription>)>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let rate_limit = extract_rate_limit(response.headers());
        let status = response.status().as_u16();

        if status >= 300 {
            return Err(self.upstream_error(response, status, error_context).await);
        }

        Ok((response.json().await?, rate_limit))
    }

    /// Send a request where the response body is not parsed (POST/DELETE)
    pub(crate) async fn send_no_content(
        &self,
        builder: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<Option<RateLimitDescription>> {
        let response = builder.send().await?;
        let rate_limit = extract_rate_limit(response.headers());
        let status = response.status().as_u16();

        if status >= 300 {
            return Err(self.upstream_error(response, status, error_context).await);
        }

        Ok(rate_limit)
    }

    /// Build an `Upstream` error from a failed response, keeping the vendor message verbatim
    async fn upstream_error(
        &self,
        response: reqwest::Response,
        status: u16,
        error_context: &str,
    ) -> ConnectorError {
        let body: ErrorResponse = response.json().await.unwrap_or_default();
        debug!(
            "Calendly API error (status {}): title='{}' message='{}'",
            status, body.title, body.message
        );
        ConnectorError::Upstream {
            status,
            message: format!("{}: {}", error_context, body.message),
        }
    }
}

/// Append a query parameter to a URL that already has a query string
pub(super) fn append_query(url: &mut String, key: &str, value: &str) {
    url.push('&');
    url.push_str(key);
    url.push('=');
    url.push_str(&urlencoding::encode(value));
}

/// Append pagination parameters: `count` omitted when zero, `page_token` when empty
pub(super) fn append_pagination(url: &mut String, vars: Option<&PaginationVars>) {
    if let Some(vars) = vars {
        if vars.count > 0 {
            append_query(url, "count", &vars.count.to_string());
        }
        if !vars.next.is_empty() {
            append_query(url, "page_token", &vars.next);
        }
    }
}

#[cfg(test)]
impl Client {
    /// Create a test client with mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url("test-token".to_string(), base_url.to_string())
    }
}
