// SPDX-License-Identifier: PMPL-1.0-or-later
//! Atlan client configuration, authentication, and HTTP transport layer.
//!
//! [`AtlanClient`] is the entry point for every SDK operation. It owns the
//! base URL, HTTP client, credentials and retry policy. Endpoint methods
//! (entities, search) are defined as `impl AtlanClient` blocks in their own
//! modules.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{AtlanError, ErrorResponse, Result};
use crate::search::FluentSearch;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Authentication method for a tenant.
#[derive(Clone)]
pub enum Auth {
    /// No credentials (local mocks, trusted proxies).
    None,
    /// API token sent as `Authorization: Bearer <token>`.
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// AtlanClient
// ---------------------------------------------------------------------------

/// Client for one Atlan tenant.
///
/// # Examples
///
/// ```rust,no_run
/// use atlan_client::AtlanClient;
///
/// # #[tokio::main]
/// # async fn main() -> atlan_client::Result<()> {
/// let client = AtlanClient::from_env()?;
/// let entity = client
///     .get_entity_by_guid("8b5e5c3a-1f0e-4d2b-9a57-2f0d6c1e9b44", true, true)
///     .await?;
/// println!("{}", entity.type_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AtlanClient {
    base_url: Url,
    http: reqwest::Client,
    auth: Auth,
    config: ClientConfig,
}

impl AtlanClient {
    // -- Constructors -------------------------------------------------------

    /// Unauthenticated client pointing at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AtlanError::Validation`] if `base_url` cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Client that authenticates with an API token.
    pub fn with_bearer(base_url: &str, token: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url).with_token(token))
    }

    /// Client configured from `ATLAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AtlanError::Validation(format!("Invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AtlanError::Validation(format!(
                "Invalid base URL: {} cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(AtlanError::Network)?;

        let auth = match &config.api_token {
            Some(token) => Auth::Bearer(token.clone()),
            None => Auth::None,
        };

        Ok(Self {
            base_url,
            http,
            auth,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a search using the client's default page size.
    pub fn search(&self) -> FluentSearch<'_> {
        FluentSearch::new(self).page_size(self.config.page_size)
    }

    // -- Internal HTTP helpers ----------------------------------------------

    /// Full URL for `segments` under the base URL. Each segment is
    /// percent-encoded on its own, so names containing `/` stay intact.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AtlanError::Validation("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach authentication headers to an outgoing request builder.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::None => builder,
            Auth::Bearer(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        }
    }

    /// Send a request, retrying throttled, unavailable and unreachable
    /// attempts with exponential backoff.
    #[instrument(skip(self, query, body), fields(path = %url.path()))]
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            let mut builder = self.http.request(method.clone(), url.clone()).query(query);
            if let Some(body) = body {
                builder = builder.json(body);
            }
            debug!(%method, attempt, "sending request");

            let retry_in = match self.apply_auth(builder).send().await {
                Ok(response) if attempt < self.config.max_retries && is_retryable(response.status()) => {
                    let delay = self.config.backoff(attempt);
                    warn!(status = response.status().as_u16(), attempt, ?delay, "retrying request");
                    delay
                }
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.config.max_retries && (e.is_connect() || e.is_timeout()) => {
                    let delay = self.config.backoff(attempt);
                    warn!(error = %e, attempt, ?delay, "retrying request");
                    delay
                }
                Err(e) => return Err(AtlanError::Network(e)),
            };
            tokio::time::sleep(retry_in).await;
            attempt += 1;
        }
    }

    /// Perform a GET request and deserialize the JSON response body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let response = self.send::<()>(Method::GET, url, query, None).await?;
        handle_response(response).await
    }

    /// Perform a POST request with a JSON body and deserialize the response.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, url, query, Some(body)).await?;
        handle_response(response).await
    }

    /// POST whose response carries no body worth reading.
    pub(crate) async fn post_empty<B: Serialize + ?Sized>(
        &self,
        url: Url,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<()> {
        let response = self.send(Method::POST, url, query, Some(body)).await?;
        expect_success(response).await
    }

    /// Perform a DELETE request and deserialize the response.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let response = self.send::<()>(Method::DELETE, url, query, None).await?;
        handle_response(response).await
    }

    /// DELETE whose response carries no body worth reading.
    pub(crate) async fn delete_empty(&self, url: Url, query: &[(&str, String)]) -> Result<()> {
        let response = self.send::<()>(Method::DELETE, url, query, None).await?;
        expect_success(response).await
    }
}

// -- Response handling ------------------------------------------------------

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Deserialize a successful response or extract an error from the body.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status().is_success() {
        let body = response.text().await.map_err(AtlanError::Network)?;
        serde_json::from_str(&body).map_err(AtlanError::Serialization)
    } else {
        Err(extract_error(response).await)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(extract_error(response).await)
    }
}

/// Turn a non-2xx response into the appropriate [`AtlanError`] variant.
async fn extract_error(response: reqwest::Response) -> AtlanError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.describe(status),
        Err(_) => format!("HTTP {status}"),
    };
    debug!(status, %message, "request failed");
    AtlanError::from_status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = AtlanClient::new("https://tenant.atlan.com").unwrap();
        let url = client
            .endpoint(&["api", "meta", "entity", "classification", "PII / Sensitive"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://tenant.atlan.com/api/meta/entity/classification/PII%20%2F%20Sensitive"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = AtlanClient::new("http://localhost:8080/proxy/").unwrap();
        let url = client.endpoint(&["api", "meta", "search", "indexsearch"]).unwrap();
        assert_eq!(url.path(), "/proxy/api/meta/search/indexsearch");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(AtlanClient::new("not a url"), Err(AtlanError::Validation(_))));
        assert!(matches!(AtlanClient::new("mailto:ops@example.com"), Err(AtlanError::Validation(_))));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::CONFLICT));
    }

    #[test]
    fn test_bearer_is_redacted() {
        let client = AtlanClient::with_bearer("https://tenant.atlan.com", "secret").unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }
}
