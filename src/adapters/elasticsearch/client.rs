//! Elasticsearch REST client
//!
//! Fetches index settings over HTTP with basic or API-key authentication and
//! retries transient failures with exponential backoff.

use super::models::{self, GetIndexResponse, IndexDocument, SettingsResponse};
use super::source::SettingsSource;
use crate::config::{ElasticsearchConfig, RetryConfig};
use crate::domain::{ElasticsearchError, EsIndexError, IndexName, Result, SettingsMap};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Elasticsearch REST client
///
/// # Example
///
/// ```no_run
/// use esindex::adapters::elasticsearch::{ElasticsearchClient, SettingsSource};
/// use esindex::config::ElasticsearchConfig;
///
/// # async fn example() -> esindex::domain::Result<()> {
/// let client = ElasticsearchClient::new(ElasticsearchConfig::default())?;
/// let indices = client.get_indices("logs-*", false).await?;
/// println!("{} indices matched", indices.len());
/// # Ok(())
/// # }
/// ```
pub struct ElasticsearchClient {
    /// Parsed cluster endpoint
    base_url: Url,

    /// HTTP client for making requests
    client: Client,

    /// Connection configuration
    config: ElasticsearchConfig,
}

impl ElasticsearchClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the endpoint is not a usable base URL
    /// or the HTTP client cannot be built.
    pub fn new(config: ElasticsearchConfig) -> Result<Self> {
        let base_url = Url::parse(&config.endpoint).map_err(|e| {
            EsIndexError::Configuration(format!(
                "Invalid elasticsearch.endpoint '{}': {e}",
                config.endpoint
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EsIndexError::Configuration(format!(
                "elasticsearch.endpoint '{}' cannot be used as a base URL",
                config.endpoint
            )));
        }

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!(
                endpoint = %config.endpoint,
                "TLS certificate verification is disabled"
            );
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            EsIndexError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> Option<String> {
        if let Some(api_key) = self.config.api_key() {
            Some(format!("ApiKey {}", api_key.expose_secret().as_ref()))
        } else if let Some((username, password)) = self.config.basic_credentials() {
            let credentials = format!("{username}:{}", password.expose_secret().as_ref());
            let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
            Some(format!("Basic {encoded}"))
        } else {
            None
        }
    }

    /// Build a request URL from path segments and query pairs
    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut().extend_pairs(query);
        url
    }

    /// GET `url` and decode the JSON body, retrying transient failures
    async fn get_json<T: DeserializeOwned>(&self, url: Url, target: &str) -> Result<T> {
        self.retry_request(|| async {
            tracing::debug!(url = %url, "Sending request");

            let mut request = self.client.get(url.clone());
            if let Some(auth) = self.auth_header_value() {
                request = request.header("Authorization", auth);
            }

            let resp = request.send().await.map_err(transport_error)?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(status_error(status, body, target));
            }

            resp.json::<T>()
                .await
                .map_err(|e| ElasticsearchError::InvalidResponse(e.to_string()))
        })
        .await
    }

    /// Retry a request with exponential backoff
    ///
    /// Only errors for which [`ElasticsearchError::is_retryable`] holds are
    /// retried, at most `max_retries` times after the first attempt.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, ElasticsearchError>>,
    {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl SettingsSource for ElasticsearchClient {
    async fn fetch_settings(&self, index: &IndexName) -> Result<SettingsMap> {
        let url = self.url(
            &[index.as_str(), "_settings"],
            &[("flat_settings", "true")],
        );

        let response: SettingsResponse = self.get_json(url, index.as_str()).await?;
        let settings = models::settings_for(index, response)?;

        tracing::debug!(index = %index, count = settings.len(), "Fetched index settings");
        Ok(settings)
    }

    async fn get_indices(&self, target: &str, include_hidden: bool) -> Result<Vec<IndexDocument>> {
        let mut query = vec![("flat_settings", "true")];
        if include_hidden {
            query.push(("expand_wildcards", "all"));
        }
        let url = self.url(&[target], &query);

        let response: GetIndexResponse = self.get_json(url, target).await?;
        let documents = models::into_documents(response)?;

        tracing::debug!(pattern = %target, count = documents.len(), "Fetched indices");
        Ok(documents)
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

/// Delay before retry number `attempt` (1-based), capped at `max_delay_ms`
pub fn backoff_delay(retry: &RetryConfig, attempt: usize) -> Duration {
    let exponent = attempt.saturating_sub(1) as i32;
    let delay_ms = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powi(exponent);
    let delay_ms = delay_ms.min(retry.max_delay_ms as f64) as u64;
    Duration::from_millis(delay_ms)
}

/// Map a transport failure to an error variant
fn transport_error(err: reqwest::Error) -> ElasticsearchError {
    if err.is_timeout() {
        ElasticsearchError::Timeout(err.to_string())
    } else {
        ElasticsearchError::ConnectionFailed(err.to_string())
    }
}

/// Map a non-success status to an error variant
fn status_error(status: StatusCode, body: String, target: &str) -> ElasticsearchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ElasticsearchError::AuthenticationFailed(format!("{status}: {body}"))
        }
        StatusCode::NOT_FOUND => ElasticsearchError::IndexNotFound(target.to_string()),
        s if s.is_server_error() => ElasticsearchError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => ElasticsearchError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    }
}
