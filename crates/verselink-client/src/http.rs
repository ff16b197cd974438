//! HTTP implementation of [`Backend`].
//!
//! Talks to the lyrics service's `search`, `graph` and `health` endpoints.
//! Every request goes through the configured [`RetryPolicy`]; once retries
//! are exhausted the failure surfaces as [`Error::NetworkFailure`]. Only
//! connection errors and 5xx or 429 responses are retried. Any other
//! non-success status fails on the first attempt.

use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use reqwest::{Client, StatusCode, Url};

use verselink_core::{Error, Result, ResultKey};

use crate::backend::{Backend, GraphParams, SearchParams};
use crate::config::Config;
use crate::resilience::RetryPolicy;

fn network(err: reqwest::Error) -> Error {
    Error::NetworkFailure(err.to_string())
}

/// A failed attempt and whether another one could succeed.
///
/// Transient errors are retried unless the server rejected the request
/// itself with a 4xx status other than 429.
#[derive(Debug)]
struct Failure {
    error: Error,
    retry: bool,
}

impl Failure {
    fn connection(err: reqwest::Error) -> Self {
        let error = network(err);
        Self {
            retry: error.is_transient(),
            error,
        }
    }

    fn status(status: StatusCode, err: reqwest::Error) -> Self {
        let mut failure = Self::connection(err);
        failure.retry &= status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
        failure
    }
}

/// Lyrics backend client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpBackend {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        // Without a trailing slash `Url::join` would replace the last segment.
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::Parse {
            field: "base_url",
            message: format!("{base}: {e}"),
        })?;

        let http = Client::builder()
            .user_agent(concat!("verselink/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(network)?;

        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url, config.timeout(), config.retry_policy())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check that the backend answers its health endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.get_text("health", &[]).await.map(|_| ())
    }

    async fn fetch(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> std::result::Result<String, Failure> {
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(Failure::connection)?;

        let status = response.status();
        let response = response
            .error_for_status()
            .map_err(|err| Failure::status(status, err))?;

        response.text().await.map_err(Failure::connection)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self.base_url.join(endpoint).map_err(|e| Error::Parse {
            field: "base_url",
            message: e.to_string(),
        })?;

        log::debug!("GET {} {:?}", url, query);

        (|| self.fetch(&url, query))
            .retry(self.retry.backoff())
            .when(|failure: &Failure| failure.retry)
            .notify(|failure: &Failure, delay: Duration| {
                log::warn!(
                    "{} request failed, retrying in {:?}: {}",
                    endpoint,
                    delay,
                    failure.error
                );
            })
            .await
            .map_err(|failure| failure.error)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn search(&self, query: &str, params: &SearchParams) -> Result<String> {
        self.get_text(
            "search",
            &[
                ("query", query.to_string()),
                ("top_k", params.top_k.to_string()),
            ],
        )
        .await
    }

    async fn graph(&self, key: &ResultKey, params: &GraphParams) -> Result<String> {
        // `treshold` is the backend's spelling.
        self.get_text(
            "graph",
            &[
                ("key", key.to_string()),
                ("top_k", params.top_k.to_string()),
                ("size", params.size.to_string()),
                ("treshold", params.threshold.to_string()),
            ],
        )
        .await
    }
}
