use std::fmt;

use reqwest::header;

use crate::{
    decode::{decode_records, truncate},
    CancelToken, FetchError, Result, ScoreRecord, ScoreSource,
};

/// Scores endpoint used when no other endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://assessments.reliscore.com/api/cric-scores/";

const ENV_ENDPOINT: &str = "CRICSCORE_ENDPOINT";
const USER_AGENT: &str = concat!("cricscore/", env!("CARGO_PKG_VERSION"));
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
const ERROR_BODY_CHARS: usize = 200;

#[derive(Clone)]
/// Score source backed by a single HTTP GET against a JSON endpoint.
pub struct HttpSource {
    http: reqwest::Client,
    endpoint: String,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl HttpSource {
    /// Creates a source for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), endpoint)
    }

    /// Creates a source reusing an existing `reqwest` client.
    ///
    /// Timeouts configured on `http` still apply, but the per-attempt
    /// timeout of [`crate::FetchController`] is enforced independently.
    pub fn with_http_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim().to_owned(),
        }
    }

    /// Creates a source from the `CRICSCORE_ENDPOINT` environment variable,
    /// falling back to [`DEFAULT_ENDPOINT`] when it is unset.
    ///
    /// Returns an error if the variable is set but empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cricscore::HttpSource;
    ///
    /// let source = HttpSource::from_env().expect("CRICSCORE_ENDPOINT must not be empty");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        match std::env::var(ENV_ENDPOINT) {
            Ok(endpoint) if endpoint.trim().is_empty() => {
                Err(format!("{ENV_ENDPOINT} is set but empty"))
            }
            Ok(endpoint) => Ok(Self::new(endpoint)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self) -> Result<Vec<ScoreRecord>> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, NO_CACHE)
            .header(header::PRAGMA, "no-cache")
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // The status alone decides the classification; the body is best effort.
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_CHARS).to_owned(),
            });
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        decode_records(&body)
    }
}

impl ScoreSource for HttpSource {
    async fn fetch(&self, cancel: &CancelToken) -> Result<Vec<ScoreRecord>> {
        // Losing the race drops the request future, which aborts the call.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.request() => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpSource, DEFAULT_ENDPOINT};

    #[test]
    fn default_points_at_public_endpoint() {
        assert_eq!(HttpSource::default().endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn endpoint_is_trimmed() {
        let source = HttpSource::new("  http://localhost:9/scores  ");
        assert_eq!(source.endpoint(), "http://localhost:9/scores");
    }

    #[test]
    fn debug_shows_endpoint_only() {
        let debug = format!("{:?}", HttpSource::new("http://localhost:9/scores"));
        assert_eq!(debug, "HttpSource { endpoint: \"http://localhost:9/scores\" }");
    }
}
