//! Shared HTTP client configuration and error mapping.

use std::time::Duration;

use reqwest::Client;
use saferoute_core::ProviderError;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Error type for adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Default user agent for upstream requests.
pub const DEFAULT_USER_AGENT: &str = "saferoute/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by the HTTP adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAdapterConfig {
    /// Base URL for the upstream service (e.g., `"https://router.project-osrm.org"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpAdapterConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::InvalidBaseUrl`] when the URL does not
    /// parse.
    pub fn parsed_base_url(&self) -> Result<Url, ProviderBuildError> {
        Url::parse(&self.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Build an HTTP client honouring the timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::HttpClient`] when the TLS backend fails
    /// to initialise.
    pub fn build_client(&self) -> Result<Client, ProviderBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)
    }
}

/// Append `segment` to `base`, avoiding doubled slashes.
pub(crate) fn join_path(base: &Url, segment: &str) -> String {
    let base = base.as_str().trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if segment.is_empty() {
        base.to_owned()
    } else {
        format!("{base}/{segment}")
    }
}

/// Build `{base}/{path}?{params}` with form-encoded parameters.
pub(crate) fn url_with_query(
    base: &Url,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Url, ProviderError> {
    let mut url = Url::parse(&join_path(base, path)).map_err(|err| ProviderError::Parse {
        message: format!("invalid request URL: {err}"),
    })?;
    url.query_pairs_mut().extend_pairs(params);
    Ok(url)
}

/// Issue a GET request and decode the JSON body.
pub(crate) async fn get_json<T>(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| convert_reqwest_error(&err, url, timeout))?
        .error_for_status()
        .map_err(|err| convert_reqwest_error(&err, url, timeout))?;

    response.json().await.map_err(|err| ProviderError::Parse {
        message: err.to_string(),
    })
}

/// Convert a reqwest error to a [`ProviderError`].
pub(crate) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout: Duration,
) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }

    if let Some(status) = error.status() {
        return ProviderError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    ProviderError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpAdapterConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn rejects_unparseable_base_url() {
        let err = HttpAdapterConfig::new("not a url")
            .parsed_base_url()
            .expect_err("relative URL should fail");

        match err {
            ProviderBuildError::InvalidBaseUrl { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("expected InvalidBaseUrl, got {other:?}"),
        }
    }

    #[rstest]
    fn invalid_base_url_reports_url_and_cause() {
        let err = HttpAdapterConfig::new("not a url")
            .parsed_base_url()
            .expect_err("relative URL should fail");

        assert_eq!(
            err.to_string(),
            "invalid base URL 'not a url': relative URL without a base"
        );
        let cause = std::error::Error::source(&err).expect("parse error as source");
        assert_eq!(cause.to_string(), "relative URL without a base");
    }

    #[rstest]
    #[case::plain("http://osrm.test", "route/v1", "http://osrm.test/route/v1")]
    #[case::trailing_slash("http://osrm.test/", "route/v1", "http://osrm.test/route/v1")]
    #[case::nested("http://osm.test/api/", "/interpreter", "http://osm.test/api/interpreter")]
    #[case::empty_segment("http://osm.test/api/interpreter", "", "http://osm.test/api/interpreter")]
    fn joins_paths(#[case] base: &str, #[case] segment: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        assert_eq!(join_path(&base, segment), expected);
    }

    #[rstest]
    fn encodes_query_parameters() {
        let base = Url::parse("http://nominatim.test").expect("valid base");

        let url = url_with_query(
            &base,
            "search",
            &[("format", "json"), ("q", "MG Road, Bangalore")],
        )
        .expect("valid url");

        assert_eq!(
            url.as_str(),
            "http://nominatim.test/search?format=json&q=MG+Road%2C+Bangalore"
        );
    }
}
