//! Transport-level errors reported by adapter implementations.

use thiserror::Error;

/// Errors returned by [`RoutingProvider`](crate::RoutingProvider),
/// [`Geocoder`](crate::Geocoder) and [`PoiProvider`](crate::PoiProvider)
/// implementations.
///
/// Callers inside this crate never propagate these values to the UI; the
/// fail-soft wrappers log them and degrade to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request could not reach the upstream service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The request did not complete before the client timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The upstream returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The upstream answered but reported a service-level failure.
    #[error("service responded with {code}: {message}")]
    Service {
        /// Status code reported in the response body.
        code: String,
        /// Message reported in the response body.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ProviderError::Timeout { url: "http://osrm.test/route".to_owned(), timeout_secs: 3 },
        "request to http://osrm.test/route timed out after 3s"
    )]
    #[case(
        ProviderError::Service { code: "NoRoute".to_owned(), message: "Impossible route".to_owned() },
        "service responded with NoRoute: Impossible route"
    )]
    fn display_includes_context(#[case] error: ProviderError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
