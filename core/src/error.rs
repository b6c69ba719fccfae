//! Error types for the FHRS API client.
//!
//! # Design
//! A 404 never shows up here: "nothing matched" is reported as `Ok(None)` by
//! the executor. Every other non-2xx response becomes an `ApiError` carrying
//! the method, URL, status code and whatever message the body held, so callers
//! can branch on `status` without string matching.

use thiserror::Error;

/// Errors returned by `FhrsClient` and its endpoint services.
#[derive(Debug, Error)]
pub enum Error {
    /// The request URL could not be built from the base URL and path.
    #[error("invalid request `{target}`: {source}")]
    InvalidRequest {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status other than 404.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A success body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The requested response language is not one the API serves.
    #[error("unsupported language `{0}`")]
    UnsupportedLanguage(String),
}

/// A non-2xx, non-404 response from the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API Error: {method} {url} returned status {status}. {message}")]
pub struct ApiError {
    pub method: String,
    pub url: String,
    pub status: u16,
    /// Empty when the response carried no usable detail.
    pub message: String,
}

/// Failure reported by a `Transport` (connection refused, DNS, timeout, ...).
#[derive(Debug, Error)]
#[error("transport error: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_names_request_and_status() {
        let err = ApiError {
            method: "GET".to_string(),
            url: "https://api.ratings.food.gov.uk/Ratings".to_string(),
            status: 503,
            message: "The service is unavailable.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API Error: GET https://api.ratings.food.gov.uk/Ratings returned status 503. The service is unavailable."
        );
    }

    #[test]
    fn transport_error_keeps_its_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::from(TransportError::new(io));
        let source = std::error::Error::source(&err).expect("transport cause");
        assert_eq!(source.to_string(), "refused");
    }
}
