//! Request executor for the FHRS API.
//!
//! # Design
//! Every endpoint call goes through `FhrsClient::execute`, which is split into
//! three steps so a host can also drive the I/O itself:
//! - `build_request` resolves the path against the base URL, appends the query
//!   and attaches `x-api-version` and `Accept-Language`;
//! - the configured `Transport` performs exactly one round trip;
//! - `parse_response` classifies the status and decodes the body.
//!
//! There is no caching and no retry. 404 and an empty 2xx body both come back
//! as `Ok(None)`; any other failure is returned to the caller.

use serde::de::DeserializeOwned;
use tracing::{debug, field, instrument, Span};

use crate::classify::{classify, Classification};
use crate::config::Config;
use crate::error::Error;
use crate::establishments::EstablishmentsService;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::ratings::RatingsService;
use crate::transport::{Transport, UreqTransport};

pub const VERSION_HEADER: &str = "x-api-version";
pub const LANGUAGE_HEADER: &str = "Accept-Language";

/// Entry point to the FHRS API.
#[derive(Debug, Clone)]
pub struct FhrsClient<T = UreqTransport> {
    config: Config,
    transport: T,
}

impl FhrsClient<UreqTransport> {
    /// Client for the production API with default settings.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_config(Config::production()?))
    }

    /// Client using the blocking `ureq` transport, bounded by the config's
    /// timeout.
    pub fn with_config(config: Config) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T> FhrsClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// See `Config::set_language`.
    pub fn set_language(&mut self, language: &str) -> Result<(), Error> {
        self.config.set_language(language)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a GET request for `path` relative to the base URL.
    pub fn build_request(&self, path: &str, query: &[(&str, String)]) -> Result<HttpRequest, Error> {
        let mut url = self
            .config
            .base_url()
            .join(path)
            .map_err(|source| Error::InvalidRequest {
                target: path.to_string(),
                source,
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: vec![
                (VERSION_HEADER.to_string(), self.config.version().to_string()),
                (LANGUAGE_HEADER.to_string(), self.config.language().tag().to_string()),
            ],
            body: None,
        })
    }

    /// Turn a response into the caller's shape, `None`, or an error.
    pub fn parse_response<R: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<Option<R>, Error> {
        match classify(request, &response) {
            Classification::Success => decode_body(&response.body),
            Classification::NoResult => {
                debug!(url = %request.url, "no result");
                Ok(None)
            }
            Classification::Failure(e) => Err(Error::Api(e)),
        }
    }
}

impl<T: Transport> FhrsClient<T> {
    pub fn establishments(&self) -> EstablishmentsService<'_, T> {
        EstablishmentsService::new(self)
    }

    pub fn ratings(&self) -> RatingsService<'_, T> {
        RatingsService::new(self)
    }

    /// Perform one GET round trip and decode the body into `R`.
    #[instrument(skip_all, fields(path = %path, url = field::Empty))]
    pub fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<R>, Error> {
        let request = self.build_request(path, query)?;
        Span::current().record("url", request.url.as_str());
        let response = self.dispatch(&request)?;
        self.parse_response(&request, response)
    }

    /// Like `execute` but only reports whether the resource exists.
    #[instrument(skip_all, fields(path = %path, url = field::Empty))]
    pub fn probe(&self, path: &str, query: &[(&str, String)]) -> Result<bool, Error> {
        let request = self.build_request(path, query)?;
        Span::current().record("url", request.url.as_str());
        let response = self.dispatch(&request)?;
        match classify(&request, &response) {
            Classification::Success => Ok(true),
            Classification::NoResult => Ok(false),
            Classification::Failure(e) => Err(Error::Api(e)),
        }
    }

    fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        debug!(url = %request.url, "GET request");
        let response = self.transport.send(request)?;
        debug!(
            status = response.status,
            content_type = response.header("content-type").unwrap_or(""),
            "response received"
        );
        Ok(response)
    }
}

/// An empty body on a success status means "no data", not a decode failure.
/// Anything else that fails to parse is a `Decode` error.
fn decode_body<R: DeserializeOwned>(body: &str) -> Result<Option<R>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body).map(Some).map_err(Error::Decode)
}
