//! Typed client for the Food Hygiene Rating Scheme (FHRS) API.
//!
//! # Overview
//! `FhrsClient` builds GET requests carrying the API version and response
//! language headers, sends them through a `Transport`, classifies the status
//! and decodes JSON bodies into the records in `types`.
//!
//! # Design
//! - One HTTP round trip per call: no caching, retries or pagination.
//! - A 404 or an empty 2xx body is `Ok(None)`, never an error.
//! - Other non-2xx responses become `Error::Api` with the API's message.
//! - Timestamps accept both formats the API emits; see `temporal`.
//! - Request building and response parsing are public, so a host can run the
//!   I/O itself instead of using `UreqTransport`.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod establishments;
pub mod http;
pub mod ratings;
pub mod temporal;
pub mod transport;
pub mod types;

pub use classify::{Classification, ContentType};
pub use client::FhrsClient;
pub use config::{Config, Language};
pub use error::{ApiError, Error, TransportError};
pub use establishments::{EstablishmentsService, SearchParams};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use ratings::RatingsService;
pub use temporal::{FormatError, TemporalParseError, Timestamp};
pub use transport::{Transport, UreqTransport};
pub use types::{Establishment, Establishments, Geocode, Link, Meta, Rating, Ratings, Scores};
