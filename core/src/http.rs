//! HTTP requests and responses as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and interprets `HttpResponse` values
//! without touching the network itself. A `Transport` (see `transport.rs`)
//! performs the round trip in between, which keeps request construction and
//! status/body handling deterministic and testable in isolation.

use std::fmt;

/// HTTP method for a request. The FHRS API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `FhrsClient::build_request`; `url` is absolute and already carries
/// the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup; returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let res = response(200, &[("Content-Type", "application/json")]);
        assert_eq!(res.header("content-type"), Some("application/json"));
        assert_eq!(res.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(res.header("x-missing"), None);
    }

    #[test]
    fn success_range_is_half_open() {
        assert!(response(200, &[]).is_success());
        assert!(response(299, &[]).is_success());
        assert!(!response(300, &[]).is_success());
        assert!(!response(199, &[]).is_success());
        assert!(!response(404, &[]).is_success());
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }
}
