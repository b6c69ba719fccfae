//! Status-code policy for API responses.
//!
//! # Design
//! Classification runs before any attempt to decode a success body, since
//! error bodies never match the success schema. 404 means "nothing matched"
//! and is not an error. Any other status outside `[200, 300)` becomes an
//! `ApiError` whose message is pulled from the body according to the declared
//! content type, dispatched once through `ContentType`.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ErrorBody;

/// Media type of an error body, as far as message extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Json,
    Other,
}

impl ContentType {
    /// Parameters such as `charset` are ignored; a missing header is `Other`.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ContentType::Other;
        };
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case("text/html") {
            ContentType::Html
        } else if media_type.eq_ignore_ascii_case("application/json") {
            ContentType::Json
        } else {
            ContentType::Other
        }
    }
}

/// What the executor should do with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 2xx: decode the body as the expected shape.
    Success,
    /// 404: return an absent result.
    NoResult,
    /// Anything else.
    Failure(ApiError),
}

pub fn classify(request: &HttpRequest, response: &HttpResponse) -> Classification {
    if response.status == 404 {
        return Classification::NoResult;
    }
    if response.is_success() {
        return Classification::Success;
    }

    let content_type = ContentType::from_header(response.header("content-type"));
    Classification::Failure(ApiError {
        method: request.method.to_string(),
        url: request.url.clone(),
        status: response.status,
        message: error_message(content_type, &response.body),
    })
}

fn error_message(content_type: ContentType, body: &str) -> String {
    match content_type {
        ContentType::Html => body.to_string(),
        ContentType::Json if body.trim().is_empty() => String::new(),
        ContentType::Json => match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.message,
            Err(e) => {
                warn!(error = %e, "unreadable JSON error body");
                String::new()
            }
        },
        ContentType::Other => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:3000/Establishments/1".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: content_type
                .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: body.to_string(),
        }
    }

    fn failure(status: u16, content_type: Option<&str>, body: &str) -> ApiError {
        match classify(&request(), &response(status, content_type, body)) {
            Classification::Failure(e) => e,
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn content_type_parsing() {
        assert_eq!(ContentType::from_header(Some("text/html")), ContentType::Html);
        assert_eq!(ContentType::from_header(Some("Text/HTML; charset=utf-8")), ContentType::Html);
        assert_eq!(
            ContentType::from_header(Some("application/json; charset=utf-8")),
            ContentType::Json
        );
        assert_eq!(ContentType::from_header(Some("text/plain")), ContentType::Other);
        assert_eq!(ContentType::from_header(None), ContentType::Other);
    }

    #[test]
    fn not_found_is_no_result_regardless_of_body() {
        for body in ["", r#"{ "Message": "No establishment found" }"#, "<html>gone</html>"] {
            let res = response(404, Some("application/json"), body);
            assert_eq!(classify(&request(), &res), Classification::NoResult);
        }
        assert_eq!(classify(&request(), &response(404, None, "")), Classification::NoResult);
    }

    #[test]
    fn success_range_passes_through() {
        for status in [200, 201, 204, 299] {
            let res = response(status, Some("application/json"), "{}");
            assert_eq!(classify(&request(), &res), Classification::Success);
        }
    }

    #[test]
    fn html_error_uses_raw_body() {
        let err = failure(503, Some("text/html"), "The service is unavailable.");
        assert_eq!(err.status, 503);
        assert_eq!(err.message, "The service is unavailable.");
        assert_eq!(err.method, "GET");
        assert_eq!(err.url, "http://localhost:3000/Establishments/1");
    }

    #[test]
    fn json_error_uses_message_field() {
        let err = failure(400, Some("application/json"), r#"{ "Message": "The request is invalid" }"#);
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "The request is invalid");
    }

    #[test]
    fn empty_json_error_body_has_empty_message() {
        let err = failure(500, Some("application/json"), "");
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "");
    }

    #[test]
    fn unreadable_json_error_body_still_yields_api_error() {
        let err = failure(502, Some("application/json"), "<not json>");
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "");
    }

    #[test]
    fn missing_or_unknown_content_type_has_empty_message() {
        assert_eq!(failure(500, None, "boom").message, "");
        assert_eq!(failure(401, Some("text/plain"), "denied").message, "");
    }

    #[test]
    fn informational_and_redirect_statuses_are_failures() {
        assert_eq!(failure(100, None, "").status, 100);
        assert_eq!(failure(301, None, "").status, 301);
    }
}
