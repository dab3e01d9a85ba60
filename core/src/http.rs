//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Controllers build `HttpRequest` values and parse `HttpResponse` values
//! without touching the network. The host hands a `Transport` to the client
//! and is responsible for the actual round-trip, which keeps the SDK layer
//! deterministic and easy to drive from tests.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL including any query string.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes a built request against the network.
///
/// Implementations should return non-2xx responses as data; status
/// interpretation belongs to the controllers. Only failures to complete the
/// exchange at all map to `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost/v1/config".to_string(),
            headers: vec![("X-Authorization".to_string(), "secret".to_string())],
            body: None,
        };
        assert_eq!(req.header("x-authorization"), Some("secret"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn closures_act_as_transports() {
        let transport = |req: HttpRequest| -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: format!("{{\"path\":\"{}\"}}", req.path),
            })
        };
        let resp = transport
            .execute(HttpRequest {
                method: HttpMethod::Get,
                path: "/x".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .unwrap();
        assert_eq!(resp.body, r#"{"path":"/x"}"#);
    }
}
