//! Controllers of the booking API SDK.
//!
//! # Design
//! One controller per resource group (bookings, products, config). Each
//! publishes a static table of operation signatures and turns an
//! `(operation, Arguments)` pair into an `HttpRequest`, runs it through the
//! shared `Connection`, and returns the decoded JSON body. Status codes are
//! interpreted here; the façade above only ever sees JSON or an `ApiError`.

pub mod bookings;
pub mod config;
pub mod products;

use std::fmt;
use std::sync::Arc;

use heck::ToSnakeCase;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::descriptor::{self, OperationDescriptor};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::normalize::Arguments;

pub use bookings::BookingsController;
pub use config::ConfigController;
pub use products::ProductsController;

/// A group of remote operations with declared signatures.
pub trait Controller {
    /// Resource group name, used in error messages and logs.
    fn name(&self) -> &'static str;

    fn operations(&self) -> &'static [OperationDescriptor];

    fn describe(&self, operation: &str) -> Option<&'static OperationDescriptor> {
        descriptor::find(self.operations(), operation)
    }

    /// Perform `operation` with already-normalized arguments.
    fn invoke(&self, operation: &str, args: &Arguments) -> Result<Value, ApiError>;
}

/// Base URL, credential and transport shared by the controllers of a client.
#[derive(Clone)]
pub struct Connection {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

impl Connection {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build an authorized request for the path made of `segments`, each
    /// percent-encoded as a single segment below the base URL.
    pub fn request(
        &self,
        method: HttpMethod,
        segments: &[&str],
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = Url::parse(self.config.base_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.config.base_url())))?;
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidUrl(format!("illegal path segment `{bad}`")));
        }
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{} cannot be a base", self.config.base_url())))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut headers = vec![
            ("X-Authorization".to_string(), self.config.api_key().to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        let body = match body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(
                    serde_json::to_string(value)
                        .map_err(|e| ApiError::SerializationError(e.to_string()))?,
                )
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            path: url.into(),
            headers,
            body,
        })
    }

    /// Execute `request` and decode the JSON body of a 2xx response.
    pub fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(method = request.method.as_str(), url = request.path.as_str(), "sending request");
        let response = self.transport.execute(request)?;
        parse_json(response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized(response.body.clone())),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

pub fn parse_json(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Query parameter name for a canonical (camelCase) argument name.
pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// Query pairs for every non-null argument that is not a required
/// (path or body) parameter of `descriptor`.
pub fn query_pairs(descriptor: &OperationDescriptor, args: &Arguments) -> Vec<(String, String)> {
    args.iter()
        .filter(|(name, _)| !descriptor.param(name).is_some_and(|p| p.is_required()))
        .filter_map(|(name, value)| query_value(value).map(|v| (snake_case(name), v)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(query_value).collect();
            Some(parts.join(","))
        }
        other => Some(other.to_string()),
    }
}

/// A required scalar argument rendered as a string.
pub fn required_str(
    operation: &'static str,
    args: &Arguments,
    parameter: &'static str,
) -> Result<String, ApiError> {
    match args.get(parameter) {
        None | Some(Value::Null) => Err(ApiError::MissingArgument {
            operation,
            parameter,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// A required JSON body argument.
pub fn required_body<'a>(
    operation: &'static str,
    args: &'a Arguments,
    parameter: &'static str,
) -> Result<&'a Value, ApiError> {
    match args.get(parameter) {
        None | Some(Value::Null) => Err(ApiError::MissingArgument {
            operation,
            parameter,
        }),
        Some(value) => Ok(value),
    }
}
