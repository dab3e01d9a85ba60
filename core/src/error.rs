//! Error types for the booking API client.
//!
//! # Design
//! Two layers. `ApiError` belongs to the controllers and describes what went
//! wrong talking to the remote service. `Error` is what façade operations
//! return: the two locally detected failures plus a transparent pass-through
//! of `ApiError`, so remote failures reach the caller unmodified.

use thiserror::Error;

/// Errors raised by the SDK controllers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the API key.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server returned a non-2xx status other than 401 and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// An operation was invoked without one of its required parameters.
    #[error("{operation} requires parameter `{parameter}`")]
    MissingArgument {
        operation: &'static str,
        parameter: &'static str,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The controller has no handler for the named operation.
    #[error("unsupported operation `{0}`")]
    UnsupportedOperation(String),

    /// The request URL could not be built from the base URL and arguments.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The host transport could not complete the exchange.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The controller does not declare the requested operation.
    #[error("operation `{operation}` not found on {controller} controller")]
    OperationNotFound {
        controller: &'static str,
        operation: String,
    },

    /// A payload did not serialize to a JSON object.
    #[error("{operation} requires a map or a serializable model, [{given}] given")]
    InvalidArgument {
        operation: &'static str,
        given: String,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;
