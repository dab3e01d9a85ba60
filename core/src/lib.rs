//! Friendly client for the BeMyGuest tours-and-activities booking API.
//!
//! # Overview
//! Wraps the SDK controllers (bookings, products, config) behind a single
//! `Client`. Options may be spelled the way the public API docs do
//! (`per_page`) or the way the SDK does (`perPage`); both are normalized
//! against each operation's declared parameters and defaults. Responses come
//! back as `Envelope`s with dot-path lookups.
//!
//! # Design
//! - The controllers build `HttpRequest`s and parse `HttpResponse`s; the host
//!   supplies a `Transport` that performs the actual I/O.
//! - Operation signatures live in static descriptor tables, one per
//!   controller.
//! - `Client::raw()` makes the next call return the full envelope instead of
//!   its `data` entry.
//!
//! ```
//! use bemyguest_client::{ApiError, Client, Config, HttpRequest, HttpResponse};
//! use serde_json::json;
//!
//! let transport = |_: HttpRequest| -> Result<HttpResponse, ApiError> {
//!     Ok(HttpResponse {
//!         status: 200,
//!         headers: Vec::new(),
//!         body: json!({"data": {"timezone": "Asia/Singapore"}}).to_string(),
//!     })
//! };
//! let client = Client::new(Config::new("api-key"), transport);
//! let config = client.get_config().unwrap();
//! assert_eq!(config.get_or("timezone", "").as_str(), Some("Asia/Singapore"));
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod http;
pub mod normalize;
pub mod sdk;
pub mod types;

pub use api::BookingApi;
pub use client::{Client, Reply, Resource};
pub use config::{Config, ConfigError};
pub use envelope::{Entry, Envelope};
pub use error::{ApiError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use normalize::{Arguments, Params};
pub use types::{ApiConfig, Booking, BookingAction, BookingRequest, BookingStatus, Pagination, Product};
