//! Friendly façade over the SDK controllers.
//!
//! # Design
//! Every operation goes through `Client::call`: resolve the operation's
//! declared signature, normalize the caller's options against it, invoke
//! the controller, wrap the JSON result in an `Envelope`. By default the
//! caller gets the top-level `data` entry back; after `raw()` the very next
//! call returns the whole envelope instead.
//!
//! Raw mode is a two-state machine held in a `Cell`: `raw()` arms it and the
//! next operation disarms it before doing anything else, so it never leaks
//! past a failed call. The `Cell` also makes `Client` `!Sync`; sharing one
//! instance between threads needs external synchronization.

use std::any::type_name;
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::with_status;
use crate::config::Config;
use crate::envelope::{Entry, Envelope};
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::normalize::{self, Arguments, Params};
use crate::sdk::{BookingsController, ConfigController, Connection, Controller, ProductsController};
use crate::types::{BookingAction, BookingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    RawArmed,
}

/// Resource groups a call can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Bookings,
    Products,
    Config,
}

/// What a façade operation returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The full response, returned by the call right after `raw()`.
    Raw(Envelope),
    /// The response's top-level `data` entry.
    Data(Entry),
}

impl Reply {
    pub fn is_raw(&self) -> bool {
        matches!(self, Reply::Raw(_))
    }

    /// The wrapped structure, if the reply is raw or nested data.
    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            Reply::Raw(envelope) => Some(envelope),
            Reply::Data(entry) => entry.into_envelope(),
        }
    }

    pub fn get(&self, path: &str) -> Option<Entry> {
        match self {
            Reply::Raw(envelope) => envelope.get(path),
            Reply::Data(entry) => entry.get(path),
        }
    }

    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Entry {
        self.get(path)
            .unwrap_or_else(|| Entry::from(default.into()))
    }

    /// Number of items (or members) of the returned structure.
    pub fn len(&self) -> usize {
        match self {
            Reply::Raw(envelope) => envelope.len(),
            Reply::Data(entry) => entry.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_plain(&self) -> Value {
        match self {
            Reply::Raw(envelope) => envelope.to_plain(),
            Reply::Data(entry) => entry.to_plain(),
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = match self {
            Reply::Raw(envelope) => envelope.deserialize(),
            Reply::Data(entry) => entry.deserialize(),
        };
        Ok(value?)
    }
}

/// Client for the bookings, products and config endpoints.
pub struct Client {
    bookings: Box<dyn Controller>,
    products: Box<dyn Controller>,
    config: Box<dyn Controller>,
    mode: Cell<Mode>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("mode", &self.mode.get())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client whose controllers share `config` and `transport`.
    pub fn new(config: Config, transport: impl Transport + 'static) -> Self {
        let conn = Connection::new(config, Arc::new(transport));
        Self::with_controllers(
            BookingsController::new(conn.clone()),
            ProductsController::new(conn.clone()),
            ConfigController::new(conn),
        )
    }

    /// Client over caller-provided controllers.
    pub fn with_controllers(
        bookings: impl Controller + 'static,
        products: impl Controller + 'static,
        config: impl Controller + 'static,
    ) -> Self {
        Self {
            bookings: Box::new(bookings),
            products: Box::new(products),
            config: Box::new(config),
            mode: Cell::new(Mode::Normal),
        }
    }

    /// Make the next call return the full response envelope.
    pub fn raw(&self) -> &Self {
        self.mode.set(Mode::RawArmed);
        self
    }

    // --- config ---

    pub fn get_config(&self) -> Result<Reply> {
        self.call(Resource::Config, "retrieveConfig", Arguments::default(), Params::new())
    }

    /// Alias of `get_config`, named after the SDK operation.
    pub fn retrieve_config(&self) -> Result<Reply> {
        self.get_config()
    }

    // --- bookings ---

    /// Create a booking from a map or any model serializing to a JSON object.
    pub fn create_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply> {
        let mode = self.take_mode();
        let data = to_payload("create_booking", payload)?;
        self.dispatch(
            mode,
            Resource::Bookings,
            "createABooking",
            required([("data", data)]),
            Params::new(),
        )
    }

    /// Validate a booking payload without creating it.
    pub fn check_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply> {
        let mode = self.take_mode();
        let data = to_payload("check_booking", payload)?;
        self.dispatch(
            mode,
            Resource::Bookings,
            "checkABooking",
            required([("data", data)]),
            Params::new(),
        )
    }

    pub fn get_booking(&self, uuid: Uuid) -> Result<Reply> {
        self.call(
            Resource::Bookings,
            "getBookingStatus",
            required([("uuid", Value::from(uuid.to_string()))]),
            Params::new(),
        )
    }

    /// Alias of `get_booking`, named after the SDK operation.
    pub fn get_booking_status(&self, uuid: Uuid) -> Result<Reply> {
        self.get_booking(uuid)
    }

    pub fn cancel_booking(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Cancel)
    }

    /// Confirm a reserved booking; it then waits for marketplace approval.
    pub fn confirm_booking(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Confirm)
    }

    /// Resend the confirmation email of an already confirmed booking.
    pub fn resend_confirmation(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Resend)
    }

    pub fn update_booking_status(&self, uuid: Uuid, action: BookingAction) -> Result<Reply> {
        info!(%uuid, action = action.as_str(), "updating booking status");
        self.call(
            Resource::Bookings,
            "updateBookingStatus",
            required([
                ("status", Value::from(action.as_str())),
                ("uuid", Value::from(uuid.to_string())),
            ]),
            Params::new(),
        )
    }

    /// Paginated bookings. Options accept `per_page` or `perPage` alike.
    pub fn get_bookings(&self, params: Params) -> Result<Reply> {
        self.call(Resource::Bookings, "getBookings", Arguments::default(), params)
    }

    /// Paginated bookings in `status`. Any `status` option is replaced.
    pub fn get_bookings_with_status(&self, status: BookingStatus, params: Params) -> Result<Reply> {
        self.get_bookings(with_status(status, params))
    }

    pub fn get_reserved_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Reserved, params)
    }

    pub fn get_waiting_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Waiting, params)
    }

    pub fn get_cancelled_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Cancelled, params)
    }

    pub fn get_approved_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Approved, params)
    }

    pub fn get_expired_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Expired, params)
    }

    pub fn get_rejected_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Rejected, params)
    }

    pub fn get_released_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Released, params)
    }

    pub fn get_refunded_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Refunded, params)
    }

    // --- products ---

    pub fn get_products(&self, params: Params) -> Result<Reply> {
        self.call(Resource::Products, "getProductsList", Arguments::default(), params)
    }

    pub fn get_product(&self, uuid: Uuid, params: Params) -> Result<Reply> {
        self.call(
            Resource::Products,
            "getProduct",
            required([("uuid", Value::from(uuid.to_string()))]),
            params,
        )
    }

    // --- generic dispatch ---

    /// Call any declared SDK operation: `required` arguments first, then
    /// `options` merged over the operation's declared defaults.
    pub fn call(
        &self,
        resource: Resource,
        operation: &str,
        required: Arguments,
        options: Params,
    ) -> Result<Reply> {
        let mode = self.take_mode();
        self.dispatch(mode, resource, operation, required, options)
    }

    fn take_mode(&self) -> Mode {
        self.mode.replace(Mode::Normal)
    }

    fn controller(&self, resource: Resource) -> &dyn Controller {
        match resource {
            Resource::Bookings => self.bookings.as_ref(),
            Resource::Products => self.products.as_ref(),
            Resource::Config => self.config.as_ref(),
        }
    }

    fn dispatch(
        &self,
        mode: Mode,
        resource: Resource,
        operation: &str,
        required: Arguments,
        options: Params,
    ) -> Result<Reply> {
        let controller = self.controller(resource);
        let descriptor = normalize::resolve(controller, operation)?;
        let args = normalize::normalize(descriptor, required, options);

        let raw = mode == Mode::RawArmed;
        debug!(controller = controller.name(), operation, raw, "dispatching");
        let body = controller.invoke(operation, &args)?;
        let envelope = Envelope::new(body);

        Ok(if raw {
            Reply::Raw(envelope)
        } else {
            Reply::Data(envelope.field("data"))
        })
    }
}

fn required<const N: usize>(pairs: [(&str, Value); N]) -> Arguments {
    pairs.into_iter().collect()
}

/// Serialize a payload, accepting only values that become a JSON object.
fn to_payload<P: Serialize + ?Sized>(operation: &'static str, payload: &P) -> Result<Value> {
    let given = |detail: &str| Error::InvalidArgument {
        operation,
        given: format!("{} ({detail})", type_name::<P>()),
    };
    match serde_json::to_value(payload) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(given(json_kind(&other))),
        Err(e) => Err(given(&e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
