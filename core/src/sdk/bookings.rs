use serde_json::Value;

use crate::descriptor::{DefaultValue, OperationDescriptor, ParamSpec};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Arguments;

use super::{query_pairs, required_body, required_str, Connection, Controller};

pub const CREATE_A_BOOKING: OperationDescriptor =
    OperationDescriptor::new("createABooking", &[ParamSpec::required("data")]);

pub const CHECK_A_BOOKING: OperationDescriptor =
    OperationDescriptor::new("checkABooking", &[ParamSpec::required("data")]);

pub const GET_BOOKING_STATUS: OperationDescriptor =
    OperationDescriptor::new("getBookingStatus", &[ParamSpec::required("uuid")]);

pub const UPDATE_BOOKING_STATUS: OperationDescriptor = OperationDescriptor::new(
    "updateBookingStatus",
    &[ParamSpec::required("status"), ParamSpec::required("uuid")],
);

pub const GET_BOOKINGS: OperationDescriptor = OperationDescriptor::new(
    "getBookings",
    &[
        ParamSpec::optional("page", DefaultValue::Int(1)),
        ParamSpec::optional("perPage", DefaultValue::Int(10)),
        ParamSpec::optional("status", DefaultValue::Null),
        ParamSpec::optional("dateStart", DefaultValue::Null),
        ParamSpec::optional("dateEnd", DefaultValue::Null),
        ParamSpec::optional("partnerReference", DefaultValue::Null),
    ],
);

pub static OPERATIONS: &[OperationDescriptor] = &[
    CREATE_A_BOOKING,
    CHECK_A_BOOKING,
    GET_BOOKING_STATUS,
    UPDATE_BOOKING_STATUS,
    GET_BOOKINGS,
];

/// Booking creation, lookup, listing and status updates.
#[derive(Debug, Clone)]
pub struct BookingsController {
    conn: Connection,
}

impl BookingsController {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn build_create_a_booking(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let data = required_body(CREATE_A_BOOKING.name, args, "data")?;
        self.conn
            .request(HttpMethod::Post, &["v1", "bookings"], &[], Some(data))
    }

    pub fn build_check_a_booking(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let data = required_body(CHECK_A_BOOKING.name, args, "data")?;
        self.conn
            .request(HttpMethod::Post, &["v1", "bookings", "check"], &[], Some(data))
    }

    pub fn build_get_booking_status(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let uuid = required_str(GET_BOOKING_STATUS.name, args, "uuid")?;
        self.conn
            .request(HttpMethod::Get, &["v1", "bookings", uuid.as_str()], &[], None)
    }

    pub fn build_update_booking_status(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let status = required_str(UPDATE_BOOKING_STATUS.name, args, "status")?;
        let uuid = required_str(UPDATE_BOOKING_STATUS.name, args, "uuid")?;
        self.conn.request(
            HttpMethod::Put,
            &["v1", "bookings", uuid.as_str(), status.as_str()],
            &[],
            None,
        )
    }

    pub fn build_get_bookings(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let query = query_pairs(&GET_BOOKINGS, args);
        self.conn
            .request(HttpMethod::Get, &["v1", "bookings"], &query, None)
    }
}

impl Controller for BookingsController {
    fn name(&self) -> &'static str {
        "bookings"
    }

    fn operations(&self) -> &'static [OperationDescriptor] {
        OPERATIONS
    }

    fn invoke(&self, operation: &str, args: &Arguments) -> Result<Value, ApiError> {
        let request = match operation {
            "createABooking" => self.build_create_a_booking(args)?,
            "checkABooking" => self.build_check_a_booking(args)?,
            "getBookingStatus" => self.build_get_booking_status(args)?,
            "updateBookingStatus" => self.build_update_booking_status(args)?,
            "getBookings" => self.build_get_bookings(args)?,
            other => return Err(ApiError::UnsupportedOperation(other.to_string())),
        };
        self.conn.send(request)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::http::HttpResponse;
    use serde_json::json;

    fn controller() -> BookingsController {
        let transport = |req: HttpRequest| -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: json!({"data": {"echo": req.path}}).to_string(),
            })
        };
        BookingsController::new(Connection::new(
            Config::new("key").with_base_url("http://localhost:3000"),
            Arc::new(transport),
        ))
    }

    fn args(pairs: Vec<(&str, Value)>) -> Arguments {
        pairs.into_iter().collect()
    }

    #[test]
    fn every_handled_operation_is_declared() {
        let c = controller();
        for op in ["createABooking", "checkABooking", "getBookingStatus", "updateBookingStatus", "getBookings"] {
            assert!(c.describe(op).is_some(), "{op} missing from table");
        }
        assert!(c.describe("deleteBooking").is_none());
    }

    #[test]
    fn create_posts_payload_as_body() {
        let req = controller()
            .build_create_a_booking(&args(vec![("data", json!({"pax": 2}))]))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/v1/bookings");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"pax": 2}));
    }

    #[test]
    fn check_targets_dry_run_endpoint() {
        let req = controller()
            .build_check_a_booking(&args(vec![("data", json!({}))]))
            .unwrap();
        assert_eq!(req.path, "http://localhost:3000/v1/bookings/check");
    }

    #[test]
    fn update_status_puts_to_action_path() {
        let req = controller()
            .build_update_booking_status(&args(vec![
                ("status", json!("confirm")),
                ("uuid", json!("abc")),
            ]))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/v1/bookings/abc/confirm");
        assert!(req.body.is_none());
    }

    #[test]
    fn uuid_cannot_escape_its_path_segment() {
        let req = controller()
            .build_get_booking_status(&args(vec![("uuid", json!("../config?x=1"))]))
            .unwrap();
        assert_eq!(req.path, "http://localhost:3000/v1/bookings/..%2Fconfig%3Fx=1");

        let req = controller()
            .build_update_booking_status(&args(vec![
                ("status", json!("cancel/../../config")),
                ("uuid", json!("abc")),
            ]))
            .unwrap();
        assert_eq!(
            req.path,
            "http://localhost:3000/v1/bookings/abc/cancel%2F..%2F..%2Fconfig"
        );
    }

    #[test]
    fn listing_sends_snake_case_query() {
        let req = controller()
            .build_get_bookings(&args(vec![
                ("page", json!(1)),
                ("perPage", json!(1000)),
                ("status", json!("waiting")),
                ("dateStart", Value::Null),
            ]))
            .unwrap();
        assert_eq!(
            req.path,
            "http://localhost:3000/v1/bookings?page=1&per_page=1000&status=waiting"
        );
    }

    #[test]
    fn missing_uuid_fails_before_sending() {
        let err = controller()
            .invoke("getBookingStatus", &Arguments::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingArgument {
                operation: "getBookingStatus",
                parameter: "uuid"
            }
        ));
    }

    #[test]
    fn invoke_returns_decoded_body() {
        let body = controller()
            .invoke("getBookingStatus", &args(vec![("uuid", json!("abc"))]))
            .unwrap();
        assert_eq!(body["data"]["echo"], "http://localhost:3000/v1/bookings/abc");
    }

    #[test]
    fn unknown_operations_are_rejected() {
        let err = controller().invoke("nope", &Arguments::default()).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedOperation(_)));
    }
}
