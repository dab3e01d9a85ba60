//! The booking API surface as a trait.
//!
//! `Client` implements it; code written against `BookingApi` can take a stub
//! instead. Aliases, status shortcuts and filtered listings are provided
//! methods, so an implementor only supplies the eight remote calls.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::client::{Client, Reply};
use crate::error::Result;
use crate::normalize::{camelize, Params};
use crate::types::{BookingAction, BookingStatus};

pub trait BookingApi {
    fn get_config(&self) -> Result<Reply>;

    fn create_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply>;

    fn check_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply>;

    fn get_booking(&self, uuid: Uuid) -> Result<Reply>;

    fn update_booking_status(&self, uuid: Uuid, action: BookingAction) -> Result<Reply>;

    fn get_bookings(&self, params: Params) -> Result<Reply>;

    fn get_products(&self, params: Params) -> Result<Reply>;

    fn get_product(&self, uuid: Uuid, params: Params) -> Result<Reply>;

    fn retrieve_config(&self) -> Result<Reply> {
        self.get_config()
    }

    fn get_booking_status(&self, uuid: Uuid) -> Result<Reply> {
        self.get_booking(uuid)
    }

    fn cancel_booking(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Cancel)
    }

    fn confirm_booking(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Confirm)
    }

    fn resend_confirmation(&self, uuid: Uuid) -> Result<Reply> {
        self.update_booking_status(uuid, BookingAction::Resend)
    }

    fn get_bookings_with_status(&self, status: BookingStatus, params: Params) -> Result<Reply> {
        self.get_bookings(with_status(status, params))
    }

    fn get_reserved_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Reserved, params)
    }

    fn get_waiting_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Waiting, params)
    }

    fn get_cancelled_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Cancelled, params)
    }

    fn get_approved_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Approved, params)
    }

    fn get_expired_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Expired, params)
    }

    fn get_rejected_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Rejected, params)
    }

    fn get_released_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Released, params)
    }

    fn get_refunded_bookings(&self, params: Params) -> Result<Reply> {
        self.get_bookings_with_status(BookingStatus::Refunded, params)
    }
}

/// `params` with any spelling of `status` replaced by `status`.
pub(crate) fn with_status(status: BookingStatus, mut params: Params) -> Params {
    params.retain(|key, _| camelize(key) != "status");
    params.insert("status".to_string(), Value::from(status.as_str()));
    params
}

impl BookingApi for Client {
    fn get_config(&self) -> Result<Reply> {
        Client::get_config(self)
    }

    fn create_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply> {
        Client::create_booking(self, payload)
    }

    fn check_booking<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Reply> {
        Client::check_booking(self, payload)
    }

    fn get_booking(&self, uuid: Uuid) -> Result<Reply> {
        Client::get_booking(self, uuid)
    }

    fn update_booking_status(&self, uuid: Uuid, action: BookingAction) -> Result<Reply> {
        Client::update_booking_status(self, uuid, action)
    }

    fn get_bookings(&self, params: Params) -> Result<Reply> {
        Client::get_bookings(self, params)
    }

    fn get_products(&self, params: Params) -> Result<Reply> {
        Client::get_products(self, params)
    }

    fn get_product(&self, uuid: Uuid, params: Params) -> Result<Reply> {
        Client::get_product(self, uuid, params)
    }
}
