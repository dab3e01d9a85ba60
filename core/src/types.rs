//! Domain DTOs for the booking API.
//!
//! # Design
//! Wire names are camelCase, matching the API's JSON. Only the fields the
//! client itself relies on are modelled; everything else is ignored on
//! deserialization and stays reachable through `Envelope` lookups.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Action tokens accepted by the booking status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    /// Moves a reserved booking to `waiting` for marketplace approval.
    Confirm,
    Cancel,
    /// Re-sends the confirmation email; the status is unchanged.
    Resend,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "confirm",
            BookingAction::Cancel => "cancel",
            BookingAction::Resend => "resend",
        }
    }
}

/// Booking statuses the listing endpoint filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Reserved,
    Waiting,
    Cancelled,
    Approved,
    Expired,
    Rejected,
    Released,
    Refunded,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 8] = [
        BookingStatus::Reserved,
        BookingStatus::Waiting,
        BookingStatus::Cancelled,
        BookingStatus::Approved,
        BookingStatus::Expired,
        BookingStatus::Rejected,
        BookingStatus::Released,
        BookingStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Reserved => "reserved",
            BookingStatus::Waiting => "waiting",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Approved => "approved",
            BookingStatus::Expired => "expired",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Released => "released",
            BookingStatus::Refunded => "refunded",
        }
    }
}

/// Payload for creating (or dry-run checking) a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub product_type_uuid: Uuid,
    pub pax: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot_uuid: Option<Uuid>,
    #[serde(default)]
    pub addons: Vec<Value>,
    pub arrival_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_reference: Option<String>,
    #[serde(default)]
    pub use_promotion: bool,
}

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub uuid: Uuid,
    pub status: String,
    #[serde(default)]
    pub partner_reference: Option<String>,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub pax: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub uuid: Uuid,
    pub title: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// `meta.pagination` block of list responses. The API spells these keys in
/// snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub email: String,
}

/// Settings of the API user, from the config endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub timezone: String,
    pub user: ApiUser,
}
