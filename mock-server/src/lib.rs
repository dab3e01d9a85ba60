//! In-memory stand-in for the BeMyGuest v1 API.
//!
//! Serves the config, bookings and products endpoints with the same
//! `{"data": ..., "meta": {"pagination": ...}}` envelope the real service
//! uses. Every route requires the `X-Authorization` header to match the key
//! the app was built with.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEMO_PRODUCT_UUID: &str = "626ee399-1340-51c6-bd67-21183fed711f";
pub const DEMO_PRODUCT_TYPE_UUID: &str = "ff240586-fd51-5d5f-9eae-b7ce80fbe711";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub uuid: Uuid,
    pub status: String,
    pub product_type_uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub pax: u32,
    pub children: u32,
    pub arrival_date: String,
    pub partner_reference: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub product_type_uuid: Uuid,
    pub pax: u32,
    #[serde(default)]
    pub children: u32,
    pub arrival_date: String,
    pub partner_reference: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub uuid: Uuid,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub uuid: Uuid,
    pub title: String,
    pub city: String,
    pub country: String,
    pub currency: Value,
    pub product_types: Vec<ProductType>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub status: Option<String>,
    pub partner_reference: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Default)]
pub struct Db {
    pub bookings: Vec<Booking>,
    pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    db: Arc<RwLock<Db>>,
}

type ApiResult = Result<Response, Response>;

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        db: Arc::new(RwLock::new(Db {
            bookings: Vec::new(),
            products: seed_products(),
        })),
    };
    Router::new()
        .route("/v1/config", get(retrieve_config))
        .route("/v1/bookings", get(list_bookings).post(create_booking))
        .route("/v1/bookings/check", post(check_booking))
        .route("/v1/bookings/{uuid}", get(get_booking))
        .route("/v1/bookings/{uuid}/{action}", put(update_booking_status))
        .route("/v1/products", get(list_products))
        .route("/v1/products/{uuid}", get(get_product))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let given = req
        .headers()
        .get("x-authorization")
        .and_then(|v| v.to_str().ok());
    if given == Some(&*state.api_key) {
        next.run(req).await
    } else {
        failure(StatusCode::UNAUTHORIZED, "invalid API key")
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = json!({"error": {"code": status.as_u16(), "message": message}});
    (status, Json(body)).into_response()
}

fn data<T: Serialize>(status: StatusCode, value: T) -> Response {
    (status, Json(json!({"data": value}))).into_response()
}

/// Slice `items` according to `page`/`per_page` and attach pagination meta.
fn paginate<T: Serialize + Clone>(items: &[T], page: Option<usize>, per_page: Option<usize>) -> Response {
    let per_page = per_page.unwrap_or(10).max(1);
    let page = page.unwrap_or(1).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let slice: Vec<T> = items
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();
    let count = slice.len();
    let body = json!({
        "data": slice,
        "meta": {"pagination": {
            "total": total,
            "count": count,
            "per_page": per_page,
            "current_page": page,
            "total_pages": total_pages,
        }}
    });
    (StatusCode::OK, Json(body)).into_response()
}

async fn retrieve_config() -> Response {
    data(
        StatusCode::OK,
        json!({
            "timezone": "Asia/Singapore",
            "currency": {"code": "SGD"},
            "user": {"email": "apiclient@bemyguest.com.sg", "name": "API Client"}
        }),
    )
}

async fn list_bookings(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let db = state.db.read().await;
    let matching: Vec<Booking> = db
        .bookings
        .iter()
        .filter(|b| query.status.as_deref().is_none_or(|s| b.status == s))
        .filter(|b| {
            query
                .partner_reference
                .as_deref()
                .is_none_or(|r| b.partner_reference.as_deref() == Some(r))
        })
        .cloned()
        .collect();
    paginate(&matching, query.page, query.per_page)
}

fn validate(db: &Db, input: &CreateBooking) -> Result<(), Response> {
    if input.pax == 0 {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "pax must be at least 1"));
    }
    let known = db
        .products
        .iter()
        .flat_map(|p| &p.product_types)
        .any(|t| t.uuid == input.product_type_uuid);
    if !known {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "unknown product type"));
    }
    Ok(())
}

async fn create_booking(State(state): State<AppState>, Json(input): Json<CreateBooking>) -> ApiResult {
    let mut db = state.db.write().await;
    validate(&db, &input)?;
    let booking = Booking {
        uuid: Uuid::new_v4(),
        status: "reserved".to_string(),
        product_type_uuid: input.product_type_uuid,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        pax: input.pax,
        children: input.children,
        arrival_date: input.arrival_date,
        partner_reference: input.partner_reference,
    };
    info!(uuid = %booking.uuid, "booking reserved");
    db.bookings.push(booking.clone());
    Ok(data(StatusCode::CREATED, booking))
}

async fn check_booking(State(state): State<AppState>, Json(input): Json<CreateBooking>) -> ApiResult {
    let db = state.db.read().await;
    validate(&db, &input)?;
    Ok(data(
        StatusCode::OK,
        json!({"bookable": true, "productTypeUuid": input.product_type_uuid, "pax": input.pax}),
    ))
}

async fn get_booking(State(state): State<AppState>, Path(uuid): Path<Uuid>) -> ApiResult {
    let db = state.db.read().await;
    db.bookings
        .iter()
        .find(|b| b.uuid == uuid)
        .map(|b| data(StatusCode::OK, b))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "booking not found"))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path((uuid, action)): Path<(Uuid, String)>,
) -> ApiResult {
    let mut db = state.db.write().await;
    let booking = db
        .bookings
        .iter_mut()
        .find(|b| b.uuid == uuid)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "booking not found"))?;

    let next = match (action.as_str(), booking.status.as_str()) {
        ("confirm", "reserved") => "waiting",
        ("cancel", "reserved" | "waiting") => "cancelled",
        ("resend", "waiting" | "approved") => booking.status.as_str(),
        ("confirm" | "cancel" | "resend", current) => {
            let message = format!("cannot {action} a booking in status {current}");
            return Err(failure(StatusCode::CONFLICT, &message));
        }
        _ => return Err(failure(StatusCode::BAD_REQUEST, "unknown status action")),
    }
    .to_string();

    info!(%uuid, action = action.as_str(), status = next.as_str(), "booking status updated");
    booking.status = next;
    Ok(data(StatusCode::OK, &*booking))
}

async fn list_products(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let db = state.db.read().await;
    let matching: Vec<Product> = db
        .products
        .iter()
        .filter(|p| query.city.as_deref().is_none_or(|c| p.city.eq_ignore_ascii_case(c)))
        .filter(|p| query.country.as_deref().is_none_or(|c| p.country.eq_ignore_ascii_case(c)))
        .cloned()
        .collect();
    paginate(&matching, query.page, query.per_page)
}

async fn get_product(State(state): State<AppState>, Path(uuid): Path<Uuid>) -> ApiResult {
    let db = state.db.read().await;
    db.products
        .iter()
        .find(|p| p.uuid == uuid)
        .map(|p| data(StatusCode::OK, p))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "product not found"))
}

fn seed_products() -> Vec<Product> {
    let product = |uuid: &str, title: &str, city: &str, country: &str, type_uuid: &str| Product {
        uuid: Uuid::parse_str(uuid).unwrap_or_else(|_| Uuid::new_v4()),
        title: title.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        currency: json!({"code": "SGD"}),
        product_types: vec![ProductType {
            uuid: Uuid::parse_str(type_uuid).unwrap_or_else(|_| Uuid::new_v4()),
            title: "Standard".to_string(),
        }],
    };
    vec![
        product(
            DEMO_PRODUCT_UUID,
            "Singapore Night Safari",
            "Singapore",
            "Singapore",
            DEMO_PRODUCT_TYPE_UUID,
        ),
        product(
            "7e7f3757-f065-5ae0-a286-e7e5be1db181",
            "Gardens by the Bay",
            "Singapore",
            "Singapore",
            "2b8f4a3e-5d1c-5e7a-9c0b-3f6d2e1a4b5c",
        ),
        product(
            "0c6e8d2a-9b3f-5a41-8e7d-6f5c4b3a2e1d",
            "Petronas Towers Skybridge",
            "Kuala Lumpur",
            "Malaysia",
            "9d8c7b6a-5e4f-5a3b-8c2d-1e0f9a8b7c6d",
        ),
    ]
}
