use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, DEMO_PRODUCT_TYPE_UUID, DEMO_PRODUCT_UUID};
use serde_json::{json, Value};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<String> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-authorization", KEY);
    match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap(),
        None => builder.body(String::new()).unwrap(),
    }
}

fn booking_payload() -> Value {
    json!({
        "salutation": "Mr.",
        "firstName": "Dale",
        "lastName": "Da Silva",
        "email": "dale@example.com",
        "productTypeUuid": DEMO_PRODUCT_TYPE_UUID,
        "pax": 2,
        "children": 0,
        "arrivalDate": "2016-06-05",
        "partnerReference": "ref-1"
    })
}

async fn create(app: &Router) -> Value {
    let resp = app
        .clone()
        .oneshot(request("POST", "/v1/bookings", Some(booking_payload())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- auth ---

#[tokio::test]
async fn missing_key_returns_401() {
    let resp = app(KEY)
        .oneshot(Request::builder().uri("/v1/config").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], 401);
}

#[tokio::test]
async fn wrong_key_returns_401() {
    let resp = app("other-key")
        .oneshot(request("GET", "/v1/config", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- config ---

#[tokio::test]
async fn config_is_wrapped_in_data() {
    let resp = app(KEY).oneshot(request("GET", "/v1/config", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["timezone"], "Asia/Singapore");
    assert_eq!(body["data"]["user"]["email"], "apiclient@bemyguest.com.sg");
}

// --- bookings ---

#[tokio::test]
async fn created_booking_is_reserved() {
    let app = app(KEY);
    let body = create(&app).await;
    assert_eq!(body["data"]["status"], "reserved");
    assert_eq!(body["data"]["firstName"], "Dale");

    let uuid = body["data"]["uuid"].as_str().unwrap();
    let resp = app
        .oneshot(request("GET", &format!("/v1/bookings/{uuid}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["uuid"], uuid);
}

#[tokio::test]
async fn unknown_product_type_returns_422() {
    let mut payload = booking_payload();
    payload["productTypeUuid"] = json!("00000000-0000-0000-0000-000000000000");
    let resp = app(KEY)
        .oneshot(request("POST", "/v1/bookings", Some(payload)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn check_does_not_store_booking() {
    let app = app(KEY);
    let resp = app
        .clone()
        .oneshot(request("POST", "/v1/bookings/check", Some(booking_payload())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["bookable"], true);

    let resp = app.oneshot(request("GET", "/v1/bookings", None)).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn confirm_then_cancel() {
    let app = app(KEY);
    let uuid = create(&app).await["data"]["uuid"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/v1/bookings/{uuid}/confirm"), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["data"]["status"], "waiting");

    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/v1/bookings/{uuid}/resend"), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["data"]["status"], "waiting");

    let resp = app
        .clone()
        .oneshot(request("PUT", &format!("/v1/bookings/{uuid}/cancel"), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["data"]["status"], "cancelled");

    let resp = app
        .oneshot(request("PUT", &format!("/v1/bookings/{uuid}/confirm"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_action_returns_400() {
    let app = app(KEY);
    let uuid = create(&app).await["data"]["uuid"].as_str().unwrap().to_string();
    let resp = app
        .oneshot(request("PUT", &format!("/v1/bookings/{uuid}/approve"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_booking_not_found() {
    let resp = app(KEY)
        .oneshot(request(
            "GET",
            "/v1/bookings/00000000-0000-0000-0000-000000000000",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bookings_filter_by_status_and_paginate() {
    let app = app(KEY);
    for _ in 0..3 {
        create(&app).await;
    }
    let first = create(&app).await["data"]["uuid"].as_str().unwrap().to_string();
    app.clone()
        .oneshot(request("PUT", &format!("/v1/bookings/{first}/confirm"), None))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(request("GET", "/v1/bookings?status=reserved&per_page=2&page=2", None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["pagination"]["total"], 3);
    assert_eq!(body["meta"]["pagination"]["count"], 1);
    assert_eq!(body["meta"]["pagination"]["total_pages"], 2);

    let resp = app
        .oneshot(request("GET", "/v1/bookings?status=waiting", None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"][0]["uuid"], first.as_str());
}

// --- products ---

#[tokio::test]
async fn products_default_to_ten_per_page() {
    let resp = app(KEY).oneshot(request("GET", "/v1/products", None)).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["pagination"]["per_page"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let uri = format!("/v1/products?page={}&per_page=2", usize::MAX);
    let resp = app(KEY).oneshot(request("GET", &uri, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["pagination"]["total"], 3);
    assert_eq!(body["meta"]["pagination"]["count"], 0);
}

#[tokio::test]
async fn products_filter_by_city() {
    let resp = app(KEY)
        .oneshot(request("GET", "/v1/products?city=Kuala+Lumpur", None))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["country"], "Malaysia");
}

#[tokio::test]
async fn single_product_by_uuid() {
    let resp = app(KEY)
        .oneshot(request("GET", &format!("/v1/products/{DEMO_PRODUCT_UUID}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["currency"]["code"], "SGD");
}

#[tokio::test]
async fn product_bad_uuid_returns_400() {
    let resp = app(KEY)
        .oneshot(request("GET", "/v1/products/not-a-uuid", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
