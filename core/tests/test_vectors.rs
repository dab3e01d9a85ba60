//! Verify normalization and request building against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each case names a controller operation, the required arguments, the
//! caller options, the expected ordered argument list and the request the
//! controller should emit for it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use bemyguest_client::normalize::{normalize, resolve};
use bemyguest_client::sdk::{BookingsController, ConfigController, Connection, Controller, ProductsController};
use bemyguest_client::{Arguments, ApiError, Config, HttpMethod, HttpRequest, HttpResponse, Params};
use serde_json::Value;

type Captured = Rc<RefCell<Option<HttpRequest>>>;

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        other => panic!("unknown method: {other}"),
    }
}

fn controller(name: &str, base_url: &str, captured: &Captured) -> Box<dyn Controller> {
    let sink = captured.clone();
    let transport = move |req: HttpRequest| -> Result<HttpResponse, ApiError> {
        *sink.borrow_mut() = Some(req);
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"data":{}}"#.to_string(),
        })
    };
    let conn = Connection::new(Config::new("vector-key").with_base_url(base_url), Arc::new(transport));
    match name {
        "bookings" => Box::new(BookingsController::new(conn)),
        "products" => Box::new(ProductsController::new(conn)),
        "config" => Box::new(ConfigController::new(conn)),
        other => panic!("unknown controller: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, Value)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].clone())
        })
        .collect()
}

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let captured = Captured::default();
        let controller = controller(case["controller"].as_str().unwrap(), base_url, &captured);
        let operation = case["operation"].as_str().unwrap();

        // Verify normalization
        let descriptor = resolve(controller.as_ref(), operation).unwrap();
        let required: Arguments = pairs(&case["required"]).into_iter().collect();
        let options: Params = case["options"].as_object().cloned().unwrap();
        let args = normalize(descriptor, required, options);

        let actual: Vec<(String, Value)> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(actual, pairs(&case["expected_arguments"]), "{name}: arguments");

        // Verify the emitted request
        controller.invoke(operation, &args).unwrap();
        let req = captured.borrow_mut().take().expect("request was sent");
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.path,
            format!("{base_url}{}", expected["path"].as_str().unwrap()),
            "{name}: path"
        );
        assert_eq!(req.header("x-authorization"), Some("vector-key"), "{name}: auth header");
    }
}

#[test]
fn unknown_operations_do_not_resolve() {
    let captured = Captured::default();
    for name in ["bookings", "products", "config"] {
        let controller = controller(name, "http://localhost:3000", &captured);
        assert!(resolve(controller.as_ref(), "deleteEverything").is_err(), "{name}");
    }
    assert!(captured.borrow().is_none());
}
