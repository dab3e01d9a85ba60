use serde_json::Value;

use crate::descriptor::{DefaultValue, OperationDescriptor, ParamSpec};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Arguments;

use super::{query_pairs, required_str, Connection, Controller};

pub const GET_PRODUCTS_LIST: OperationDescriptor = OperationDescriptor::new(
    "getProductsList",
    &[
        ParamSpec::optional("page", DefaultValue::Int(1)),
        ParamSpec::optional("perPage", DefaultValue::Int(10)),
        ParamSpec::optional("language", DefaultValue::Null),
        ParamSpec::optional("currency", DefaultValue::Null),
        ParamSpec::optional("country", DefaultValue::Null),
        ParamSpec::optional("city", DefaultValue::Null),
        ParamSpec::optional("dateStart", DefaultValue::Null),
        ParamSpec::optional("dateEnd", DefaultValue::Null),
        ParamSpec::optional("sort", DefaultValue::Null),
        ParamSpec::optional("direction", DefaultValue::Null),
    ],
);

pub const GET_PRODUCT: OperationDescriptor = OperationDescriptor::new(
    "getProduct",
    &[
        ParamSpec::required("uuid"),
        ParamSpec::optional("language", DefaultValue::Null),
        ParamSpec::optional("currency", DefaultValue::Null),
        ParamSpec::optional("dateStart", DefaultValue::Null),
        ParamSpec::optional("dateEnd", DefaultValue::Null),
    ],
);

pub static OPERATIONS: &[OperationDescriptor] = &[GET_PRODUCTS_LIST, GET_PRODUCT];

/// Product catalogue listing and detail.
#[derive(Debug, Clone)]
pub struct ProductsController {
    conn: Connection,
}

impl ProductsController {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn build_get_products_list(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let query = query_pairs(&GET_PRODUCTS_LIST, args);
        self.conn
            .request(HttpMethod::Get, &["v1", "products"], &query, None)
    }

    pub fn build_get_product(&self, args: &Arguments) -> Result<HttpRequest, ApiError> {
        let uuid = required_str(GET_PRODUCT.name, args, "uuid")?;
        let query = query_pairs(&GET_PRODUCT, args);
        self.conn
            .request(HttpMethod::Get, &["v1", "products", uuid.as_str()], &query, None)
    }
}

impl Controller for ProductsController {
    fn name(&self) -> &'static str {
        "products"
    }

    fn operations(&self) -> &'static [OperationDescriptor] {
        OPERATIONS
    }

    fn invoke(&self, operation: &str, args: &Arguments) -> Result<Value, ApiError> {
        let request = match operation {
            "getProductsList" => self.build_get_products_list(args)?,
            "getProduct" => self.build_get_product(args)?,
            other => return Err(ApiError::UnsupportedOperation(other.to_string())),
        };
        self.conn.send(request)
    }
}
