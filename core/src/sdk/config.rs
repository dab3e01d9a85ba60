use serde_json::Value;

use crate::descriptor::OperationDescriptor;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::normalize::Arguments;

use super::{Connection, Controller};

pub const RETRIEVE_CONFIG: OperationDescriptor = OperationDescriptor::new("retrieveConfig", &[]);

pub static OPERATIONS: &[OperationDescriptor] = &[RETRIEVE_CONFIG];

/// Settings of the authenticated API user.
#[derive(Debug, Clone)]
pub struct ConfigController {
    conn: Connection,
}

impl ConfigController {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn build_retrieve_config(&self) -> Result<HttpRequest, ApiError> {
        self.conn.request(HttpMethod::Get, &["v1", "config"], &[], None)
    }
}

impl Controller for ConfigController {
    fn name(&self) -> &'static str {
        "config"
    }

    fn operations(&self) -> &'static [OperationDescriptor] {
        OPERATIONS
    }

    fn invoke(&self, operation: &str, _args: &Arguments) -> Result<Value, ApiError> {
        match operation {
            "retrieveConfig" => self.conn.send(self.build_retrieve_config()?),
            other => Err(ApiError::UnsupportedOperation(other.to_string())),
        }
    }
}
