//! Static operation signatures for the SDK controllers.
//!
//! # Design
//! Each controller publishes a table of `OperationDescriptor`s: the operation
//! name plus its parameters in declaration order, optional ones carrying a
//! declared default. The normalizer looks descriptors up by name on every
//! call; nothing is cached between calls.

use serde_json::Value;

/// Declared default of an optional parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Null => Value::Null,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Int(n) => Value::from(n),
            DefaultValue::Str(s) => Value::from(s),
        }
    }
}

/// One declared parameter. `default == None` marks it required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: Option<DefaultValue>,
}

impl ParamSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, default: None }
    }

    pub const fn optional(name: &'static str, default: DefaultValue) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

impl OperationDescriptor {
    pub const fn new(name: &'static str, params: &'static [ParamSpec]) -> Self {
        Self { name, params }
    }

    /// Parameters with a declared default, in declaration order.
    pub fn defaults(&self) -> impl Iterator<Item = (&'static str, Value)> + '_ {
        self.params
            .iter()
            .filter_map(|p| p.default.map(|d| (p.name, d.to_value())))
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Find `name` in a controller's descriptor table.
pub fn find(
    table: &'static [OperationDescriptor],
    name: &str,
) -> Option<&'static OperationDescriptor> {
    table.iter().find(|op| op.name == name)
}
