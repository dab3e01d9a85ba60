//! Parameter normalization for SDK operation calls.
//!
//! Callers may spell option keys the way the public API docs do
//! (`per_page`) or the way the SDK does (`perPage`). Both are canonicalized
//! to camelCase and merged over the operation's declared defaults, so the
//! controller always receives its complete, ordered argument set.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::descriptor::OperationDescriptor;
use crate::error::Error;
use crate::sdk::Controller;

/// Caller-supplied options, keyed in snake_case or camelCase.
pub type Params = Map<String, Value>;

/// The final argument list handed to a controller: required arguments
/// first, then declared optional parameters in declaration order, then any
/// undeclared caller options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<(String, Value)>);

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: String, value: Value) {
        self.0.push((name, value));
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Convert a key in snake_case, kebab-case, space separated or camelCase
/// form to camelCase.
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for segment in key
        .split(|c: char| matches!(c, '-' | '_' | ' '))
        .filter(|s| !s.is_empty())
    {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if out.is_empty() {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Look up `operation` on `controller`.
pub fn resolve(
    controller: &dyn Controller,
    operation: &str,
) -> Result<&'static OperationDescriptor, Error> {
    controller
        .describe(operation)
        .ok_or_else(|| Error::OperationNotFound {
            controller: controller.name(),
            operation: operation.to_string(),
        })
}

/// Merge `required` and `options` against the declared signature.
///
/// Required arguments are never checked for presence here; the controller
/// reports a missing one when invoked.
pub fn normalize(
    descriptor: &OperationDescriptor,
    required: Arguments,
    options: Params,
) -> Arguments {
    let mut supplied = canonicalize(options);
    let mut args = required;

    for (name, default) in descriptor.defaults() {
        if args.contains(name) {
            continue;
        }
        let value = supplied.remove(name).unwrap_or(default);
        args.push(name.to_string(), value);
    }

    for (name, value) in supplied {
        if args.contains(&name) {
            debug!(
                operation = descriptor.name,
                param = name.as_str(),
                "option shadowed by required argument"
            );
            continue;
        }
        args.push(name, value);
    }

    debug!(
        operation = descriptor.name,
        args = ?args.names(),
        "normalized arguments"
    );
    args
}

fn canonicalize(options: Params) -> BTreeMap<String, Value> {
    let mut entries: Vec<(String, Value)> = options.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = BTreeMap::new();
    for (key, value) in entries {
        let name = camelize(&key);
        if out.insert(name.clone(), value).is_some() {
            warn!(
                key = key.as_str(),
                param = name.as_str(),
                "option key collides with another spelling, last one wins"
            );
        }
    }
    out
}
