use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::endpoint::{Endpoint, Method, PLACEHOLDER_DELIMITER};
use crate::error::UsageError;
use crate::schema::ValueKind;

/// How parameter keys outside an endpoint's allow-list are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Unknown keys are dropped silently
    #[default]
    Permissive,
    /// Unknown keys fail the call with `UsageError::DisallowedKey`
    Strict,
}

/// Values for the `:name:` placeholders of a path template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments(BTreeMap<String, String>);

impl Segments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Fill names missing from `self` with `defaults`; values already present win.
    pub fn or_defaults(mut self, defaults: &Segments) -> Self {
        for (name, value) in &defaults.0 {
            self.0.entry(name.clone()).or_insert_with(|| value.clone());
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Caller-supplied query or body parameters, filtered against the endpoint's allow-list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Non-object values yield an empty parameter set.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A fully addressed request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Resolve the path template and filter parameters for one call.
///
/// `body` is an explicit payload for POST/PUT endpoints; when present it replaces
/// the parameter object as the request body.
pub fn bind(
    endpoint: &Endpoint,
    segments: &Segments,
    params: &Params,
    body: Option<Value>,
    policy: KeyPolicy,
) -> Result<PreparedRequest, UsageError> {
    let path = resolve_path(endpoint.path_template, segments)?;
    let accepted = filter_params(endpoint, params, policy)?;

    if body.is_some() && !endpoint.method.has_body() {
        return Err(UsageError::InvalidBody {
            endpoint: endpoint.name.to_string(),
        });
    }

    let (query, body) = if endpoint.method.has_body() {
        let body = match body {
            Some(payload) => Some(payload),
            None if accepted.is_empty() => None,
            None => Some(Value::Object(
                accepted.into_iter().map(|(k, _, v)| (k, v)).collect(),
            )),
        };
        (Vec::new(), body)
    } else {
        let query = accepted
            .into_iter()
            .map(|(k, kind, v)| {
                let rendered = query_value(kind, &v);
                (k, rendered)
            })
            .collect();
        (query, None)
    };

    Ok(PreparedRequest {
        method: endpoint.method,
        path,
        query,
        body,
    })
}

/// Literal substitution of every `:name:` segment.
pub fn resolve_path(template: &str, segments: &Segments) -> Result<String, UsageError> {
    let mut resolved = Vec::new();
    let mut used = Vec::new();

    for part in template.split('/') {
        let name = part
            .strip_prefix(PLACEHOLDER_DELIMITER)
            .and_then(|p| p.strip_suffix(PLACEHOLDER_DELIMITER))
            .filter(|name| !name.is_empty());

        match name {
            Some(name) => {
                let value = segments.get(name).ok_or_else(|| UsageError::MissingSegment {
                    name: name.to_string(),
                    template: template.to_string(),
                })?;
                used.push(name);
                resolved.push(value);
            }
            None => resolved.push(part),
        }
    }

    let ignored: Vec<&str> = segments.names().filter(|n| !used.contains(n)).collect();
    if !ignored.is_empty() {
        tracing::debug!(template, ?ignored, "Ignoring unreferenced path segments");
    }

    Ok(resolved.join("/"))
}

fn filter_params(
    endpoint: &Endpoint,
    params: &Params,
    policy: KeyPolicy,
) -> Result<Vec<(String, ValueKind, Value)>, UsageError> {
    let mut accepted = Vec::new();
    let mut dropped = Vec::new();

    for (key, value) in params.iter() {
        match endpoint.key_schema.and_then(|schema| schema.kind_of(key)) {
            Some(kind) => accepted.push((key.clone(), kind, value.clone())),
            None if policy == KeyPolicy::Strict => {
                return Err(UsageError::DisallowedKey {
                    key: key.clone(),
                    endpoint: endpoint.name.to_string(),
                });
            }
            None => dropped.push(key.as_str()),
        }
    }

    if !dropped.is_empty() {
        tracing::debug!(endpoint = endpoint.name, ?dropped, "Dropping parameters outside allow-list");
    }

    Ok(accepted)
}

fn query_value(kind: ValueKind, value: &Value) -> String {
    match value {
        Value::String(s) if !kind.is_structured() => s.clone(),
        other => other.to_string(),
    }
}
