//! Response envelope decoding.
//!
//! The backend is not consistent about how it wraps payloads. A list may come
//! back bare, as `{"data": [...]}`, or as a Laravel paginator with the page
//! counters either beside `data` or nested under `meta`. Single resources may
//! be bare or wrapped in `data`. Everything is normalized here so callers only
//! ever see a [`Page`] or a `T`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced while unwrapping a response body.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The body was not a list in any supported shape.
    #[error("expected a list payload, got {0}")]
    NotAList(&'static str),

    /// The list or object had the wrong element shape.
    #[error("payload shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Wrap an unpaginated list as a single page.
    #[must_use]
    pub fn single_page(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            items,
            current_page: 1,
            last_page: 1,
            per_page: u32::try_from(len).unwrap_or(u32::MAX),
            total: len as u64,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A page counter given as a number or a numeric string.
///
/// Each counter is read on its own so one odd value never hides the rest.
fn counter<N: TryFrom<u64>>(meta: &Value, key: &str) -> Option<N> {
    let raw = match meta.get(key)? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    N::try_from(raw).ok()
}

/// Decode a list payload in any supported envelope.
///
/// # Errors
///
/// Returns [`EnvelopeError::NotAList`] when the body is not list-shaped and
/// [`EnvelopeError::Shape`] when the elements do not match `T`.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Page<T>, EnvelopeError> {
    match body {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(body)?;
            Ok(Page::single_page(items))
        }
        Value::Object(mut map) => {
            let data = match map.remove("data") {
                Some(data @ Value::Array(_)) => data,
                // Resource collections nest the paginator one level down.
                Some(Value::Object(inner)) if inner.get("data").is_some_and(Value::is_array) => {
                    return decode_list(Value::Object(inner));
                }
                Some(other) => return Err(EnvelopeError::NotAList(kind(&other))),
                None => return Err(EnvelopeError::NotAList("object without data")),
            };
            let items: Vec<T> = serde_json::from_value(data)?;

            let meta = &map
                .remove("meta")
                .filter(Value::is_object)
                .unwrap_or(Value::Object(map));

            let len = items.len();
            let current_page = counter::<u32>(meta, "current_page").unwrap_or(1).max(1);
            Ok(Page {
                items,
                current_page,
                last_page: counter::<u32>(meta, "last_page")
                    .unwrap_or(current_page)
                    .max(current_page),
                per_page: counter(meta, "per_page")
                    .unwrap_or_else(|| u32::try_from(len).unwrap_or(u32::MAX)),
                total: counter(meta, "total").unwrap_or(len as u64),
            })
        }
        other => Err(EnvelopeError::NotAList(kind(&other))),
    }
}

/// Decode a single resource, bare or wrapped in `data`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Shape`] when the object does not match `T`.
pub fn decode_one<T: DeserializeOwned>(body: Value) -> Result<T, EnvelopeError> {
    let inner = match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(inner)?)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field errors from a 422 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "errors")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Parse a 422 body. Unparseable bodies yield an empty set with the raw
    /// text (truncated) as the message.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: Some(body.chars().take(200).collect()),
            fields: BTreeMap::new(),
        })
    }

    /// Record a locally detected error.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// First message for a field.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every message, field messages first, for flash display.
    #[must_use]
    pub fn all_messages(&self) -> Vec<String> {
        let mut out: Vec<String> = self.fields.values().flatten().cloned().collect();
        if out.is_empty()
            && let Some(message) = &self.message
        {
            out.push(message.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_bare_array() {
        let page: Page<Item> = decode_list(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
        assert!(!page.has_next());
    }

    #[test]
    fn test_flat_laravel_paginator() {
        let page: Page<Item> = decode_list(json!({
            "current_page": 2,
            "data": [{"id": 3}],
            "last_page": 4,
            "per_page": 1,
            "total": 4
        }))
        .unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.last_page, 4);
        assert!(page.has_next());
        assert!(page.has_prev());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_resource_collection_with_meta() {
        let page: Page<Item> = decode_list(json!({
            "data": [{"id": 1}],
            "links": {},
            "meta": {"current_page": 1, "last_page": 3, "per_page": 1, "total": 3}
        }))
        .unwrap();
        assert_eq!(page.last_page, 3);
    }

    #[test]
    fn test_string_counters_are_parsed_individually() {
        let page: Page<Item> = decode_list(json!({
            "data": [{"id": 1}],
            "current_page": "2",
            "last_page": 5,
            "per_page": "15",
            "total": "bogus"
        }))
        .unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.last_page, 5);
        assert_eq!(page.per_page, 15);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_nested_paginator_under_data() {
        let page: Page<Item> = decode_list(json!({
            "success": true,
            "data": {"data": [{"id": 5}], "current_page": 1, "last_page": 2, "total": 2}
        }))
        .unwrap();
        assert_eq!(page.items, vec![Item { id: 5 }]);
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn test_non_list_payloads_are_rejected() {
        assert!(matches!(
            decode_list::<Item>(json!({"data": {"id": 1}})),
            Err(EnvelopeError::NotAList("object"))
        ));
        assert!(matches!(
            decode_list::<Item>(json!({"message": "oops"})),
            Err(EnvelopeError::NotAList(_))
        ));
        assert!(matches!(
            decode_list::<Item>(json!("nope")),
            Err(EnvelopeError::NotAList("string"))
        ));
    }

    #[test]
    fn test_last_page_never_below_current() {
        let page: Page<Item> =
            decode_list(json!({"data": [], "current_page": 3, "last_page": 1})).unwrap();
        assert_eq!(page.last_page, 3);
    }

    #[test]
    fn test_decode_one_bare_and_wrapped() {
        let a: Item = decode_one(json!({"id": 1})).unwrap();
        let b: Item = decode_one(json!({"data": {"id": 1}})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_errors_parse() {
        let errors = ValidationErrors::from_body(
            r#"{"message":"The given data was invalid.","errors":{"email":["The email field is required."]}}"#,
        );
        assert_eq!(errors.first("email"), Some("The email field is required."));
        assert_eq!(errors.first("name"), None);
        assert_eq!(errors.all_messages().len(), 1);
    }

    #[test]
    fn test_validation_errors_fallback_message() {
        let errors = ValidationErrors::from_body("<html>bad gateway</html>");
        assert!(errors.is_empty());
        assert_eq!(errors.all_messages(), vec!["<html>bad gateway</html>".to_string()]);
    }
}
