//! Paginated list responses.
//!
//! Motion list endpoints answer with an envelope such as
//! `{"meta": {...}, "tasks": [...]}`, while a few older endpoints return a
//! bare array. [`Page::from_value`] accepts both and normalizes them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Cursor for the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination metadata, when the endpoint provides it.
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    /// Returns the cursor for the next page, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta.as_ref()?.next_cursor.as_deref()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a list response whose items live under `key`.
    ///
    /// Accepts a bare array, an object holding an array under `key` (a
    /// missing or `null` entry reads as empty), or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnexpectedListShape`] for any other shape and
    /// [`ProtocolError::DeserializationFailed`] if an item does not decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_protocol::{Page, User};
    ///
    /// let body = serde_json::json!({
    ///     "meta": {"nextCursor": "abc", "pageSize": 1},
    ///     "users": [{"id": "u_1", "email": "ada@example.com"}]
    /// });
    /// let page: Page<User> = Page::from_value(body, "users").unwrap();
    /// assert_eq!(page.len(), 1);
    /// assert_eq!(page.next_cursor(), Some("abc"));
    /// ```
    pub fn from_value(value: Value, key: &str) -> Result<Self> {
        let (items, meta) = match value {
            Value::Null => (Value::Array(Vec::new()), None),
            Value::Array(_) => (value, None),
            Value::Object(mut map) => {
                let items = match map.remove(key) {
                    None | Some(Value::Null) => Value::Array(Vec::new()),
                    Some(items @ Value::Array(_)) => items,
                    Some(_) => {
                        return Err(ProtocolError::UnexpectedListShape {
                            key: key.to_string(),
                        });
                    }
                };
                (items, map.remove("meta"))
            }
            _ => {
                return Err(ProtocolError::UnexpectedListShape {
                    key: key.to_string(),
                });
            }
        };

        let items = serde_json::from_value(items).map_err(ProtocolError::DeserializationFailed)?;
        let meta = match meta {
            None | Some(Value::Null) => None,
            Some(meta) => {
                Some(serde_json::from_value(meta).map_err(ProtocolError::DeserializationFailed)?)
            }
        };

        Ok(Self { items, meta })
    }
}
