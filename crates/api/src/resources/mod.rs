//! Typed resource methods on [`MotionClient`](crate::MotionClient).
//!
//! Each submodule adds an `impl MotionClient` block for one resource. The
//! methods only pick the verb, path and query; everything else happens in
//! [`MotionClient::request`](crate::MotionClient::request).

pub mod comments;
pub mod custom_fields;
pub mod projects;
pub mod recurring_tasks;
pub mod schedules;
pub mod statuses;
pub mod tasks;
pub mod users;
pub mod workspaces;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in path segments: everything but unreserved ones.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a caller-supplied ID for use as one path segment.
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Accumulates query parameters, skipping unset ones.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub(crate) fn opt(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub(crate) fn each(mut self, key: &str, values: &[String]) -> Self {
        self.0
            .extend(values.iter().map(|v| (key.to_string(), v.clone())));
        self
    }

    pub(crate) fn build(self) -> Vec<(String, String)> {
        self.0
    }
}
