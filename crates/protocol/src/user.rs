//! User types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Motion user.
///
/// Appears on its own (`/users/me`) and embedded in tasks as creator or
/// assignee.
///
/// # Examples
///
/// ```
/// use motion_protocol::User;
///
/// let user: User = serde_json::from_str(r#"{"id": "u_1", "email": "ada@example.com"}"#).unwrap();
/// assert_eq!(user.display_name(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Full name, when the user has set one.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Returns the best human-readable identifier for this user.
    ///
    /// Prefers the name, then the email, then the raw id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
