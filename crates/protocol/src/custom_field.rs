//! Custom field types.
//!
//! Custom fields are defined per workspace and then given values on
//! individual tasks or projects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};

/// The kind of value a custom field holds.
///
/// # Examples
///
/// ```
/// use motion_protocol::CustomFieldType;
///
/// let kind: CustomFieldType = serde_json::from_str("\"multiSelect\"").unwrap();
/// assert_eq!(kind, CustomFieldType::MultiSelect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomFieldType {
    Text,
    Number,
    Url,
    Date,
    Select,
    MultiSelect,
    Person,
    MultiPerson,
    Email,
    Phone,
    Checkbox,
    RelatedTo,
    /// A type added to the API after this crate was written.
    #[serde(other)]
    Unknown,
}

impl CustomFieldType {
    /// Every type that can be requested when creating a field.
    pub const CREATABLE: [Self; 12] = [
        Self::Text,
        Self::Number,
        Self::Url,
        Self::Date,
        Self::Select,
        Self::MultiSelect,
        Self::Person,
        Self::MultiPerson,
        Self::Email,
        Self::Phone,
        Self::Checkbox,
        Self::RelatedTo,
    ];

    /// Returns the wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Url => "url",
            Self::Date => "date",
            Self::Select => "select",
            Self::MultiSelect => "multiSelect",
            Self::Person => "person",
            Self::MultiPerson => "multiPerson",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Checkbox => "checkbox",
            Self::RelatedTo => "relatedTo",
            Self::Unknown => "unknown",
        }
    }
}

/// A custom field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Unique field identifier.
    pub id: String,
    /// Field name.
    #[serde(default)]
    pub name: Option<String>,
    /// Value type. The API reports it as `field` on newer payloads.
    #[serde(rename = "type", alias = "field", default)]
    pub field_type: Option<CustomFieldType>,
    /// Type-specific metadata (e.g. options of a select field).
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for `POST /beta/workspaces/{workspaceId}/custom-fields`.
///
/// The workspace is part of the path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldCreate {
    /// Field name.
    pub name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    /// Type-specific metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CustomFieldCreate {
    /// Checks the name and that the type is one the API accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the type is unknown.
    pub fn validate(&self) -> Result<()> {
        ProtocolError::require("name", &self.name)?;
        if self.field_type == CustomFieldType::Unknown {
            return Err(ProtocolError::InvalidField {
                field: "type",
                reason: "unsupported custom field type".to_string(),
            });
        }
        Ok(())
    }
}

/// Body of a request that sets a custom field value on a task or project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValueAssignment {
    /// The custom field instance to set.
    pub custom_field_instance_id: String,
    /// The value; its shape depends on the field type.
    pub value: Value,
}
