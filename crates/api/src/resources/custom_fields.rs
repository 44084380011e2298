//! Custom field endpoints.
//!
//! These live under the API's `/beta` prefix. Field definitions are scoped
//! to a workspace; values are attached to a task or a project.

use std::fmt;

use motion_protocol::{CustomField, CustomFieldCreate, CustomFieldValueAssignment};
use serde_json::Value;
use tracing::instrument;

use super::segment;
use crate::client::MotionClient;
use crate::error::Result;

/// What a custom field value is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// A task.
    Task,
    /// A project.
    Project,
}

impl FieldTarget {
    fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn values_path(target: FieldTarget, id: &str) -> String {
    format!("/beta/custom-field-values/{target}/{}", segment(id))
}

impl MotionClient {
    /// Lists the custom fields defined in a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_custom_fields(&self, workspace_id: &str) -> Result<Vec<CustomField>> {
        let path = format!("/beta/workspaces/{}/custom-fields", segment(workspace_id));
        let page = self.list(&path, Vec::new(), "customFields").await?;
        Ok(page.items)
    }

    /// Defines a custom field in a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, params), fields(name = %params.name, field_type = params.field_type.as_str()))]
    pub async fn create_custom_field(
        &self,
        workspace_id: &str,
        params: &CustomFieldCreate,
    ) -> Result<CustomField> {
        self.post(
            &format!("/beta/workspaces/{}/custom-fields", segment(workspace_id)),
            params,
        )
        .await
    }

    /// Deletes a custom field definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_custom_field(&self, workspace_id: &str, field_id: &str) -> Result<()> {
        self.delete(&format!(
            "/beta/workspaces/{}/custom-fields/{}",
            segment(workspace_id),
            segment(field_id)
        ))
        .await
    }

    /// Sets a custom field value on a task or project and returns the
    /// API's reply unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, assignment), fields(field = %assignment.custom_field_instance_id))]
    pub async fn add_custom_field_value(
        &self,
        target: FieldTarget,
        id: &str,
        assignment: &CustomFieldValueAssignment,
    ) -> Result<Value> {
        self.post(&values_path(target, id), assignment).await
    }

    /// Removes a custom field value from a task or project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_custom_field_value(
        &self,
        target: FieldTarget,
        id: &str,
        value_id: &str,
    ) -> Result<()> {
        self.delete(&format!(
            "{}/custom-fields/{}",
            values_path(target, id),
            segment(value_id)
        ))
        .await
    }

    /// Shorthand for [`add_custom_field_value`](Self::add_custom_field_value)
    /// on a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_custom_field_to_task(
        &self,
        task_id: &str,
        assignment: &CustomFieldValueAssignment,
    ) -> Result<Value> {
        self.add_custom_field_value(FieldTarget::Task, task_id, assignment)
            .await
    }

    /// Shorthand for [`add_custom_field_value`](Self::add_custom_field_value)
    /// on a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_custom_field_to_project(
        &self,
        project_id: &str,
        assignment: &CustomFieldValueAssignment,
    ) -> Result<Value> {
        self.add_custom_field_value(FieldTarget::Project, project_id, assignment)
            .await
    }

    /// Removes a custom field value from a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_custom_field_from_task(&self, task_id: &str, value_id: &str) -> Result<()> {
        self.remove_custom_field_value(FieldTarget::Task, task_id, value_id)
            .await
    }

    /// Removes a custom field value from a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_custom_field_from_project(
        &self,
        project_id: &str,
        value_id: &str,
    ) -> Result<()> {
        self.remove_custom_field_value(FieldTarget::Project, project_id, value_id)
            .await
    }
}
