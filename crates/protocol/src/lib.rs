//! Shared Motion API types for the motion application.
//!
//! This crate defines the resource types exchanged with the Motion API,
//! along with the parameter structs used to create and update them.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`workspace`]: Workspaces, statuses and labels
//! - [`task`]: Tasks, priorities, durations and task parameters
//! - [`project`]: Projects and project parameters
//! - [`user`]: Users
//! - [`comment`]: Task comments
//! - [`schedule`]: Work schedules
//! - [`custom_field`]: Custom fields and custom field values
//! - [`recurring`]: Recurring task templates
//! - [`page`]: Paginated list responses
//! - [`error`]: Error types for protocol operations
//!
//! Remote payloads carry more fields than are modelled here. Every resource
//! keeps the fields it does not know about in an `extra` map, so a payload
//! read from the API serializes back out without losing anything.
//!
//! # Examples
//!
//! ```
//! use motion_protocol::{Priority, TaskCreate};
//!
//! let params = TaskCreate {
//!     priority: Some(Priority::High),
//!     ..TaskCreate::new("Write release notes", "ws_123")
//! };
//! assert!(params.validate().is_ok());
//! ```

pub mod comment;
pub mod custom_field;
pub mod error;
pub mod page;
pub mod project;
pub mod recurring;
pub mod schedule;
pub mod task;
pub mod user;
pub mod workspace;

mod nullable;

// Re-export primary types at crate root for convenience
pub use comment::{Comment, CommentCreate};
pub use custom_field::{CustomField, CustomFieldCreate, CustomFieldType, CustomFieldValueAssignment};
pub use error::{ProtocolError, Result};
pub use page::{Page, PageMeta};
pub use project::{Project, ProjectCreate, ProjectUpdate};
pub use recurring::{RecurringTask, RecurringTaskCreate, RecurringTaskUpdate};
pub use schedule::{Schedule, TimeRange};
pub use task::{AutoScheduled, DeadlineType, Priority, Task, TaskCreate, TaskDuration, TaskUpdate};
pub use user::User;
pub use workspace::{Label, Status, Workspace};
