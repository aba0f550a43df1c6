//! Typed tool inputs. Field names follow the published input schemas
//! (snake_case); the camelCase spellings older clients send are accepted as
//! aliases. Required fields are `Option` here and checked with [`require`]
//! so that a missing field reports `"<field> is required"` instead of a serde
//! message.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use taskbridge_core::error::GatewayError;
use taskbridge_core::ids::deserialize_optional_id;

/// Absent or `null` input becomes `{}`; anything but an object is rejected.
pub fn input_object(input: Option<Value>) -> Result<Value, GatewayError> {
    match input {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(value @ Value::Object(_)) => Ok(value),
        Some(_) => Err(GatewayError::validation("input must be a JSON object")),
    }
}

pub fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, GatewayError> {
    serde_json::from_value(input)
        .map_err(|e| GatewayError::validation(format!("invalid input: {e}")))
}

pub fn require(value: Option<String>, field: &str) -> Result<String, GatewayError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GatewayError::required(field))
}

/// [`require`] for values that become a URL path segment. `.` and `..` are
/// rejected: URL normalisation would drop them and the call would reach a
/// different endpoint.
pub fn require_id(value: Option<String>, field: &str) -> Result<String, GatewayError> {
    let id = require(value, field)?;
    check_path_segment(&id, field)?;
    Ok(id)
}

pub fn check_path_segment(value: &str, field: &str) -> Result<(), GatewayError> {
    if matches!(value, "." | "..") {
        return Err(GatewayError::Validation {
            message: format!("{field} must not be '{value}'"),
            field: Some(field.to_string()),
        });
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct SpaceInput {
    #[serde(default, alias = "spaceId", deserialize_with = "deserialize_optional_id")]
    pub space_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FolderInput {
    #[serde(default, alias = "folderId", deserialize_with = "deserialize_optional_id")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListInput {
    #[serde(default, alias = "listId", deserialize_with = "deserialize_optional_id")]
    pub list_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskInput {
    #[serde(default, alias = "taskId", deserialize_with = "deserialize_optional_id")]
    pub task_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamInput {
    #[serde(default, alias = "teamId", deserialize_with = "deserialize_optional_id")]
    pub team_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HierarchyInput {
    #[serde(default, alias = "teamId", deserialize_with = "deserialize_optional_id")]
    pub team_id: Option<String>,
    #[serde(default, alias = "includeArchived")]
    pub include_archived: Option<bool>,
    #[serde(default, alias = "spaceName")]
    pub space_name: Option<String>,
    #[serde(default, alias = "folderName")]
    pub folder_name: Option<String>,
    #[serde(default, alias = "listName")]
    pub list_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksInput {
    #[serde(default, alias = "listId", deserialize_with = "deserialize_optional_id")]
    pub list_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default, alias = "orderBy")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub reverse: Option<bool>,
    #[serde(default)]
    pub subtasks: Option<bool>,
    #[serde(default, alias = "includeClosed")]
    pub include_closed: Option<bool>,
    #[serde(default)]
    pub statuses: Option<Vec<String>>,
    #[serde(default)]
    pub assignees: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchTasksInput {
    #[serde(default, alias = "teamId", deserialize_with = "deserialize_optional_id")]
    pub team_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default, alias = "orderBy")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub reverse: Option<bool>,
    #[serde(default)]
    pub subtasks: Option<bool>,
    #[serde(default, alias = "includeClosed")]
    pub include_closed: Option<bool>,
    #[serde(default)]
    pub statuses: Option<Vec<String>>,
    #[serde(default)]
    pub assignees: Option<Vec<Value>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "listIds")]
    pub list_ids: Option<Vec<Value>>,
    #[serde(default, alias = "spaceIds")]
    pub space_ids: Option<Vec<Value>>,
}

/// Task fields shared by create and update.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<Value>,
    #[serde(default)]
    pub assignees: Option<Vec<Value>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub custom_fields: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub parent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskInput {
    #[serde(default, alias = "listId", deserialize_with = "deserialize_optional_id")]
    pub list_id: Option<String>,
    #[serde(flatten)]
    pub fields: TaskFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskInput {
    #[serde(default, alias = "taskId", deserialize_with = "deserialize_optional_id")]
    pub task_id: Option<String>,
    #[serde(flatten)]
    pub fields: TaskFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangeStatusInput {
    #[serde(default, alias = "taskId", deserialize_with = "deserialize_optional_id")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignUserInput {
    #[serde(default, alias = "taskId", deserialize_with = "deserialize_optional_id")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub assignees: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentTaskInput {
    #[serde(default, alias = "taskId", deserialize_with = "deserialize_optional_id")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "notifyAll")]
    pub notify_all: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FindMemberInput {
    #[serde(default, alias = "teamId", deserialize_with = "deserialize_optional_id")]
    pub team_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}
