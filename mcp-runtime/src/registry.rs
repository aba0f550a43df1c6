use serde::Serialize;
use serde_json::{Value, json};
use taskbridge_core::error::GatewayError;

use crate::client::{RemoteClient, RemoteRequest};
use crate::hierarchy::{HierarchyFilters, fetch_spaces_with_hierarchy};
use crate::inputs::{
    AssignUserInput, ChangeStatusInput, CommentTaskInput, CreateTaskInput, FindMemberInput,
    FolderInput, HierarchyInput, ListInput, ListTasksInput, SearchTasksInput, SpaceInput,
    TaskFields, TaskInput, TeamInput, UpdateTaskInput, check_path_segment, input_object,
    parse_input, require, require_id,
};
use crate::members::{fetch_members, find_member_by_name};
use crate::tools::{ToolDescriptor, ToolKind, ToolSummary, tool_definitions};
use crate::util::json_to_map;

/// Immutable name → handler table over one remote client.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    client: RemoteClient,
}

impl ToolRegistry {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            tools: tool_definitions(),
            client,
        }
    }

    pub fn list(&self) -> Vec<ToolSummary> {
        self.tools.iter().map(ToolDescriptor::summary).collect()
    }

    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Run tool `name`. Unknown names and invalid input fail before any
    /// remote call is made.
    pub async fn invoke(&self, name: &str, input: Option<Value>) -> Result<Value, GatewayError> {
        let kind = self
            .descriptor(name)
            .map(|tool| tool.kind)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_string()))?;
        let input = input_object(input)?;

        match kind {
            ToolKind::GetSpace => self.get_space(parse_input(input)?).await,
            ToolKind::GetSpaces => self.get_spaces(parse_input(input)?).await,
            ToolKind::GetFolders => self.get_folders(parse_input(input)?).await,
            ToolKind::GetLists => self.get_lists(parse_input(input)?).await,
            ToolKind::GetFolderlessLists => self.get_folderless_lists(parse_input(input)?).await,
            ToolKind::GetList => self.get_list(parse_input(input)?).await,
            ToolKind::GetWorkspaceHierarchy => self.get_workspace_hierarchy(parse_input(input)?).await,
            ToolKind::GetTask => self.get_task(parse_input(input)?).await,
            ToolKind::GetTasks => self.get_tasks(parse_input(input)?).await,
            ToolKind::SearchTasks => self.search_tasks(parse_input(input)?).await,
            ToolKind::CreateTask => self.create_task(parse_input(input)?).await,
            ToolKind::UpdateTask => self.update_task(parse_input(input)?).await,
            ToolKind::ChangeStatus => self.change_status(parse_input(input)?).await,
            ToolKind::AssignUser => self.assign_user(parse_input(input)?).await,
            ToolKind::CommentTask => self.comment_task(parse_input(input)?).await,
            ToolKind::GetTaskComments => self.get_task_comments(parse_input(input)?).await,
            ToolKind::GetMembers => self.get_members(parse_input(input)?).await,
            ToolKind::FindMemberByName => self.find_member_by_name(parse_input(input)?).await,
        }
    }

    /// Explicit id, else the configured default, else [`GatewayError::UnresolvedTeam`].
    fn resolve_team_id(&self, explicit: Option<String>) -> Result<String, GatewayError> {
        let team_id = explicit
            .or_else(|| self.client.config().default_team_id.clone())
            .ok_or(GatewayError::UnresolvedTeam)?;
        check_path_segment(&team_id, "team_id")?;
        Ok(team_id)
    }

    async fn get_space(&self, input: SpaceInput) -> Result<Value, GatewayError> {
        let space_id = require_id(input.space_id, "space_id")?;
        self.client
            .call(RemoteRequest::get(["space", space_id.as_str()]))
            .await
    }

    async fn get_spaces(&self, input: TeamInput) -> Result<Value, GatewayError> {
        let team_id = self.resolve_team_id(input.team_id)?;
        self.client
            .call(
                RemoteRequest::get(["team", team_id.as_str(), "space"])
                    .with_query(archived_query(input.archived)),
            )
            .await
    }

    async fn get_folders(&self, input: SpaceInput) -> Result<Value, GatewayError> {
        let space_id = require_id(input.space_id, "space_id")?;
        self.client
            .call(
                RemoteRequest::get(["space", space_id.as_str(), "folder"])
                    .with_query(archived_query(input.archived)),
            )
            .await
    }

    async fn get_lists(&self, input: FolderInput) -> Result<Value, GatewayError> {
        let folder_id = require_id(input.folder_id, "folder_id")?;
        self.client
            .call(
                RemoteRequest::get(["folder", folder_id.as_str(), "list"])
                    .with_query(archived_query(input.archived)),
            )
            .await
    }

    async fn get_folderless_lists(&self, input: SpaceInput) -> Result<Value, GatewayError> {
        let space_id = require_id(input.space_id, "space_id")?;
        self.client
            .call(
                RemoteRequest::get(["space", space_id.as_str(), "list"])
                    .with_query(archived_query(input.archived)),
            )
            .await
    }

    async fn get_list(&self, input: ListInput) -> Result<Value, GatewayError> {
        let list_id = require_id(input.list_id, "list_id")?;
        self.client
            .call(RemoteRequest::get(["list", list_id.as_str()]))
            .await
    }

    async fn get_workspace_hierarchy(&self, input: HierarchyInput) -> Result<Value, GatewayError> {
        let team_id = self.resolve_team_id(input.team_id)?;
        let filters = HierarchyFilters::new(input.space_name, input.folder_name, input.list_name);
        let hierarchy = fetch_spaces_with_hierarchy(
            &self.client,
            &team_id,
            input.include_archived.unwrap_or(false),
            &filters,
        )
        .await?;
        to_result(&hierarchy)
    }

    async fn get_task(&self, input: TaskInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        self.client
            .call(RemoteRequest::get(["task", task_id.as_str()]))
            .await
    }

    async fn get_tasks(&self, input: ListTasksInput) -> Result<Value, GatewayError> {
        let list_id = require_id(input.list_id, "list_id")?;
        let query = json_to_map(json!({
            "archived": input.archived,
            "page": input.page,
            "order_by": input.order_by,
            "reverse": input.reverse,
            "subtasks": input.subtasks,
            "include_closed": input.include_closed,
            "statuses[]": input.statuses,
            "assignees[]": input.assignees,
        }));
        self.client
            .call(RemoteRequest::get(["list", list_id.as_str(), "task"]).with_query(query))
            .await
    }

    async fn search_tasks(&self, input: SearchTasksInput) -> Result<Value, GatewayError> {
        let team_id = self.resolve_team_id(input.team_id)?;
        let query = json_to_map(json!({
            "page": input.page,
            "order_by": input.order_by,
            "reverse": input.reverse,
            "query": input.query,
            "subtasks": input.subtasks,
            "include_closed": input.include_closed,
            "statuses[]": input.statuses,
            "assignees[]": input.assignees,
            "tags[]": input.tags,
            "list_ids[]": input.list_ids,
            "space_ids[]": input.space_ids,
        }));
        self.client
            .call(RemoteRequest::get(["team", team_id.as_str(), "task"]).with_query(query))
            .await
    }

    async fn create_task(&self, input: CreateTaskInput) -> Result<Value, GatewayError> {
        let list_id = require_id(input.list_id, "list_id")?;
        let name = require(input.fields.name.clone(), "name")?;
        let body = task_body(TaskFields {
            name: Some(name),
            ..input.fields
        });
        self.client
            .call(RemoteRequest::post(["list", list_id.as_str(), "task"]).with_body(body))
            .await
    }

    async fn update_task(&self, input: UpdateTaskInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        self.client
            .call(RemoteRequest::put(["task", task_id.as_str()]).with_body(task_body(input.fields)))
            .await
    }

    async fn change_status(&self, input: ChangeStatusInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        let status = require(input.status, "status")?;
        self.client
            .call(
                RemoteRequest::put(["task", task_id.as_str()])
                    .with_body(json_to_map(json!({ "status": status }))),
            )
            .await
    }

    async fn assign_user(&self, input: AssignUserInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        let assignees = input
            .assignees
            .filter(|assignees| !assignees.is_empty())
            .ok_or_else(|| GatewayError::Validation {
                message: "assignees array is required".to_string(),
                field: Some("assignees".to_string()),
            })?;
        self.client
            .call(
                RemoteRequest::put(["task", task_id.as_str()])
                    .with_body(json_to_map(json!({ "assignees": assignees }))),
            )
            .await
    }

    async fn comment_task(&self, input: CommentTaskInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        let text = require(input.text, "text")?;
        self.client
            .call(
                RemoteRequest::post(["task", task_id.as_str(), "comment"]).with_body(json_to_map(
                    json!({ "comment_text": text, "notify_all": input.notify_all }),
                )),
            )
            .await
    }

    async fn get_task_comments(&self, input: TaskInput) -> Result<Value, GatewayError> {
        let task_id = require_id(input.task_id, "task_id")?;
        self.client
            .call(RemoteRequest::get(["task", task_id.as_str(), "comment"]))
            .await
    }

    async fn get_members(&self, input: TeamInput) -> Result<Value, GatewayError> {
        let team_id = self.resolve_team_id(input.team_id)?;
        to_result(&fetch_members(&self.client, &team_id).await?)
    }

    async fn find_member_by_name(&self, input: FindMemberInput) -> Result<Value, GatewayError> {
        let query = require(input.query, "query")?;
        let team_id = self.resolve_team_id(input.team_id)?;
        to_result(&find_member_by_name(&self.client, &team_id, &query).await?)
    }
}

fn archived_query(archived: Option<bool>) -> serde_json::Map<String, Value> {
    json_to_map(json!({ "archived": archived }))
}

fn task_body(fields: TaskFields) -> serde_json::Map<String, Value> {
    json_to_map(json!({
        "name": fields.name,
        "description": fields.description,
        "status": fields.status,
        "priority": fields.priority,
        "due_date": fields.due_date,
        "assignees": fields.assignees,
        "tags": fields.tags,
        "custom_fields": fields.custom_fields,
        "parent": fields.parent,
    }))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::UnexpectedShape {
        context: "result".to_string(),
        message: e.to_string(),
    })
}
