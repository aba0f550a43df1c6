use serde::Serialize;
use serde_json::{Value, json};

/// Handler selector for a descriptor. The registry matches on this in `invoke`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetSpace,
    GetSpaces,
    GetFolders,
    GetLists,
    GetFolderlessLists,
    GetList,
    GetWorkspaceHierarchy,
    GetTask,
    GetTasks,
    SearchTasks,
    CreateTask,
    UpdateTask,
    ChangeStatus,
    AssignUser,
    CommentTask,
    GetTaskComments,
    GetMembers,
    FindMemberByName,
}

#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
    pub kind: ToolKind,
}

/// Public view of a descriptor; the handler is never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(rename = "outputSchema")]
    pub output_schema: Value,
}

impl ToolDescriptor {
    pub fn summary(&self) -> ToolSummary {
        ToolSummary {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
        }
    }
}

fn id_schema(description: &str) -> Value {
    json!({
        "type": ["string", "integer"],
        "description": description
    })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn remote_document(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": true
    })
}

fn task_field_properties() -> serde_json::Map<String, Value> {
    let properties = json!({
        "name": { "type": "string" },
        "description": { "type": "string", "description": "Plain-text or markdown description" },
        "status": { "type": "string", "description": "Status name as configured on the list" },
        "priority": {
            "type": ["integer", "null"],
            "minimum": 1,
            "maximum": 4,
            "description": "1 urgent, 2 high, 3 normal, 4 low"
        },
        "due_date": {
            "type": ["integer", "string"],
            "description": "Due date as Unix epoch milliseconds"
        },
        "assignees": {
            "type": "array",
            "items": { "type": ["integer", "string"] },
            "description": "User ids"
        },
        "tags": { "type": "array", "items": { "type": "string" } },
        "custom_fields": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": { "id": { "type": "string" }, "value": {} },
                "required": ["id"]
            }
        },
        "parent": id_schema("Parent task id, making this task a subtask")
    });
    match properties {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

fn task_filter_properties() -> Value {
    json!({
        "page": { "type": "integer", "minimum": 0 },
        "order_by": {
            "type": "string",
            "enum": ["id", "created", "updated", "due_date"]
        },
        "reverse": { "type": "boolean" },
        "subtasks": { "type": "boolean" },
        "include_closed": { "type": "boolean" },
        "statuses": { "type": "array", "items": { "type": "string" } },
        "assignees": { "type": "array", "items": { "type": ["integer", "string"] } }
    })
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

fn list_node_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "id": { "type": "string" }, "name": { "type": "string" } },
        "required": ["id", "name"]
    })
}

fn hierarchy_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "team_id": { "type": "string" },
            "spaces": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "folders": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "string" },
                                    "name": { "type": "string" },
                                    "lists": { "type": "array", "items": list_node_schema() }
                                },
                                "required": ["id", "name", "lists"]
                            }
                        },
                        "lists": { "type": "array", "items": list_node_schema() }
                    },
                    "required": ["id", "name", "folders", "lists"]
                }
            }
        },
        "required": ["team_id", "spaces"]
    })
}

/// The fixed tool table. Built once per registry; never mutated.
pub fn tool_definitions() -> Vec<ToolDescriptor> {
    let team_id = id_schema("Workspace (team) id; defaults to CLICKUP_TEAM_ID");
    let archived = json!({ "type": "boolean", "default": false });

    vec![
        ToolDescriptor {
            name: "get_space",
            description: "Fetch a single space by id.",
            input_schema: object_schema(
                json!({ "space_id": id_schema("Space id") }),
                &["space_id"],
            ),
            output_schema: remote_document("Space document"),
            kind: ToolKind::GetSpace,
        },
        ToolDescriptor {
            name: "get_spaces",
            description: "List the spaces of a workspace.",
            input_schema: object_schema(
                json!({ "team_id": team_id, "archived": archived }),
                &[],
            ),
            output_schema: remote_document("{ spaces: [...] }"),
            kind: ToolKind::GetSpaces,
        },
        ToolDescriptor {
            name: "get_folders",
            description: "List the folders of a space, each with its lists.",
            input_schema: object_schema(
                json!({ "space_id": id_schema("Space id"), "archived": archived }),
                &["space_id"],
            ),
            output_schema: remote_document("{ folders: [...] }"),
            kind: ToolKind::GetFolders,
        },
        ToolDescriptor {
            name: "get_lists",
            description: "List the lists inside a folder.",
            input_schema: object_schema(
                json!({ "folder_id": id_schema("Folder id"), "archived": archived }),
                &["folder_id"],
            ),
            output_schema: remote_document("{ lists: [...] }"),
            kind: ToolKind::GetLists,
        },
        ToolDescriptor {
            name: "get_folderless_lists",
            description: "List the lists that sit directly in a space, outside any folder.",
            input_schema: object_schema(
                json!({ "space_id": id_schema("Space id"), "archived": archived }),
                &["space_id"],
            ),
            output_schema: remote_document("{ lists: [...] }"),
            kind: ToolKind::GetFolderlessLists,
        },
        ToolDescriptor {
            name: "get_list",
            description: "Fetch a single list by id.",
            input_schema: object_schema(json!({ "list_id": id_schema("List id") }), &["list_id"]),
            output_schema: remote_document("List document"),
            kind: ToolKind::GetList,
        },
        ToolDescriptor {
            name: "get_workspace_hierarchy",
            description: "Spaces, folders and lists of a workspace in one tree. Optional case-insensitive name filters cascade: a matching list keeps its folder even when the folder name does not match.",
            input_schema: object_schema(
                json!({
                    "team_id": team_id,
                    "include_archived": archived,
                    "space_name": { "type": "string", "description": "Substring of the space name" },
                    "folder_name": { "type": "string", "description": "Substring of the folder name" },
                    "list_name": { "type": "string", "description": "Substring of the list name" }
                }),
                &[],
            ),
            output_schema: hierarchy_output_schema(),
            kind: ToolKind::GetWorkspaceHierarchy,
        },
        ToolDescriptor {
            name: "get_task",
            description: "Fetch a single task by id.",
            input_schema: object_schema(json!({ "task_id": id_schema("Task id") }), &["task_id"]),
            output_schema: remote_document("Task document"),
            kind: ToolKind::GetTask,
        },
        ToolDescriptor {
            name: "get_tasks",
            description: "List the tasks of a list (one page).",
            input_schema: object_schema(
                merge(
                    json!({ "list_id": id_schema("List id"), "archived": archived }),
                    task_filter_properties(),
                ),
                &["list_id"],
            ),
            output_schema: remote_document("{ tasks: [...] }"),
            kind: ToolKind::GetTasks,
        },
        ToolDescriptor {
            name: "search_tasks",
            description: "Search tasks across a workspace (one page).",
            input_schema: object_schema(
                merge(
                    json!({
                        "team_id": team_id,
                        "query": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } },
                        "list_ids": { "type": "array", "items": { "type": ["integer", "string"] } },
                        "space_ids": { "type": "array", "items": { "type": ["integer", "string"] } }
                    }),
                    task_filter_properties(),
                ),
                &[],
            ),
            output_schema: remote_document("{ tasks: [...] }"),
            kind: ToolKind::SearchTasks,
        },
        ToolDescriptor {
            name: "create_task",
            description: "Create a task in a list.",
            input_schema: object_schema(
                merge(
                    json!({ "list_id": id_schema("List id") }),
                    Value::Object(task_field_properties()),
                ),
                &["list_id", "name"],
            ),
            output_schema: remote_document("Created task document"),
            kind: ToolKind::CreateTask,
        },
        ToolDescriptor {
            name: "update_task",
            description: "Update fields of an existing task. Omitted fields are left unchanged.",
            input_schema: object_schema(
                merge(
                    json!({ "task_id": id_schema("Task id") }),
                    Value::Object(task_field_properties()),
                ),
                &["task_id"],
            ),
            output_schema: remote_document("Updated task document"),
            kind: ToolKind::UpdateTask,
        },
        ToolDescriptor {
            name: "change_status",
            description: "Move a task to another status.",
            input_schema: object_schema(
                json!({ "task_id": id_schema("Task id"), "status": { "type": "string" } }),
                &["task_id", "status"],
            ),
            output_schema: remote_document("Updated task document"),
            kind: ToolKind::ChangeStatus,
        },
        ToolDescriptor {
            name: "assign_user",
            description: "Set the assignees of a task.",
            input_schema: object_schema(
                json!({
                    "task_id": id_schema("Task id"),
                    "assignees": {
                        "type": "array",
                        "items": { "type": ["integer", "string"] },
                        "minItems": 1,
                        "description": "User ids"
                    }
                }),
                &["task_id", "assignees"],
            ),
            output_schema: remote_document("Updated task document"),
            kind: ToolKind::AssignUser,
        },
        ToolDescriptor {
            name: "comment_task",
            description: "Add a comment to a task.",
            input_schema: object_schema(
                json!({
                    "task_id": id_schema("Task id"),
                    "text": { "type": "string" },
                    "notify_all": { "type": "boolean" }
                }),
                &["task_id", "text"],
            ),
            output_schema: remote_document("Created comment reference"),
            kind: ToolKind::CommentTask,
        },
        ToolDescriptor {
            name: "get_task_comments",
            description: "List the comments on a task.",
            input_schema: object_schema(json!({ "task_id": id_schema("Task id") }), &["task_id"]),
            output_schema: remote_document("{ comments: [...] }"),
            kind: ToolKind::GetTaskComments,
        },
        ToolDescriptor {
            name: "get_members",
            description: "Members and guests of a workspace.",
            input_schema: object_schema(json!({ "team_id": team_id }), &[]),
            output_schema: json!({
                "type": "object",
                "properties": {
                    "team_id": { "type": "string" },
                    "name": { "type": "string" },
                    "members": { "type": "array", "items": { "type": "object" } },
                    "guests": { "type": "array", "items": { "type": "object" } }
                },
                "required": ["team_id", "name", "members", "guests"]
            }),
            kind: ToolKind::GetMembers,
        },
        ToolDescriptor {
            name: "find_member_by_name",
            description: "Workspace members whose username or email contains the query (case-insensitive).",
            input_schema: object_schema(
                json!({ "team_id": team_id, "query": { "type": "string" } }),
                &["query"],
            ),
            output_schema: json!({
                "type": "object",
                "properties": {
                    "team_id": { "type": "string" },
                    "matches": { "type": "array", "items": { "type": "object" } }
                },
                "required": ["team_id", "matches"]
            }),
            kind: ToolKind::FindMemberByName,
        },
    ]
}
