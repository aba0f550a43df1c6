//! Workspace hierarchy (space → folder → list) with cascading name filters.
//!
//! Filters are case-insensitive substrings. A space that fails `space_name`
//! is dropped before any of its children are fetched. A folder survives when
//! there is no `folder_name` filter, when its own name matches, or when at
//! least one of its lists survives `list_name`; a matching list rescues its
//! folder but never a sibling. Top-level lists only see `list_name`.
//! Remote calls are sequential and spaces keep upstream order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use taskbridge_core::error::GatewayError;
use taskbridge_core::ids::deserialize_lenient_id;

use crate::client::{RemoteClient, RemoteRequest};
use crate::util::{contains_ignore_case, json_to_map};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyFilters {
    pub space_name: Option<String>,
    pub folder_name: Option<String>,
    pub list_name: Option<String>,
}

impl HierarchyFilters {
    /// Blank filters are treated as unset.
    pub fn new(
        space_name: Option<String>,
        folder_name: Option<String>,
        list_name: Option<String>,
    ) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            space_name: keep(space_name),
            folder_name: keep(folder_name),
            list_name: keep(list_name),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamHierarchy {
    pub team_id: String,
    pub spaces: Vec<SpaceNode>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpaceNode {
    pub id: String,
    pub name: String,
    pub folders: Vec<FolderNode>,
    pub lists: Vec<ListNode>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    pub lists: Vec<ListNode>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RemoteNamed {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteFolder {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lists: Option<Vec<RemoteNamed>>,
}

#[derive(Debug, Deserialize)]
struct SpacesEnvelope {
    #[serde(default)]
    spaces: Option<Vec<RemoteNamed>>,
}

#[derive(Debug, Deserialize)]
struct FoldersEnvelope {
    #[serde(default)]
    folders: Option<Vec<RemoteFolder>>,
}

#[derive(Debug, Deserialize)]
struct ListsEnvelope {
    #[serde(default)]
    lists: Option<Vec<RemoteNamed>>,
}

impl From<RemoteNamed> for ListNode {
    fn from(remote: RemoteNamed) -> Self {
        Self {
            id: remote.id,
            name: remote.name.unwrap_or_default(),
        }
    }
}

pub async fn fetch_spaces_with_hierarchy(
    client: &RemoteClient,
    team_id: &str,
    include_archived: bool,
    filters: &HierarchyFilters,
) -> Result<TeamHierarchy, GatewayError> {
    let archived = || json_to_map(json!({ "archived": include_archived }));

    let spaces: SpacesEnvelope = decode(
        client
            .call(RemoteRequest::get(["team", team_id, "space"]).with_query(archived()))
            .await?,
        "spaces",
    )?;

    let mut nodes = Vec::new();
    for space in spaces.spaces.unwrap_or_default() {
        if !is_usable_segment(&space.id) {
            tracing::debug!(space_id = %space.id, "space without a usable id skipped");
            continue;
        }
        let space_name = space.name.unwrap_or_default();
        if !matches_filter(&space_name, filters.space_name.as_deref()) {
            tracing::debug!(space_id = %space.id, "space skipped by space_name filter");
            continue;
        }

        let folders: FoldersEnvelope = decode(
            client
                .call(
                    RemoteRequest::get(["space", space.id.as_str(), "folder"])
                        .with_query(archived()),
                )
                .await?,
            "folders",
        )?;
        let lists: ListsEnvelope = decode(
            client
                .call(
                    RemoteRequest::get(["space", space.id.as_str(), "list"])
                        .with_query(archived()),
                )
                .await?,
            "lists",
        )?;

        nodes.push(assemble_space(
            space.id,
            space_name,
            folders.folders.unwrap_or_default(),
            lists.lists.unwrap_or_default(),
            filters,
        ));
    }

    Ok(TeamHierarchy {
        team_id: team_id.to_string(),
        spaces: nodes,
    })
}

fn assemble_space(
    id: String,
    name: String,
    folders: Vec<RemoteFolder>,
    lists: Vec<RemoteNamed>,
    filters: &HierarchyFilters,
) -> SpaceNode {
    let list_filter = filters.list_name.as_deref();
    let folders = folders
        .into_iter()
        .filter_map(|folder| {
            let folder_name = folder.name.unwrap_or_default();
            let lists = filter_lists(folder.lists.unwrap_or_default(), list_filter);
            let survives = match filters.folder_name.as_deref() {
                None => true,
                Some(needle) => contains_ignore_case(&folder_name, needle) || !lists.is_empty(),
            };
            survives.then(|| FolderNode {
                id: folder.id,
                name: folder_name,
                lists,
            })
        })
        .collect();

    SpaceNode {
        id,
        name,
        folders,
        lists: filter_lists(lists, list_filter),
    }
}

fn filter_lists(lists: Vec<RemoteNamed>, needle: Option<&str>) -> Vec<ListNode> {
    lists
        .into_iter()
        .map(ListNode::from)
        .filter(|list| matches_filter(&list.name, needle))
        .collect()
}

fn is_usable_segment(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

fn matches_filter(name: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| contains_ignore_case(name, needle))
}

fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::UnexpectedShape {
        context: context.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{FakeRemote, FakeRoutes, config_for};

    fn named(id: &str, name: &str) -> RemoteNamed {
        RemoteNamed {
            id: id.to_string(),
            name: Some(name.to_string()),
        }
    }

    fn folder(id: &str, name: &str, lists: Vec<RemoteNamed>) -> RemoteFolder {
        RemoteFolder {
            id: id.to_string(),
            name: Some(name.to_string()),
            lists: Some(lists),
        }
    }

    fn filters(space: Option<&str>, folder: Option<&str>, list: Option<&str>) -> HierarchyFilters {
        HierarchyFilters::new(
            space.map(str::to_string),
            folder.map(str::to_string),
            list.map(str::to_string),
        )
    }

    #[test]
    fn folder_is_rescued_by_matching_descendant_list() {
        let space = assemble_space(
            "s1".to_string(),
            "Eng".to_string(),
            vec![folder("f1", "Misc", vec![named("l1", "Roadmap")])],
            Vec::new(),
            &filters(None, Some("xyz"), Some("road")),
        );
        assert_eq!(
            space.folders,
            vec![FolderNode {
                id: "f1".to_string(),
                name: "Misc".to_string(),
                lists: vec![ListNode {
                    id: "l1".to_string(),
                    name: "Roadmap".to_string(),
                }],
            }]
        );
    }

    #[test]
    fn folder_without_match_or_surviving_lists_is_dropped() {
        let space = assemble_space(
            "s1".to_string(),
            "Eng".to_string(),
            vec![
                folder("f1", "Misc", vec![named("l1", "Backlog")]),
                folder("f2", "Platform", vec![named("l2", "Backlog")]),
            ],
            Vec::new(),
            &filters(None, Some("plat"), Some("road")),
        );
        // f2 survives on its own name even though its only list was filtered away.
        assert_eq!(space.folders.len(), 1);
        assert_eq!(space.folders[0].id, "f2");
        assert!(space.folders[0].lists.is_empty());
    }

    #[test]
    fn list_filter_alone_keeps_every_folder() {
        let space = assemble_space(
            "s1".to_string(),
            "Eng".to_string(),
            vec![folder("f1", "Misc", vec![named("l1", "Backlog")])],
            vec![named("l2", "Road trips"), named("l3", "Inbox")],
            &filters(None, None, Some("ROAD")),
        );
        assert_eq!(space.folders.len(), 1);
        assert!(space.folders[0].lists.is_empty());
        assert_eq!(
            space.lists,
            vec![ListNode {
                id: "l2".to_string(),
                name: "Road trips".to_string(),
            }]
        );
    }

    #[test]
    fn top_level_lists_ignore_folder_filter() {
        let space = assemble_space(
            "s1".to_string(),
            "Eng".to_string(),
            Vec::new(),
            vec![named("l1", "Inbox")],
            &filters(None, Some("nothing-matches"), None),
        );
        assert_eq!(space.lists.len(), 1);
    }

    #[test]
    fn folder_filter_alone_keeps_non_matching_folders_that_have_lists() {
        let space = assemble_space(
            "s1".to_string(),
            "Eng".to_string(),
            vec![
                folder("f1", "Misc", vec![named("l1", "Roadmap")]),
                folder("f2", "Archive", Vec::new()),
                folder("f3", "Backend", Vec::new()),
            ],
            Vec::new(),
            &filters(None, Some("backend"), None),
        );
        let kept: Vec<&str> = space.folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(kept, vec!["f1", "f3"]);
        assert_eq!(space.folders[0].lists[0].name, "Roadmap");
    }

    #[test]
    fn blank_filters_are_unset() {
        assert_eq!(
            HierarchyFilters::new(Some(" ".to_string()), Some(String::new()), None),
            HierarchyFilters::default()
        );
    }

    #[tokio::test]
    async fn space_filter_skips_child_fetches_for_rejected_spaces() {
        let remote = FakeRemote::start(
            FakeRoutes::default()
                .json(
                    "GET",
                    "/team/T1/space",
                    200,
                    json!({ "spaces": [
                        { "id": "s-eng", "name": "Eng" },
                        { "id": "s-sales", "name": "Sales" }
                    ] }),
                )
                .json(
                    "GET",
                    "/space/s-eng/folder",
                    200,
                    json!({ "folders": [
                        { "id": "f1", "name": "Backend", "lists": [{ "id": "l1", "name": "API" }] }
                    ] }),
                )
                .json(
                    "GET",
                    "/space/s-eng/list",
                    200,
                    json!({ "lists": [{ "id": 77, "name": "Triage" }] }),
                ),
        )
        .await;
        let client = RemoteClient::new(Arc::new(config_for(&remote)));

        let hierarchy =
            fetch_spaces_with_hierarchy(&client, "T1", false, &filters(Some("eng"), None, None))
                .await
                .expect("hierarchy should load");

        assert_eq!(hierarchy.team_id, "T1");
        assert_eq!(hierarchy.spaces.len(), 1);
        let eng = &hierarchy.spaces[0];
        assert_eq!(eng.name, "Eng");
        assert_eq!(eng.folders[0].lists[0].name, "API");
        assert_eq!(eng.lists[0].id, "77");

        assert_eq!(
            remote.labels(),
            vec![
                "GET /team/T1/space",
                "GET /space/s-eng/folder",
                "GET /space/s-eng/list",
            ]
        );
        assert!(
            remote
                .requests()
                .iter()
                .all(|r| r.query.as_deref() == Some("archived=false"))
        );
    }

    #[tokio::test]
    async fn spaces_keep_upstream_order_and_pass_archived_flag() {
        let remote = FakeRemote::start(
            FakeRoutes::default()
                .json(
                    "GET",
                    "/team/T1/space",
                    200,
                    json!({ "spaces": [
                        { "id": "b", "name": "Zeta" },
                        { "id": "a", "name": "Alpha" }
                    ] }),
                )
                .json("GET", "/space/b/folder", 200, json!({ "folders": [] }))
                .json("GET", "/space/b/list", 200, json!({ "lists": [] }))
                .json("GET", "/space/a/folder", 200, json!({}))
                .json("GET", "/space/a/list", 200, json!({ "lists": null })),
        )
        .await;
        let client = RemoteClient::new(Arc::new(config_for(&remote)));

        let hierarchy =
            fetch_spaces_with_hierarchy(&client, "T1", true, &HierarchyFilters::default())
                .await
                .expect("hierarchy should load");

        let names: Vec<&str> = hierarchy.spaces.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(remote.requests().len(), 5);
        assert!(
            remote
                .requests()
                .iter()
                .all(|r| r.query.as_deref() == Some("archived=true"))
        );
    }

    #[tokio::test]
    async fn spaces_without_usable_ids_are_skipped() {
        let remote = FakeRemote::start(
            FakeRoutes::default()
                .json(
                    "GET",
                    "/team/T1/space",
                    200,
                    json!({ "spaces": [
                        { "name": "Eng" },
                        { "id": "..", "name": "Dots" },
                        { "id": "s2", "name": "Ops" }
                    ] }),
                )
                .json("GET", "/space/s2/folder", 200, json!({ "folders": [] }))
                .json("GET", "/space/s2/list", 200, json!({ "lists": [] })),
        )
        .await;
        let client = RemoteClient::new(Arc::new(config_for(&remote)));

        let hierarchy =
            fetch_spaces_with_hierarchy(&client, "T1", false, &HierarchyFilters::default())
                .await
                .expect("hierarchy should load");

        assert_eq!(hierarchy.spaces.len(), 1);
        assert_eq!(hierarchy.spaces[0].id, "s2");
        assert_eq!(
            remote.labels(),
            vec![
                "GET /team/T1/space",
                "GET /space/s2/folder",
                "GET /space/s2/list",
            ]
        );
    }

    #[tokio::test]
    async fn upstream_failure_on_child_fetch_propagates() {
        let remote = FakeRemote::start(FakeRoutes::default().json(
            "GET",
            "/team/T1/space",
            200,
            json!({ "spaces": [{ "id": "s1", "name": "Eng" }] }),
        ))
        .await;
        let client = RemoteClient::new(Arc::new(config_for(&remote)));

        let err = fetch_spaces_with_hierarchy(&client, "T1", false, &HierarchyFilters::default())
            .await
            .expect_err("missing folder route must fail");
        assert!(matches!(err, GatewayError::Upstream { status: 404, .. }));
    }

    #[tokio::test]
    async fn malformed_space_listing_is_an_unexpected_shape() {
        let remote = FakeRemote::start(FakeRoutes::default().json(
            "GET",
            "/team/T1/space",
            200,
            json!({ "spaces": "not-a-list" }),
        ))
        .await;
        let client = RemoteClient::new(Arc::new(config_for(&remote)));

        let err = fetch_spaces_with_hierarchy(&client, "T1", false, &HierarchyFilters::default())
            .await
            .expect_err("string spaces must fail");
        assert!(matches!(err, GatewayError::UnexpectedShape { .. }));
    }
}
