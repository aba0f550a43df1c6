use serde::Serialize;
use serde_json::Value;
use taskbridge_core::error::GatewayError;
use taskbridge_core::ids::id_from_value;

use crate::client::{RemoteClient, RemoteRequest};
use crate::util::contains_ignore_case;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamMembers {
    pub team_id: String,
    pub name: String,
    pub members: Vec<Value>,
    pub guests: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemberMatches {
    pub team_id: String,
    pub matches: Vec<Value>,
}

/// Roster of `team_id`, located in the authorized-teams listing.
pub async fn fetch_members(
    client: &RemoteClient,
    team_id: &str,
) -> Result<TeamMembers, GatewayError> {
    let listing = client.call(RemoteRequest::get(["team"])).await?;
    let team = listing
        .get("teams")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|team| team.get("id").and_then(id_from_value).as_deref() == Some(team_id))
        .ok_or_else(|| GatewayError::TeamNotFound(team_id.to_string()))?;

    Ok(TeamMembers {
        team_id: team_id.to_string(),
        name: team
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        members: array_field(team, "members"),
        guests: array_field(team, "guests"),
    })
}

/// Members whose username or email contains `query`, ignoring case.
/// No match is an empty list, not an error.
pub async fn find_member_by_name(
    client: &RemoteClient,
    team_id: &str,
    query: &str,
) -> Result<MemberMatches, GatewayError> {
    let roster = fetch_members(client, team_id).await?;
    let matches = roster
        .members
        .into_iter()
        .filter(|member| member_matches(member, query))
        .collect();
    Ok(MemberMatches {
        team_id: roster.team_id,
        matches,
    })
}

pub fn member_matches(member: &Value, query: &str) -> bool {
    ["username", "email"].iter().any(|field| {
        member_field(member, field).is_some_and(|value| contains_ignore_case(value, query))
    })
}

/// Direct field first, then the nested `user` object the team listing uses.
fn member_field<'a>(member: &'a Value, field: &str) -> Option<&'a str> {
    member
        .get(field)
        .and_then(Value::as_str)
        .or_else(|| member.get("user")?.get(field)?.as_str())
}

fn array_field(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
