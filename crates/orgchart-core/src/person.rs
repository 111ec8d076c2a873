use serde::{Deserialize, Serialize};

/// One person record as supplied by the caller. The engine never mutates it.
///
/// Optional fields render as empty text / hidden badge rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub total_reports: u32,
}

/// Caller-facing tree shape: a person plus their direct reports.
///
/// `id` must be unique across the whole tree; [`crate::OrgTree::from_node`]
/// rejects duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNode {
    pub id: String,
    pub person: Person,
    #[serde(default)]
    pub children: Vec<PersonNode>,
}
