//! Data models for Linear entities.
//!
//! These are the slices of the GraphQL schema the CLI actually reads:
//! - `Team` - workspace team with its short key (e.g. "ENG")
//! - `Project` - project container
//! - `WorkflowState` - per-team issue status
//! - `Cycle` - time-boxed iteration with active/next/previous flags
//! - `Milestone` - project milestone with a target date
//! - `Label` - issue label, optionally grouped under a parent label
//! - `Issue` - the work item itself
//!
//! Fields absent from a narrower selection deserialize as `None`, so one
//! type serves both full lookups and nested references.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Paginated node wrapper used by every list field in the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// A workspace team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    /// Short code used in issue identifiers (e.g. "ENG")
    pub key: String,
    pub name: String,
}

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A per-team workflow state (issue status).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    /// State category ("backlog", "unstarted", "started", "completed", "canceled")
    #[serde(rename = "type")]
    pub state_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

/// A time-boxed cycle belonging to a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_next: bool,
    #[serde(default)]
    pub is_previous: bool,
    pub team: Team,
}

impl Cycle {
    /// Display name: explicit name if set, otherwise "Cycle <number>".
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Cycle {}", self.number),
        }
    }
}

/// A project milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub project: Project,
}

/// Parent reference on a grouped label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRef {
    pub id: String,
    pub name: String,
}

/// An issue label. Group labels hold child labels and are not directly
/// assignable to issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<LabelRef>,
}

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    /// Human identifier (e.g. "ENG-42")
    pub identifier: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WorkflowState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Connection<Label>>,
}

/// Payload returned by the issueCreate/issueUpdate mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}
