//! `lr milestone` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, Milestone};
use crate::resolve;

/// Result of `lr milestone list`.
#[derive(Debug, Serialize)]
pub struct MilestoneList {
    pub milestones: Vec<Milestone>,
}

impl Output for MilestoneList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.milestones.is_empty() {
            return "No milestones found.".to_string();
        }
        self.milestones
            .iter()
            .map(|m| {
                let target = m
                    .target_date
                    .map(|d| format!(", target {d}"))
                    .unwrap_or_default();
                format!("{} ({}{})", m.name, m.project.name, target)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List milestones, optionally limited to a project.
pub fn list(backend: &dyn Backend, project: Option<&str>) -> Result<MilestoneList> {
    let variables = match project {
        Some(token) => {
            let scope = resolve::project::scope(backend, token)?;
            json!({ "filter": { "project": { "id": { "eq": scope.id } } } })
        }
        None => json!({}),
    };
    let data = backend.execute(queries::MILESTONES, variables)?;
    let connection: Connection<Milestone> = super::decode(&data, "projectMilestones")?;
    Ok(MilestoneList {
        milestones: connection.nodes,
    })
}
