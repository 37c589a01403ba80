//! `lr label` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, Label};
use crate::resolve;

/// Result of `lr label list`.
#[derive(Debug, Serialize)]
pub struct LabelList {
    pub labels: Vec<Label>,
}

impl Output for LabelList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.labels.is_empty() {
            return "No labels found.".to_string();
        }
        self.labels
            .iter()
            .map(|l| {
                if l.is_group {
                    format!("{} (group)", l.name)
                } else if let Some(parent) = &l.parent {
                    format!("{} / {}", parent.name, l.name)
                } else {
                    l.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List labels, optionally limited to a team.
pub fn list(backend: &dyn Backend, team: Option<&str>) -> Result<LabelList> {
    let variables = match team {
        Some(token) => {
            let scope = resolve::team::scope(backend, token)?;
            json!({ "filter": { "team": { "id": { "eq": scope.id } } } })
        }
        None => json!({}),
    };
    let data = backend.execute(queries::LABELS, variables)?;
    let connection: Connection<Label> = super::decode(&data, "issueLabels")?;
    Ok(LabelList {
        labels: connection.nodes,
    })
}
