//! `lr team` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, Team};

/// Result of `lr team list`.
#[derive(Debug, Serialize)]
pub struct TeamList {
    pub teams: Vec<Team>,
}

impl Output for TeamList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.teams.is_empty() {
            return "No teams found.".to_string();
        }
        self.teams
            .iter()
            .map(|t| format!("{:<8} {}", t.key, t.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List all teams in the workspace.
pub fn list(backend: &dyn Backend) -> Result<TeamList> {
    let data = backend.execute(queries::TEAMS, json!({}))?;
    let connection: Connection<Team> = super::decode(&data, "teams")?;
    Ok(TeamList {
        teams: connection.nodes,
    })
}
