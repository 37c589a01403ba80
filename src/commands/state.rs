//! `lr state` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, WorkflowState};
use crate::resolve;

/// Result of `lr state list`.
#[derive(Debug, Serialize)]
pub struct StateList {
    pub states: Vec<WorkflowState>,
}

impl Output for StateList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.states.is_empty() {
            return "No workflow states found.".to_string();
        }
        self.states
            .iter()
            .map(|s| format!("{:<16} {}", s.name, s.state_type))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List workflow states for a team.
pub fn list(backend: &dyn Backend, team: &str) -> Result<StateList> {
    let scope = resolve::team::scope(backend, team)?;
    let data = backend.execute(
        queries::WORKFLOW_STATES,
        json!({ "filter": { "team": { "id": { "eq": scope.id } } } }),
    )?;
    let connection: Connection<WorkflowState> = super::decode(&data, "workflowStates")?;
    Ok(StateList {
        states: connection.nodes,
    })
}
