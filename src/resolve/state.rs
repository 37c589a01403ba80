//! Workflow-state resolution.
//!
//! States match case-insensitively on name, optionally scoped to a team.
//! State names repeat across teams ("In Progress" exists almost everywhere),
//! so an unscoped search in a multi-team workspace is expected to be
//! ambiguous; there is no tie-break beyond the team scope.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, ResolveError, Scope, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::WorkflowState;

pub(crate) const SUGGESTION: &str = "Scope the search to a team with --team or use the id directly.";

/// Resolve a state token (canonical id or name) to its id, optionally
/// scoped to a team.
pub fn resolve(
    backend: &dyn Backend,
    token: &str,
    team: Option<&Scope>,
) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token, team)?.id)
}

/// Resolve a state token to its full node.
pub fn find(
    backend: &dyn Backend,
    token: &str,
    team: Option<&Scope>,
) -> Result<WorkflowState, ResolveError> {
    // The team scope narrows the one search; there is no global fallback
    // because an unscoped retry could only widen an already-empty result
    // into cross-team ambiguity.
    let mut filter = json!({ "name": { "eqIgnoreCase": token } });
    if let Some(team) = team {
        filter["team"] = json!({ "id": { "eq": team.id } });
    }

    let data = backend.execute(queries::WORKFLOW_STATES, json!({ "filter": filter }))?;
    let states: Vec<WorkflowState> = nodes(&data, "workflowStates")?;

    engine::settle(
        EntityKind::State,
        token,
        team.map(|t| t.label.as_str()),
        states,
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

pub(crate) fn candidate(state: &WorkflowState) -> Candidate {
    Candidate {
        id: state.id.clone(),
        display_name: state.name.clone(),
        scope: state.team.as_ref().map(|t| format!("team {}", t.key)),
        hint: Some(state.state_type.clone()),
    }
}
