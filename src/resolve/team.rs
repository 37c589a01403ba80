//! Team resolution.
//!
//! Teams are addressable by short key ("ENG") or display name ("Engineering").
//! Keys are guaranteed unique while names are not, so the key pass runs first
//! and the name pass only as a fallback when it finds nothing.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, ResolveError, Scope, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Team;

pub(crate) const SUGGESTION: &str = "Use the team key or the id directly.";

/// Resolve a team token (canonical id, key, or name) to its id.
pub fn resolve(backend: &dyn Backend, token: &str) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token)?.id)
}

/// Resolve a team token to its full node. The token must be a key or a
/// name; canonical ids short-circuit in [`resolve`] before reaching here.
pub fn find(backend: &dyn Backend, token: &str) -> Result<Team, ResolveError> {
    engine::resolve_one(
        EntityKind::Team,
        token,
        None,
        // Key pass first: keys are unique, names are not.
        Some(|| search(backend, json!({ "key": { "eq": token } }))),
        || search(backend, json!({ "name": { "eq": token } })),
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

/// Resolve a team token into a [`Scope`] for narrowing another lookup.
pub fn scope(backend: &dyn Backend, token: &str) -> Result<Scope, ResolveError> {
    if is_canonical(token) {
        return Ok(Scope::new(token, format!("team {token}")));
    }
    let team = find(backend, token)?;
    Ok(Scope::new(team.id, format!("team {}", team.key)))
}

fn search(backend: &dyn Backend, filter: serde_json::Value) -> Result<Vec<Team>, ResolveError> {
    let data = backend.execute(queries::TEAMS, json!({ "filter": filter }))?;
    nodes(&data, "teams")
}

pub(crate) fn candidate(team: &Team) -> Candidate {
    Candidate {
        id: team.id.clone(),
        display_name: team.name.clone(),
        scope: None,
        hint: Some(format!("key {}", team.key)),
    }
}
