//! Project resolution: case-sensitive name match, no scoping.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, ResolveError, Scope, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Project;

pub(crate) const SUGGESTION: &str = "Use the project id directly.";

/// Resolve a project token (canonical id or exact name) to its id.
pub fn resolve(backend: &dyn Backend, token: &str) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token)?.id)
}

/// Resolve a project token to its full node.
pub fn find(backend: &dyn Backend, token: &str) -> Result<Project, ResolveError> {
    engine::resolve_one(
        EntityKind::Project,
        token,
        None,
        None::<fn() -> Result<Vec<Project>, ResolveError>>,
        || search(backend, token),
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

/// Resolve a project token into a [`Scope`] for narrowing another lookup.
pub fn scope(backend: &dyn Backend, token: &str) -> Result<Scope, ResolveError> {
    if is_canonical(token) {
        return Ok(Scope::new(token, format!("project {token}")));
    }
    let project = find(backend, token)?;
    Ok(Scope::new(project.id, format!("project {}", project.name)))
}

fn search(backend: &dyn Backend, name: &str) -> Result<Vec<Project>, ResolveError> {
    let data = backend.execute(
        queries::PROJECTS,
        json!({ "filter": { "name": { "eq": name } } }),
    )?;
    nodes(&data, "projects")
}

pub(crate) fn candidate(project: &Project) -> Candidate {
    Candidate {
        id: project.id.clone(),
        display_name: project.name.clone(),
        scope: None,
        hint: project.state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::StubBackend;
    use serde_json::json;

    #[test]
    fn single_name_match_resolves() {
        let backend = StubBackend::new(vec![Ok(json!({
            "projects": { "nodes": [ { "id": "p1", "name": "Launch" } ] }
        }))]);
        assert_eq!(resolve(&backend, "Launch").unwrap(), "p1");
    }

    #[test]
    fn zero_matches_is_not_found() {
        let backend = StubBackend::new(vec![Ok(json!({ "projects": { "nodes": [] } }))]);
        let err = resolve(&backend, "Launch").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotFound {
                kind: EntityKind::Project,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_project_names_fail_loudly() {
        // Legacy behavior picked nodes[0] here; resolution must refuse instead.
        let backend = StubBackend::new(vec![Ok(json!({
            "projects": { "nodes": [
                { "id": "p1", "name": "Launch", "state": "started" },
                { "id": "p2", "name": "Launch", "state": "planned" }
            ] }
        }))]);
        let err = resolve(&backend, "Launch").unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { .. }));
    }

    #[test]
    fn canonical_id_short_circuits() {
        let backend = StubBackend::unreachable();
        let id = "00000000-0000-0000-0000-000000000000";
        assert_eq!(resolve(&backend, id).unwrap(), id);
    }
}
