//! Milestone resolution.
//!
//! Milestone names collide across projects, so the search is two-stage: a
//! project-scoped pass when the caller supplied one, falling back to a
//! workspace-wide name search when the scoped pass finds nothing. Ambiguity
//! reports each candidate's owning project and target date and tells the
//! user how to narrow the search.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, ResolveError, Scope, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Milestone;

pub(crate) const SUGGESTION: &str = "Narrow the search with --project or use the milestone id directly.";

/// Resolve a milestone token (canonical id or name) to its id, optionally
/// scoped to a project.
pub fn resolve(
    backend: &dyn Backend,
    token: &str,
    project: Option<&Scope>,
) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token, project)?.id)
}

/// Resolve a milestone token to its full node.
pub fn find(
    backend: &dyn Backend,
    token: &str,
    project: Option<&Scope>,
) -> Result<Milestone, ResolveError> {
    engine::resolve_one(
        EntityKind::Milestone,
        token,
        project.map(|p| p.label.as_str()),
        project.map(|project| {
            move || {
                search(
                    backend,
                    json!({
                        "name": { "eq": token },
                        "project": { "id": { "eq": project.id } }
                    }),
                )
            }
        }),
        || search(backend, json!({ "name": { "eq": token } })),
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

fn search(
    backend: &dyn Backend,
    filter: serde_json::Value,
) -> Result<Vec<Milestone>, ResolveError> {
    let data = backend.execute(queries::MILESTONES, json!({ "filter": filter }))?;
    nodes(&data, "projectMilestones")
}

/// Ambiguity listing carries the owning project name and target date.
pub(crate) fn candidate(milestone: &Milestone) -> Candidate {
    Candidate {
        id: milestone.id.clone(),
        display_name: milestone.name.clone(),
        scope: Some(format!("project {}", milestone.project.name)),
        hint: milestone.target_date.map(|d| format!("target {d}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::StubBackend;
    use serde_json::json;

    fn milestone(id: &str, name: &str, project: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "targetDate": "2026-09-01",
            "project": { "id": format!("{project}-id"), "name": project }
        })
    }

    fn milestones(nodes: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "projectMilestones": { "nodes": nodes } })
    }

    #[test]
    fn scoped_miss_falls_back_to_global_search() {
        let backend = StubBackend::new(vec![
            Ok(milestones(vec![])),
            Ok(milestones(vec![milestone("m1", "Beta", "Orbit")])),
        ]);
        let scope = Scope::new("p1", "project Launch");
        assert_eq!(resolve(&backend, "Beta", Some(&scope)).unwrap(), "m1");
        assert_eq!(backend.call_count(), 2);
    }

    #[test]
    fn scoped_hit_needs_no_fallback() {
        let backend = StubBackend::new(vec![Ok(milestones(vec![milestone(
            "m1", "Beta", "Launch",
        )]))]);
        let scope = Scope::new("p1", "project Launch");
        assert_eq!(resolve(&backend, "Beta", Some(&scope)).unwrap(), "m1");
        assert_eq!(backend.call_count(), 1);
        let calls = backend.calls.borrow();
        assert_eq!(
            calls[0].1["filter"]["project"],
            json!({ "id": { "eq": "p1" } })
        );
    }

    #[test]
    fn unscoped_duplicates_list_both_projects() {
        let backend = StubBackend::new(vec![Ok(milestones(vec![
            milestone("m1", "Beta", "Launch"),
            milestone("m2", "Beta", "Orbit"),
        ]))]);
        let err = resolve(&backend, "Beta", None).unwrap_err();
        match err {
            ResolveError::Ambiguous {
                candidates,
                suggestion,
                ..
            } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[0].scope.as_deref(), Some("project Launch"));
                assert_eq!(candidates[1].scope.as_deref(), Some("project Orbit"));
                assert_eq!(candidates[0].hint.as_deref(), Some("target 2026-09-01"));
                assert!(suggestion.contains("--project"));
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let backend = StubBackend::new(vec![
            Ok(milestones(vec![])),
            Ok(milestones(vec![])),
        ]);
        let scope = Scope::new("p1", "project Launch");
        let err = resolve(&backend, "Beta", Some(&scope)).unwrap_err();
        match err {
            ResolveError::NotFound { context, .. } => {
                assert_eq!(context.as_deref(), Some("project Launch"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolution_is_idempotent_against_an_unchanged_backend() {
        for _ in 0..2 {
            let backend = StubBackend::new(vec![Ok(milestones(vec![milestone(
                "m1", "Beta", "Launch",
            )]))]);
            assert_eq!(resolve(&backend, "Beta", None).unwrap(), "m1");
        }
    }
}
