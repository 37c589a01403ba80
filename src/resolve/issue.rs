//! Issue resolution.
//!
//! An issue token is either a canonical id or a `TEAM-123` reference. The
//! reference parses locally, then a single query matches on the (team key,
//! number) pair. The pair is unique by construction, so this path has no
//! tie-break; zero results is simply `NotFound`.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, IssueRef, ResolveError, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Issue;

const SUGGESTION: &str = "Use the issue id directly.";

/// Resolve an issue token (canonical id or `TEAM-123`) to its id.
pub fn resolve(backend: &dyn Backend, token: &str) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token)?.id)
}

/// Fetch the full issue node for a token, for display purposes.
///
/// A canonical id is looked up directly; a `TEAM-123` reference goes through
/// the same search as [`resolve`], which already returns the full selection.
pub fn fetch(backend: &dyn Backend, token: &str) -> Result<Issue, ResolveError> {
    if is_canonical(token) {
        let data = backend.execute(queries::ISSUE_BY_ID, json!({ "id": token }))?;
        let issue = data.get("issue").cloned().unwrap_or(serde_json::Value::Null);
        if issue.is_null() {
            return Err(ResolveError::NotFound {
                kind: EntityKind::Issue,
                token: token.to_string(),
                context: None,
            });
        }
        return serde_json::from_value(issue)
            .map_err(|e| crate::api::ApiError::Malformed(format!("bad 'issue' payload: {e}")).into());
    }
    find(backend, token)
}

fn find(backend: &dyn Backend, token: &str) -> Result<Issue, ResolveError> {
    let issue_ref = IssueRef::parse(token)?;
    let data = backend.execute(
        queries::ISSUES,
        json!({
            "filter": {
                "team": { "key": { "eq": issue_ref.team_key } },
                "number": { "eq": issue_ref.number }
            }
        }),
    )?;
    let issues: Vec<Issue> = nodes(&data, "issues")?;

    engine::settle(
        EntityKind::Issue,
        token,
        None,
        issues,
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

fn candidate(issue: &Issue) -> Candidate {
    Candidate {
        id: issue.id.clone(),
        display_name: issue.identifier.clone(),
        scope: issue.team.as_ref().map(|t| format!("team {}", t.key)),
        hint: Some(issue.title.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::StubBackend;
    use serde_json::json;

    fn issue_node(id: &str, identifier: &str) -> serde_json::Value {
        json!({
            "id": id,
            "identifier": identifier,
            "title": "Fix the flaky build",
            "team": { "id": "t1", "key": "ENG", "name": "Engineering" }
        })
    }

    #[test]
    fn reference_lookup_filters_on_key_and_number() {
        let backend = StubBackend::new(vec![Ok(json!({
            "issues": { "nodes": [ issue_node("i1", "ENG-42") ] }
        }))]);
        assert_eq!(resolve(&backend, "ENG-42").unwrap(), "i1");
        let calls = backend.calls.borrow();
        assert_eq!(
            calls[0].1["filter"],
            json!({
                "team": { "key": { "eq": "ENG" } },
                "number": { "eq": 42 }
            })
        );
    }

    #[test]
    fn zero_matches_is_not_found() {
        let backend = StubBackend::new(vec![Ok(json!({ "issues": { "nodes": [] } }))]);
        let err = resolve(&backend, "ENG-42").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotFound {
                kind: EntityKind::Issue,
                ..
            }
        ));
    }

    #[test]
    fn malformed_reference_fails_before_any_network_call() {
        let backend = StubBackend::unreachable();
        let err = resolve(&backend, "ENG-4-2").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedIdentifier { .. }));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn canonical_id_short_circuits() {
        let backend = StubBackend::unreachable();
        let id = "a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f9";
        assert_eq!(resolve(&backend, id).unwrap(), id);
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn fetch_by_canonical_id_reports_missing_issue() {
        let backend = StubBackend::new(vec![Ok(json!({ "issue": null }))]);
        let err = fetch(&backend, "a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f9").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }
}
