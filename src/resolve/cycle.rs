//! Cycle resolution.
//!
//! Cycle names repeat (every team has a "Sprint 1"), so cycles get the full
//! engine treatment: team-scoped search with global fallback, then a priority
//! tie-break over the schedule flags: the currently active cycle wins, else
//! the next upcoming one, else the immediately previous one. A flag only
//! applies when exactly one candidate carries it; otherwise the chain moves
//! on, and if no rule selects, resolution fails with every candidate listed.

use serde_json::json;

use super::engine::{self, TieBreak};
use super::{Candidate, EntityKind, ResolveError, Scope, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Cycle;

pub(crate) const SUGGESTION: &str = "Narrow the search with --team or use the cycle id directly.";

/// Resolve a cycle token (canonical id or name) to its id, optionally scoped
/// to a team.
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

/// Resolve a cycle token to its full node.
pub fn find(
    backend: &dyn Backend,
    token: &str,
    team: Option<&Scope>,
) -> Result<Cycle, ResolveError> {
    engine::resolve_one(
        EntityKind::Cycle,
        token,
        team.map(|t| t.label.as_str()),
        team.map(|team| {
            move || {
                search(
                    backend,
                    json!({
                        "name": { "eq": token },
                        "team": { "id": { "eq": team.id } }
                    }),
                )
            }
        }),
        || search(backend, json!({ "name": { "eq": token } })),
        tie_break,
        candidate,
        SUGGESTION,
    )
}

fn search(backend: &dyn Backend, filter: serde_json::Value) -> Result<Vec<Cycle>, ResolveError> {
    let data = backend.execute(queries::CYCLES, json!({ "filter": filter }))?;
    nodes(&data, "cycles")
}

/// Schedule-flag priority chain: active, then next, then previous. Shared
/// with the batch planner, which applies it to nodes from a combined query.
pub(crate) fn tie_break(mut nodes: Vec<Cycle>) -> TieBreak<Cycle> {
    let flags: [fn(&Cycle) -> bool; 3] = [
        |c| c.is_active,
        |c| c.is_next,
        |c| c.is_previous,
    ];

    for flag in flags {
        let flagged: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, c)| flag(c))
            .map(|(i, _)| i)
            .collect();
        if let [only] = flagged.as_slice() {
            return TieBreak::Chosen(nodes.swap_remove(*only));
        }
    }

    TieBreak::Unresolved(nodes)
}

/// Ambiguity listing carries the owning team key, sequence number, and start
/// date so the user can pick by id without another lookup.
pub(crate) fn candidate(cycle: &Cycle) -> Candidate {
    Candidate {
        id: cycle.id.clone(),
        display_name: cycle.display_name(),
        scope: Some(format!("team {}", cycle.team.key)),
        hint: Some(format!(
            "cycle {}, starts {}",
            cycle.number,
            cycle.starts_at.date_naive()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::StubBackend;
    use serde_json::json;

    fn cycle(id: &str, number: u32, flags: (bool, bool, bool)) -> serde_json::Value {
        json!({
            "id": id,
            "number": number,
            "name": "Sprint",
            "startsAt": "2026-08-03T00:00:00Z",
            "endsAt": "2026-08-17T00:00:00Z",
            "isActive": flags.0,
            "isNext": flags.1,
            "isPrevious": flags.2,
            "team": { "id": "t1", "key": "ENG", "name": "Engineering" }
        })
    }

    fn cycles(nodes: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "cycles": { "nodes": nodes } })
    }

    #[test]
    fn active_cycle_wins_over_next() {
        let backend = StubBackend::new(vec![Ok(cycles(vec![
            cycle("a", 4, (true, false, false)),
            cycle("b", 5, (false, true, false)),
        ]))]);
        assert_eq!(resolve(&backend, "Sprint", None).unwrap(), "a");
    }

    #[test]
    fn next_cycle_wins_when_none_active() {
        let backend = StubBackend::new(vec![Ok(cycles(vec![
            cycle("b", 5, (false, true, false)),
            cycle("c", 3, (false, false, true)),
        ]))]);
        assert_eq!(resolve(&backend, "Sprint", None).unwrap(), "b");
    }

    #[test]
    fn previous_cycle_is_the_last_resort_flag() {
        let backend = StubBackend::new(vec![Ok(cycles(vec![
            cycle("c", 3, (false, false, true)),
            cycle("d", 1, (false, false, false)),
        ]))]);
        assert_eq!(resolve(&backend, "Sprint", None).unwrap(), "c");
    }

    #[test]
    fn two_active_cycles_do_not_satisfy_the_rule() {
        // A flag applies only when exactly one candidate carries it.
        let backend = StubBackend::new(vec![Ok(cycles(vec![
            cycle("a", 4, (true, false, false)),
            cycle("b", 5, (true, false, false)),
        ]))]);
        let err = resolve(&backend, "Sprint", None).unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { .. }));
    }

    #[test]
    fn unflagged_candidates_fail_with_full_listing() {
        let backend = StubBackend::new(vec![Ok(cycles(vec![
            cycle("a", 4, (false, false, false)),
            cycle("b", 5, (false, false, false)),
        ]))]);
        let err = resolve(&backend, "Sprint", None).unwrap_err();
        match err {
            ResolveError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[0].scope.as_deref(), Some("team ENG"));
                assert_eq!(
                    candidates[0].hint.as_deref(),
                    Some("cycle 4, starts 2026-08-03")
                );
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn team_scoped_search_falls_back_globally_when_empty() {
        let backend = StubBackend::new(vec![
            Ok(cycles(vec![])),
            Ok(cycles(vec![cycle("a", 4, (true, false, false))])),
        ]);
        let scope = Scope::new("t9", "team OPS");
        assert_eq!(resolve(&backend, "Sprint", Some(&scope)).unwrap(), "a");
        assert_eq!(backend.call_count(), 2);
        let calls = backend.calls.borrow();
        assert_eq!(
            calls[0].1["filter"]["team"],
            json!({ "id": { "eq": "t9" } })
        );
        assert!(calls[1].1["filter"].get("team").is_none());
    }

    #[test]
    fn singleton_resolves_regardless_of_flags() {
        let backend = StubBackend::new(vec![Ok(cycles(vec![cycle(
            "d",
            1,
            (false, false, false),
        )]))]);
        assert_eq!(resolve(&backend, "Sprint", None).unwrap(), "d");
    }
}
