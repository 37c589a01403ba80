//! Batch query planner.
//!
//! A create or update operation may need several independent references
//! resolved at once (team, project, state, cycle, milestone, labels, parent
//! issue). Resolving each one separately costs a round trip per reference,
//! so the planner folds every needed lookup into one aliased GraphQL
//! document, executes it once, and then applies the same per-entity settle
//! and tie-break rules to each alias's nodes.
//!
//! Sub-lookups stay independent: an unknown label fails as a `NotFound` for
//! that label, not as a generic batch failure. The first error encountered
//! discards the whole batch; a half-resolved reference set is never applied.
//!
//! The scoped-then-global fallback survives batching by planning both the
//! scoped and the global alias up front and preferring the scoped nodes at
//! extraction time.

use serde_json::{Map, Value, json};

use super::engine::{self, no_tie_break};
use super::{
    EntityKind, IssueRef, ResolveError, cycle, is_canonical, label, milestone, nodes, project,
    state, team,
};
use crate::api::Backend;
use crate::models::{Cycle, Issue, Label, Milestone, Project, Team, WorkflowState};

const TEAM_SEL: &str = "{ id key name }";
const PROJECT_SEL: &str = "{ id name state }";
const STATE_SEL: &str = "{ id name type team { id key name } }";
const CYCLE_SEL: &str =
    "{ id number name startsAt endsAt isActive isNext isPrevious team { id key name } }";
const MILESTONE_SEL: &str = "{ id name targetDate project { id name } }";
const LABEL_SEL: &str = "{ id name isGroup parent { id name } }";
const ISSUE_SEL: &str = "{ id identifier title team { id key name } }";

/// Raw user tokens a create/update operation needs resolved.
#[derive(Debug, Default, Clone)]
pub struct RefSet {
    pub team: Option<String>,
    pub project: Option<String>,
    pub state: Option<String>,
    pub cycle: Option<String>,
    pub milestone: Option<String>,
    pub labels: Vec<String>,
    pub parent: Option<String>,
}

/// Canonical ids produced by one batch resolution.
#[derive(Debug, Default, Clone)]
pub struct ResolvedRefs {
    pub team_id: Option<String>,
    pub project_id: Option<String>,
    pub state_id: Option<String>,
    pub cycle_id: Option<String>,
    pub milestone_id: Option<String>,
    pub label_ids: Vec<String>,
    pub parent_id: Option<String>,
}

/// Accumulates aliased selections and their filter variables into one
/// GraphQL document.
#[derive(Default)]
struct Planner {
    declarations: Vec<String>,
    selections: Vec<String>,
    variables: Map<String, Value>,
}

impl Planner {
    fn add(&mut self, alias: &str, field: &str, filter_type: &str, filter: Value, selection: &str) {
        self.declarations.push(format!("${alias}: {filter_type}"));
        self.selections.push(format!(
            "{alias}: {field}(filter: ${alias}) {{ nodes {selection} }}"
        ));
        self.variables.insert(alias.to_string(), filter);
    }

    fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    fn build(self) -> (String, Value) {
        let query = format!(
            "query({}) {{ {} }}",
            self.declarations.join(", "),
            self.selections.join(" ")
        );
        (query, Value::Object(self.variables))
    }
}

/// Filter matching a team by whatever the token is: id, key, or name.
/// Used only for scoping other lookups; the team's own resolution keeps the
/// key-first two-pass semantics via separate aliases.
fn team_scope_filter(token: &str) -> Value {
    if is_canonical(token) {
        json!({ "id": { "eq": token } })
    } else {
        json!({ "or": [ { "key": { "eq": token } }, { "name": { "eq": token } } ] })
    }
}

fn project_scope_filter(token: &str) -> Value {
    if is_canonical(token) {
        json!({ "id": { "eq": token } })
    } else {
        json!({ "name": { "eq": token } })
    }
}

/// Resolve every reference in `refs` with at most one backend round trip.
///
/// Canonical tokens map straight through; if nothing needs a lookup, no
/// request is issued at all. Any malformed parent reference fails locally
/// before the request is built.
pub fn resolve_refs(backend: &dyn Backend, refs: &RefSet) -> Result<ResolvedRefs, ResolveError> {
    let mut planner = Planner::default();
    let mut resolved = ResolvedRefs::default();

    // Tokens that still need a lookup after canonical short-circuiting.
    let mut want_team: Option<&str> = None;
    let mut want_project: Option<&str> = None;
    let mut want_state: Option<&str> = None;
    let mut want_cycle: Option<(&str, bool)> = None; // (token, scoped alias planned)
    let mut want_milestone: Option<(&str, bool)> = None;
    let mut want_labels: Vec<(usize, &str)> = Vec::new();
    let mut want_parent: Option<&str> = None;

    if let Some(token) = refs.team.as_deref() {
        if is_canonical(token) {
            resolved.team_id = Some(token.to_string());
        } else {
            planner.add(
                "teamByKey",
                "teams",
                "TeamFilter",
                json!({ "key": { "eq": token } }),
                TEAM_SEL,
            );
            planner.add(
                "teamByName",
                "teams",
                "TeamFilter",
                json!({ "name": { "eq": token } }),
                TEAM_SEL,
            );
            want_team = Some(token);
        }
    }

    if let Some(token) = refs.project.as_deref() {
        if is_canonical(token) {
            resolved.project_id = Some(token.to_string());
        } else {
            planner.add(
                "project",
                "projects",
                "ProjectFilter",
                json!({ "name": { "eq": token } }),
                PROJECT_SEL,
            );
            want_project = Some(token);
        }
    }

    if let Some(token) = refs.state.as_deref() {
        if is_canonical(token) {
            resolved.state_id = Some(token.to_string());
        } else {
            let mut filter = json!({ "name": { "eqIgnoreCase": token } });
            if let Some(team_token) = refs.team.as_deref() {
                filter["team"] = team_scope_filter(team_token);
            }
            planner.add("state", "workflowStates", "WorkflowStateFilter", filter, STATE_SEL);
            want_state = Some(token);
        }
    }

    if let Some(token) = refs.cycle.as_deref() {
        if is_canonical(token) {
            resolved.cycle_id = Some(token.to_string());
        } else {
            let scoped = refs.team.is_some();
            if let Some(team_token) = refs.team.as_deref() {
                planner.add(
                    "cycleScoped",
                    "cycles",
                    "CycleFilter",
                    json!({ "name": { "eq": token }, "team": team_scope_filter(team_token) }),
                    CYCLE_SEL,
                );
            }
            planner.add(
                "cycleGlobal",
                "cycles",
                "CycleFilter",
                json!({ "name": { "eq": token } }),
                CYCLE_SEL,
            );
            want_cycle = Some((token, scoped));
        }
    }

    if let Some(token) = refs.milestone.as_deref() {
        if is_canonical(token) {
            resolved.milestone_id = Some(token.to_string());
        } else {
            let scoped = refs.project.is_some();
            if let Some(project_token) = refs.project.as_deref() {
                planner.add(
                    "milestoneScoped",
                    "projectMilestones",
                    "ProjectMilestoneFilter",
                    json!({
                        "name": { "eq": token },
                        "project": project_scope_filter(project_token)
                    }),
                    MILESTONE_SEL,
                );
            }
            planner.add(
                "milestoneGlobal",
                "projectMilestones",
                "ProjectMilestoneFilter",
                json!({ "name": { "eq": token } }),
                MILESTONE_SEL,
            );
            want_milestone = Some((token, scoped));
        }
    }

    for (i, token) in refs.labels.iter().enumerate() {
        if is_canonical(token) {
            resolved.label_ids.push(token.clone());
        } else {
            planner.add(
                &format!("label{i}"),
                "issueLabels",
                "IssueLabelFilter",
                json!({ "name": { "eq": token } }),
                LABEL_SEL,
            );
            want_labels.push((i, token));
        }
    }

    if let Some(token) = refs.parent.as_deref() {
        if is_canonical(token) {
            resolved.parent_id = Some(token.to_string());
        } else {
            // Parse failures surface before any request is built.
            let issue_ref = IssueRef::parse(token)?;
            planner.add(
                "parent",
                "issues",
                "IssueFilter",
                json!({
                    "team": { "key": { "eq": issue_ref.team_key } },
                    "number": { "eq": issue_ref.number }
                }),
                ISSUE_SEL,
            );
            want_parent = Some(token);
        }
    }

    if planner.is_empty() {
        return Ok(resolved);
    }

    let (query, variables) = planner.build();
    let data = backend.execute(&query, variables)?;

    if let Some(token) = want_team {
        let mut teams: Vec<Team> = nodes(&data, "teamByKey")?;
        if teams.is_empty() {
            teams = nodes(&data, "teamByName")?;
        }
        let node = engine::settle(
            EntityKind::Team,
            token,
            None,
            teams,
            no_tie_break,
            team::candidate,
            team::SUGGESTION,
        )?;
        resolved.team_id = Some(node.id);
    }

    if let Some(token) = want_project {
        let projects: Vec<Project> = nodes(&data, "project")?;
        let node = engine::settle(
            EntityKind::Project,
            token,
            None,
            projects,
            no_tie_break,
            project::candidate,
            project::SUGGESTION,
        )?;
        resolved.project_id = Some(node.id);
    }

    let team_context = refs.team.as_deref().map(|t| format!("team {t}"));

    if let Some(token) = want_state {
        let states: Vec<WorkflowState> = nodes(&data, "state")?;
        let node = engine::settle(
            EntityKind::State,
            token,
            team_context.as_deref(),
            states,
            no_tie_break,
            state::candidate,
            state::SUGGESTION,
        )?;
        resolved.state_id = Some(node.id);
    }

    if let Some((token, scoped)) = want_cycle {
        let mut cycles: Vec<Cycle> = if scoped {
            nodes(&data, "cycleScoped")?
        } else {
            Vec::new()
        };
        if cycles.is_empty() {
            cycles = nodes(&data, "cycleGlobal")?;
        }
        let node = engine::settle(
            EntityKind::Cycle,
            token,
            team_context.as_deref(),
            cycles,
            cycle::tie_break,
            cycle::candidate,
            cycle::SUGGESTION,
        )?;
        resolved.cycle_id = Some(node.id);
    }

    if let Some((token, scoped)) = want_milestone {
        let mut milestones: Vec<Milestone> = if scoped {
            nodes(&data, "milestoneScoped")?
        } else {
            Vec::new()
        };
        if milestones.is_empty() {
            milestones = nodes(&data, "milestoneGlobal")?;
        }
        let context = refs.project.as_deref().map(|p| format!("project {p}"));
        let node = engine::settle(
            EntityKind::Milestone,
            token,
            context.as_deref(),
            milestones,
            no_tie_break,
            milestone::candidate,
            milestone::SUGGESTION,
        )?;
        resolved.milestone_id = Some(node.id);
    }

    for (i, token) in want_labels {
        let labels: Vec<Label> = nodes(&data, &format!("label{i}"))?;
        let leaves: Vec<Label> = labels.into_iter().filter(|l| !l.is_group).collect();
        let node = engine::settle(
            EntityKind::Label,
            token,
            None,
            leaves,
            no_tie_break,
            label::candidate,
            label::SUGGESTION,
        )?;
        resolved.label_ids.push(node.id);
    }

    if let Some(token) = want_parent {
        let issues: Vec<Issue> = nodes(&data, "parent")?;
        let node = engine::settle(
            EntityKind::Issue,
            token,
            None,
            issues,
            no_tie_break,
            |issue| super::Candidate {
                id: issue.id.clone(),
                display_name: issue.identifier.clone(),
                scope: issue.team.as_ref().map(|t| format!("team {}", t.key)),
                hint: Some(issue.title.clone()),
            },
            "Use the issue id directly.",
        )?;
        resolved.parent_id = Some(node.id);
    }

    Ok(resolved)
}
