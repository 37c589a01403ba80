//! `lr issue` commands.
//!
//! Create and update resolve every reference through the batch planner, so
//! a fully specified create costs one resolution round trip plus the
//! mutation itself.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::api::{Backend, queries};
use crate::models::{Connection, Issue, IssuePayload};
use crate::resolve::{self, batch::RefSet};
use crate::{Error, Result};

/// Result of `lr issue view`.
#[derive(Debug, Serialize)]
pub struct IssueView {
    pub issue: Issue,
}

impl Output for IssueView {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        let issue = &self.issue;
        let mut lines = vec![format!("{} {}", issue.identifier, issue.title)];
        if let Some(state) = &issue.state {
            lines.push(format!("  State:    {}", state.name));
        }
        if let Some(assignee) = &issue.assignee {
            let name = assignee.display_name.as_deref().unwrap_or(&assignee.name);
            lines.push(format!("  Assignee: {name}"));
        }
        if let Some(labels) = &issue.labels {
            if !labels.nodes.is_empty() {
                let names: Vec<&str> = labels.nodes.iter().map(|l| l.name.as_str()).collect();
                lines.push(format!("  Labels:   {}", names.join(", ")));
            }
        }
        if let Some(url) = &issue.url {
            lines.push(format!("  URL:      {url}"));
        }
        if let Some(description) = &issue.description {
            lines.push(String::new());
            lines.push(description.clone());
        }
        lines.join("\n")
    }
}

/// Result of `lr issue list`.
#[derive(Debug, Serialize)]
pub struct IssueList {
    pub issues: Vec<Issue>,
}

impl Output for IssueList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.issues.is_empty() {
            return "No issues found.".to_string();
        }
        self.issues
            .iter()
            .map(|i| {
                let state = i
                    .state
                    .as_ref()
                    .map(|s| s.name.as_str())
                    .unwrap_or("unknown");
                format!("{:<10} {:<14} {}", i.identifier, state, i.title)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of a create or update mutation.
#[derive(Debug, Serialize)]
pub struct IssueChange {
    pub action: &'static str,
    pub issue: Issue,
}

impl Output for IssueChange {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        let verb = match self.action {
            "created" => "Created",
            _ => "Updated",
        };
        match &self.issue.url {
            Some(url) => format!(
                "{verb} issue {} \"{}\"\n{url}",
                self.issue.identifier, self.issue.title
            ),
            None => format!("{verb} issue {} \"{}\"", self.issue.identifier, self.issue.title),
        }
    }
}

/// Arguments for `lr issue create`, with the team already defaulted from
/// config by the caller.
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub title: String,
    pub team: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub project: Option<String>,
    pub cycle: Option<String>,
    pub milestone: Option<String>,
    pub labels: Vec<String>,
    pub parent: Option<String>,
    pub priority: Option<u8>,
    pub assignee: Option<String>,
}

/// Arguments for `lr issue update`.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub reference: String,
    pub title: Option<String>,
    pub state: Option<String>,
    pub project: Option<String>,
    pub cycle: Option<String>,
    pub milestone: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<u8>,
}

/// Show one issue by reference or id.
pub fn view(backend: &dyn Backend, reference: &str) -> Result<IssueView> {
    Ok(IssueView {
        issue: resolve::issue::fetch(backend, reference)?,
    })
}

/// List issues, optionally filtered by team and state name.
pub fn list(backend: &dyn Backend, team: Option<&str>, state: Option<&str>) -> Result<IssueList> {
    let mut filter = json!({});
    if let Some(token) = team {
        let scope = resolve::team::scope(backend, token)?;
        filter["team"] = json!({ "id": { "eq": scope.id } });
    }
    if let Some(name) = state {
        filter["state"] = json!({ "name": { "eqIgnoreCase": name } });
    }
    let data = backend.execute(queries::ISSUES, json!({ "filter": filter }))?;
    let connection: Connection<Issue> = super::decode(&data, "issues")?;
    Ok(IssueList {
        issues: connection.nodes,
    })
}

/// Create an issue. All references resolve in one batch round trip.
pub fn create(backend: &dyn Backend, args: CreateArgs) -> Result<IssueChange> {
    let team = args.team.clone().ok_or_else(|| {
        Error::Other(
            "no team specified: pass --team or set default_team in the config file".to_string(),
        )
    })?;

    let refs = RefSet {
        team: Some(team),
        project: args.project.clone(),
        state: args.state.clone(),
        cycle: args.cycle.clone(),
        milestone: args.milestone.clone(),
        labels: args.labels.clone(),
        parent: args.parent.clone(),
    };
    let resolved = resolve::batch::resolve_refs(backend, &refs)?;
    let team_id = resolved
        .team_id
        .ok_or_else(|| Error::Other("team resolution produced no id".to_string()))?;

    let mut input = json!({ "teamId": team_id, "title": args.title });
    if let Some(description) = args.description {
        input["description"] = json!(description);
    }
    if let Some(id) = resolved.state_id {
        input["stateId"] = json!(id);
    }
    if let Some(id) = resolved.project_id {
        input["projectId"] = json!(id);
    }
    if let Some(id) = resolved.cycle_id {
        input["cycleId"] = json!(id);
    }
    if let Some(id) = resolved.milestone_id {
        input["projectMilestoneId"] = json!(id);
    }
    if !resolved.label_ids.is_empty() {
        input["labelIds"] = json!(resolved.label_ids);
    }
    if let Some(id) = resolved.parent_id {
        input["parentId"] = json!(id);
    }
    if let Some(priority) = args.priority {
        input["priority"] = json!(priority);
    }
    if let Some(assignee) = args.assignee {
        if assignee == "me" {
            let viewer = super::viewer::current(backend)?;
            input["assigneeId"] = json!(viewer.id);
        } else {
            return Err(Error::Other(
                "only --assignee me is supported".to_string(),
            ));
        }
    }

    let data = backend.execute(queries::ISSUE_CREATE, json!({ "input": input }))?;
    let payload: IssuePayload = super::decode(&data, "issueCreate")?;
    change("created", payload)
}

/// Update an issue. The issue itself resolves first (its team scopes any
/// state or cycle reference), then the remaining references batch-resolve.
pub fn update(backend: &dyn Backend, args: UpdateArgs) -> Result<IssueChange> {
    let issue = resolve::issue::fetch(backend, &args.reference)?;

    // Team scope only matters for state/cycle lookups; skip it otherwise so
    // the batch stays minimal.
    let team = if args.state.is_some() || args.cycle.is_some() {
        issue.team.as_ref().map(|t| t.key.clone())
    } else {
        None
    };

    let refs = RefSet {
        team,
        project: args.project.clone(),
        state: args.state.clone(),
        cycle: args.cycle.clone(),
        milestone: args.milestone.clone(),
        labels: args.labels.clone(),
        parent: None,
    };
    let resolved = resolve::batch::resolve_refs(backend, &refs)?;

    let mut input = json!({});
    if let Some(title) = args.title {
        input["title"] = json!(title);
    }
    if let Some(id) = resolved.state_id {
        input["stateId"] = json!(id);
    }
    if let Some(id) = resolved.project_id {
        input["projectId"] = json!(id);
    }
    if let Some(id) = resolved.cycle_id {
        input["cycleId"] = json!(id);
    }
    if let Some(id) = resolved.milestone_id {
        input["projectMilestoneId"] = json!(id);
    }
    if !resolved.label_ids.is_empty() {
        input["labelIds"] = json!(resolved.label_ids);
    }
    if let Some(priority) = args.priority {
        input["priority"] = json!(priority);
    }

    let data = backend.execute(
        queries::ISSUE_UPDATE,
        json!({ "id": issue.id, "input": input }),
    )?;
    let payload: IssuePayload = super::decode(&data, "issueUpdate")?;
    change("updated", payload)
}

fn change(action: &'static str, payload: IssuePayload) -> Result<IssueChange> {
    if !payload.success {
        return Err(Error::Other(format!(
            "Linear reported the {action} mutation as unsuccessful"
        )));
    }
    let issue = payload
        .issue
        .ok_or_else(|| Error::Other(format!("{action} mutation returned no issue")))?;
    Ok(IssueChange { action, issue })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::test_support::StubBackend;
    use serde_json::json;

    fn created_issue() -> serde_json::Value {
        json!({
            "issueCreate": {
                "success": true,
                "issue": {
                    "id": "i1",
                    "identifier": "ENG-43",
                    "title": "Fix it",
                    "url": "https://linear.app/acme/issue/ENG-43"
                }
            }
        })
    }

    #[test]
    fn create_requires_a_team() {
        let backend = StubBackend::unreachable();
        let err = create(
            &backend,
            CreateArgs {
                title: "Fix it".to_string(),
                ..CreateArgs::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("--team"));
    }

    #[test]
    fn create_batches_resolution_then_mutates() {
        let backend = StubBackend::new(vec![
            // One combined resolution request for team + label.
            Ok(json!({
                "teamByKey": { "nodes": [ { "id": "t1", "key": "ENG", "name": "Engineering" } ] },
                "teamByName": { "nodes": [] },
                "label0": { "nodes": [ { "id": "l1", "name": "bug", "isGroup": false } ] }
            })),
            Ok(created_issue()),
        ]);

        let result = create(
            &backend,
            CreateArgs {
                title: "Fix it".to_string(),
                team: Some("ENG".to_string()),
                labels: vec!["bug".to_string()],
                priority: Some(2),
                ..CreateArgs::default()
            },
        )
        .unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(result.action, "created");
        assert_eq!(result.issue.identifier, "ENG-43");

        let calls = backend.calls.borrow();
        let input = &calls[1].1["input"];
        assert_eq!(input["teamId"], "t1");
        assert_eq!(input["labelIds"], json!(["l1"]));
        assert_eq!(input["priority"], 2);
    }

    #[test]
    fn create_with_canonical_team_skips_resolution_entirely() {
        let backend = StubBackend::new(vec![Ok(created_issue())]);
        let result = create(
            &backend,
            CreateArgs {
                title: "Fix it".to_string(),
                team: Some("00000000-0000-0000-0000-000000000001".to_string()),
                ..CreateArgs::default()
            },
        )
        .unwrap();
        // Only the mutation itself hit the network.
        assert_eq!(backend.call_count(), 1);
        assert_eq!(result.issue.identifier, "ENG-43");
    }

    #[test]
    fn update_scopes_state_to_the_issues_team() {
        let backend = StubBackend::new(vec![
            // fetch ENG-42
            Ok(json!({
                "issues": { "nodes": [ {
                    "id": "i1",
                    "identifier": "ENG-42",
                    "title": "Fix it",
                    "team": { "id": "t1", "key": "ENG", "name": "Engineering" }
                } ] }
            })),
            // batch: team (for scope) + state
            Ok(json!({
                "teamByKey": { "nodes": [ { "id": "t1", "key": "ENG", "name": "Engineering" } ] },
                "teamByName": { "nodes": [] },
                "state": { "nodes": [ { "id": "s1", "name": "Done", "type": "completed" } ] }
            })),
            // mutation
            Ok(json!({
                "issueUpdate": {
                    "success": true,
                    "issue": { "id": "i1", "identifier": "ENG-42", "title": "Fix it" }
                }
            })),
        ]);

        let result = update(
            &backend,
            UpdateArgs {
                reference: "ENG-42".to_string(),
                state: Some("Done".to_string()),
                ..UpdateArgs::default()
            },
        )
        .unwrap();

        assert_eq!(result.action, "updated");
        let calls = backend.calls.borrow();
        // The batched state lookup was scoped to the issue's team.
        assert!(calls[1].1["state"]["team"]["or"].is_array());
        assert_eq!(calls[2].1["input"]["stateId"], "s1");
    }

    #[test]
    fn failed_mutation_is_reported() {
        let backend = StubBackend::new(vec![Ok(json!({
            "issueCreate": { "success": false }
        }))]);
        let err = create(
            &backend,
            CreateArgs {
                title: "Fix it".to_string(),
                team: Some("a0b1c2d3-4e5f-6071-8293-a4b5c6d7e8f9".to_string()),
                ..CreateArgs::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsuccessful"));
    }
}
