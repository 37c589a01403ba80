//! GraphQL operation text.
//!
//! Every document takes its search criteria as a single `$filter` variable so
//! that scoped and global searches share one query string; the resolvers build
//! the filter objects. Field selections are kept to what the CLI actually
//! reads.

/// Teams matching a filter (used for both key and name passes).
pub const TEAMS: &str = "query($filter: TeamFilter) {
  teams(filter: $filter) { nodes { id key name } }
}";

/// Projects matching a filter.
pub const PROJECTS: &str = "query($filter: ProjectFilter) {
  projects(filter: $filter) { nodes { id name state } }
}";

/// Workflow states matching a filter.
pub const WORKFLOW_STATES: &str = "query($filter: WorkflowStateFilter) {
  workflowStates(filter: $filter) { nodes { id name type team { id key name } } }
}";

/// Cycles matching a filter, with the flags the tie-break chain inspects.
pub const CYCLES: &str = "query($filter: CycleFilter) {
  cycles(filter: $filter) {
    nodes {
      id number name startsAt endsAt
      isActive isNext isPrevious
      team { id key name }
    }
  }
}";

/// Project milestones matching a filter.
pub const MILESTONES: &str = "query($filter: ProjectMilestoneFilter) {
  projectMilestones(filter: $filter) {
    nodes { id name targetDate project { id name } }
  }
}";

/// Issue labels matching a filter, with group/parent structure.
pub const LABELS: &str = "query($filter: IssueLabelFilter) {
  issueLabels(filter: $filter) {
    nodes { id name isGroup parent { id name } }
  }
}";

/// Issues matching a filter (team key + number lookups, list commands).
pub const ISSUES: &str = "query($filter: IssueFilter) {
  issues(filter: $filter) {
    nodes {
      id identifier title description url priority
      state { id name type }
      team { id key name }
      assignee { id name displayName }
      labels { nodes { id name isGroup parent { id name } } }
    }
  }
}";

/// A single issue by canonical id.
pub const ISSUE_BY_ID: &str = "query($id: String!) {
  issue(id: $id) {
    id identifier title description url priority
    state { id name type }
    team { id key name }
    assignee { id name displayName }
    labels { nodes { id name isGroup parent { id name } } }
  }
}";

/// The authenticated user.
pub const VIEWER: &str = "query {
  viewer { id name displayName email }
}";

/// Create an issue from a fully resolved input object.
pub const ISSUE_CREATE: &str = "mutation($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue { id identifier title url }
  }
}";

/// Update an issue from a fully resolved input object.
pub const ISSUE_UPDATE: &str = "mutation($id: String!, $input: IssueUpdateInput!) {
  issueUpdate(id: $id, input: $input) {
    success
    issue { id identifier title url }
  }
}";
