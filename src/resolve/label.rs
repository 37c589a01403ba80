//! Label resolution.
//!
//! Labels match by exact name. Labels may be organized in two tiers: a group
//! label with leaf labels beneath it. Group labels cannot be applied to
//! issues, so they are filtered out of the candidate set; a leaf label's
//! parent group is carried along for display.

use serde_json::json;

use super::engine::{self, no_tie_break};
use super::{Candidate, EntityKind, ResolveError, is_canonical, nodes};
use crate::api::{Backend, queries};
use crate::models::Label;

pub(crate) const SUGGESTION: &str = "Use the label id directly.";

/// Resolve a label token (canonical id or exact name) to its id.
pub fn resolve(backend: &dyn Backend, token: &str) -> Result<String, ResolveError> {
    if is_canonical(token) {
        return Ok(token.to_string());
    }
    Ok(find(backend, token)?.id)
}

/// Resolve a label token to its full node (including any parent group).
pub fn find(backend: &dyn Backend, token: &str) -> Result<Label, ResolveError> {
    engine::resolve_one(
        EntityKind::Label,
        token,
        None,
        None::<fn() -> Result<Vec<Label>, ResolveError>>,
        || search(backend, token),
        no_tie_break,
        candidate,
        SUGGESTION,
    )
}

fn search(backend: &dyn Backend, name: &str) -> Result<Vec<Label>, ResolveError> {
    let data = backend.execute(
        queries::LABELS,
        json!({ "filter": { "name": { "eq": name } } }),
    )?;
    let labels: Vec<Label> = nodes(&data, "issueLabels")?;
    // Group labels are containers, never resolution results.
    Ok(labels.into_iter().filter(|l| !l.is_group).collect())
}

pub(crate) fn candidate(label: &Label) -> Candidate {
    Candidate {
        id: label.id.clone(),
        display_name: label.name.clone(),
        scope: label.parent.as_ref().map(|p| format!("group {}", p.name)),
        hint: None,
    }
}
