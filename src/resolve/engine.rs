//! Shared disambiguation policy.
//!
//! Every resolver that can see more than one candidate funnels through this
//! engine instead of re-implementing the control flow: an optional scoped
//! search, a global fallback when the scoped pass comes up empty, a
//! per-entity tie-break over the survivors, and a loud `Ambiguous` failure
//! when no rule selects exactly one candidate. The engine never returns an
//! arbitrary first match.

use log::debug;

use super::{Candidate, EntityKind, ResolveError};

/// Outcome of a tie-break pass over multiple surviving candidates.
pub enum TieBreak<T> {
    /// A rule selected exactly one candidate.
    Chosen(T),
    /// No rule applies; the survivors are genuinely ambiguous.
    Unresolved(Vec<T>),
}

/// Tie-break for entities with no priority rules: any multiple match is
/// ambiguous.
pub fn no_tie_break<T>(nodes: Vec<T>) -> TieBreak<T> {
    TieBreak::Unresolved(nodes)
}

/// Settle a candidate list into exactly one node.
///
/// Zero candidates is `NotFound`; a singleton wins outright; otherwise the
/// tie-break runs, and if it leaves more than one candidate the result is an
/// `Ambiguous` error listing every survivor with its scope and hint.
pub fn settle<T>(
    kind: EntityKind,
    token: &str,
    context: Option<&str>,
    mut nodes: Vec<T>,
    tie_break: impl FnOnce(Vec<T>) -> TieBreak<T>,
    to_candidate: impl Fn(&T) -> Candidate,
    suggestion: &str,
) -> Result<T, ResolveError> {
    debug!("{kind} search for '{token}' returned {} node(s)", nodes.len());

    if nodes.is_empty() {
        return Err(ResolveError::NotFound {
            kind,
            token: token.to_string(),
            context: context.map(str::to_string),
        });
    }
    if nodes.len() == 1 {
        return Ok(nodes.swap_remove(0));
    }

    match tie_break(nodes) {
        TieBreak::Chosen(node) => Ok(node),
        TieBreak::Unresolved(nodes) => Err(ResolveError::Ambiguous {
            kind,
            token: token.to_string(),
            candidates: nodes.iter().map(to_candidate).collect(),
            suggestion: suggestion.to_string(),
        }),
    }
}

/// Scoped-then-global search with tie-breaking.
///
/// `scoped` is `Some` only when the caller supplied a scope. When the scoped
/// pass yields nothing (or no scope was given), `global` runs as the
/// fallback; the combined result then goes through [`settle`]. Either query
/// failing aborts resolution with the backend error unchanged.
pub fn resolve_one<T>(
    kind: EntityKind,
    token: &str,
    context: Option<&str>,
    scoped: Option<impl FnOnce() -> Result<Vec<T>, ResolveError>>,
    global: impl FnOnce() -> Result<Vec<T>, ResolveError>,
    tie_break: impl FnOnce(Vec<T>) -> TieBreak<T>,
    to_candidate: impl Fn(&T) -> Candidate,
    suggestion: &str,
) -> Result<T, ResolveError> {
    let mut nodes = match scoped {
        Some(query) => query()?,
        None => Vec::new(),
    };
    if nodes.is_empty() {
        nodes = global()?;
    }

    settle(kind, token, context, nodes, tie_break, to_candidate, suggestion)
}
