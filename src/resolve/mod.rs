//! Identifier resolution.
//!
//! Users address entities by human-friendly tokens; the API only accepts
//! canonical ids. This module turns one into the other:
//!
//! - [`ident`] - local shape checks: canonical-id recognition and `TEAM-123`
//!   issue reference parsing. No network use.
//! - [`engine`] - shared disambiguation policy: scoped-then-global search
//!   fallback, tie-breaking, and loud ambiguity failures.
//! - one submodule per entity kind ([`team`], [`project`], [`state`],
//!   [`cycle`], [`milestone`], [`label`], [`issue`]) implementing that
//!   entity's search and tie-break policy on top of the engine.
//! - [`batch`] - combined single-round-trip resolution of every reference a
//!   create/update operation needs.
//!
//! Every resolver short-circuits on an already-canonical token, so resolving
//! a canonical id is a no-op and never touches the network. Resolvers hold
//! no state across calls and never cache results.

pub mod batch;
pub mod cycle;
pub mod engine;
pub mod ident;
pub mod issue;
pub mod label;
pub mod milestone;
pub mod project;
pub mod state;
pub mod team;

pub use ident::{IssueRef, is_canonical};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use crate::api::ApiError;
use crate::models::Connection;

/// Entity kinds addressable by a human identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Project,
    State,
    Cycle,
    Milestone,
    Label,
    Issue,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team => write!(f, "team"),
            Self::Project => write!(f, "project"),
            Self::State => write!(f, "workflow state"),
            Self::Cycle => write!(f, "cycle"),
            Self::Milestone => write!(f, "milestone"),
            Self::Label => write!(f, "label"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

/// Caller-supplied scope narrowing a resolution search.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Canonical id of the scoping entity.
    pub id: String,
    /// Human label for error messages (e.g. "team ENG", "project Launch").
    pub label: String,
}

impl Scope {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One entity that matched a resolution query.
///
/// Produced transiently for ambiguity reporting; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub display_name: String,
    /// Owning scope shown for disambiguation (project or team name).
    pub scope: Option<String>,
    /// Extra context (target date, cycle number, start date, ...).
    pub hint: Option<String>,
}

impl Candidate {
    /// One line with enough context to pick this candidate without
    /// another lookup.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("{} [{}]", self.display_name, self.id)];
        if let Some(scope) = &self.scope {
            parts.push(scope.clone());
        }
        if let Some(hint) = &self.hint {
            parts.push(hint.clone());
        }
        parts.join(", ")
    }
}

/// Errors produced by the resolution subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Zero candidates after every applicable search pass.
    #[error("{}", not_found_message(.kind, .token, .context.as_deref()))]
    NotFound {
        kind: EntityKind,
        token: String,
        context: Option<String>,
    },

    /// More than one candidate survived scoping and tie-breaking.
    /// Resolution never guesses; the caller must narrow the search.
    #[error("{}", ambiguous_message(.kind, .token, .candidates, .suggestion))]
    Ambiguous {
        kind: EntityKind,
        token: String,
        candidates: Vec<Candidate>,
        suggestion: String,
    },

    /// The token is not a canonical id and does not have the `TEAM-123` shape.
    #[error("Malformed issue identifier '{token}': expected TEAM-123 or a full API id")]
    MalformedIdentifier { token: String },

    /// Backend failures pass through unchanged, never downgraded to NotFound.
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn not_found_message(kind: &EntityKind, token: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!("No {kind} found matching '{token}' in {ctx}"),
        None => format!("No {kind} found matching '{token}'"),
    }
}

fn ambiguous_message(
    kind: &EntityKind,
    token: &str,
    candidates: &[Candidate],
    suggestion: &str,
) -> String {
    let mut msg = format!("Multiple {kind}s match '{token}':");
    for candidate in candidates {
        msg.push_str("\n  ");
        msg.push_str(&candidate.describe());
    }
    msg.push('\n');
    msg.push_str(suggestion);
    msg
}

/// Extract the `nodes` list of a connection field from a response `data`
/// object. A missing or null field reads as an empty list; anything else
/// malformed is an API error, not a resolution failure.
pub(crate) fn nodes<T: DeserializeOwned>(data: &Value, field: &str) -> Result<Vec<T>, ResolveError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            let connection: Connection<T> = serde_json::from_value(value.clone())
                .map_err(|e| ApiError::Malformed(format!("bad '{field}' payload: {e}")))?;
            Ok(connection.nodes)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Canned-response backend for resolver unit tests.

    use crate::api::{ApiError, Backend};
    use serde_json::Value;
    use std::cell::RefCell;

    /// Backend stub returning queued responses in order and recording the
    /// documents it was asked to execute.
    pub struct StubBackend {
        responses: RefCell<Vec<Result<Value, ApiError>>>,
        pub calls: RefCell<Vec<(String, Value)>>,
    }

    impl StubBackend {
        pub fn new(responses: Vec<Result<Value, ApiError>>) -> Self {
            // Stored reversed so pop() yields them in submission order.
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: RefCell::new(responses),
                calls: RefCell::new(Vec::new()),
            }
        }

        /// A backend that fails the test if it is ever called.
        pub fn unreachable() -> Self {
            Self::new(Vec::new())
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Backend for StubBackend {
        fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
            self.calls
                .borrow_mut()
                .push((query.to_string(), variables));
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| panic!("unexpected backend call: {query}"))
        }
    }
}
