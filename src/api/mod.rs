//! GraphQL API client for Linear.
//!
//! The resolution subsystem and the command handlers both talk to the API
//! through the [`Backend`] trait, which has exactly one operation: execute
//! a GraphQL document with variables and hand back the `data` object.
//! [`GraphQlClient`] is the production implementation on top of a blocking
//! `ureq` agent; tests substitute a stub with canned responses.

pub mod queries;

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Linear GraphQL endpoint.
const API_URL: &str = "https://api.linear.app/graphql";

/// User-Agent header sent with every request.
const USER_AGENT: &str = "linr-cli";

/// Errors that can occur while talking to the Linear API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API key is invalid or expired (401 Unauthorized)
    #[error("Invalid or expired API key: Linear returned 401 Unauthorized")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("API request failed: HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Network or IO failure before a response was received
    #[error("Network error: {0}")]
    Transport(String),

    /// The response carried a GraphQL `errors` list (first message surfaced)
    #[error("Linear API error: {0}")]
    Backend(String),

    /// The response body did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    Malformed(String),
}

/// Execution contract the resolution subsystem depends on.
///
/// Resolvers only ever issue read queries through this trait; mutations are
/// sent by the command layer, which happens to reuse the same entry point.
pub trait Backend {
    /// Execute a GraphQL document and return the response `data` object.
    fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError>;
}

/// GraphQL response envelope (only the fields we care about).
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Blocking GraphQL client holding the API key.
pub struct GraphQlClient {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl GraphQlClient {
    /// Create a client against the production Linear endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_url(API_URL.to_string(), api_key)
    }

    /// Create a client against a custom endpoint.
    pub fn with_url(url: String, api_key: String) -> Self {
        Self {
            agent: ureq::agent(),
            url,
            api_key,
        }
    }
}

impl Backend for GraphQlClient {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        debug!("POST {} ({} byte document)", self.url, query.len());

        // Linear expects the raw key in the Authorization header, no Bearer prefix.
        let response = self
            .agent
            .post(&self.url)
            .set("Authorization", &self.api_key)
            .set("Content-Type", "application/json")
            .set("User-Agent", USER_AGENT)
            .send_json(serde_json::json!({
                "query": query,
                "variables": variables,
            }));

        match response {
            Ok(resp) => {
                let body: GraphQlResponse = resp
                    .into_json()
                    .map_err(|e| ApiError::Malformed(e.to_string()))?;

                if let Some(errors) = body.errors {
                    if let Some(first) = errors.into_iter().next() {
                        return Err(ApiError::Backend(first.message));
                    }
                }

                body.data.ok_or_else(|| {
                    ApiError::Malformed("response carried neither data nor errors".to_string())
                })
            }
            Err(ureq::Error::Status(401, _)) => Err(ApiError::Unauthorized),
            Err(ureq::Error::Status(code, resp)) => {
                let message = resp.into_string().unwrap_or_default();
                Err(ApiError::Http {
                    status: code,
                    message,
                })
            }
            Err(e) => Err(ApiError::Transport(e.to_string())),
        }
    }
}
