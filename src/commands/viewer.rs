//! `lr whoami`.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::User;

/// Result of `lr whoami`.
#[derive(Debug, Serialize)]
pub struct Whoami {
    pub viewer: User,
}

impl Output for Whoami {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        let name = self
            .viewer
            .display_name
            .as_deref()
            .unwrap_or(&self.viewer.name);
        match &self.viewer.email {
            Some(email) => format!("Logged in as {name} <{email}>"),
            None => format!("Logged in as {name}"),
        }
    }
}

/// Fetch the authenticated user. Also used to resolve `--assignee me`.
pub fn current(backend: &dyn Backend) -> Result<User> {
    let data = backend.execute(queries::VIEWER, json!({}))?;
    super::decode(&data, "viewer")
}

/// Show the authenticated user, validating the API key.
pub fn whoami(backend: &dyn Backend) -> Result<Whoami> {
    Ok(Whoami {
        viewer: current(backend)?,
    })
}
