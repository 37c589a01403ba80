//! `lr project` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, Project};

/// Result of `lr project list`.
#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

impl Output for ProjectList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects found.".to_string();
        }
        self.projects
            .iter()
            .map(|p| match &p.state {
                Some(state) => format!("{} ({state})", p.name),
                None => p.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List all projects in the workspace.
pub fn list(backend: &dyn Backend) -> Result<ProjectList> {
    let data = backend.execute(queries::PROJECTS, json!({}))?;
    let connection: Connection<Project> = super::decode(&data, "projects")?;
    Ok(ProjectList {
        projects: connection.nodes,
    })
}
