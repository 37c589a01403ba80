//! `lr cycle` commands.

use serde::Serialize;
use serde_json::json;

use super::Output;
use crate::Result;
use crate::api::{Backend, queries};
use crate::models::{Connection, Cycle};
use crate::resolve;

/// Result of `lr cycle list`.
#[derive(Debug, Serialize)]
pub struct CycleList {
    pub cycles: Vec<Cycle>,
}

impl Output for CycleList {
    fn to_json(&self) -> String {
        super::json_string(self)
    }

    fn to_human(&self) -> String {
        if self.cycles.is_empty() {
            return "No cycles found.".to_string();
        }
        self.cycles
            .iter()
            .map(|c| {
                let marker = if c.is_active {
                    " (active)"
                } else if c.is_next {
                    " (next)"
                } else if c.is_previous {
                    " (previous)"
                } else {
                    ""
                };
                format!(
                    "{:<20} {} to {}{}",
                    c.display_name(),
                    c.starts_at.date_naive(),
                    c.ends_at.date_naive(),
                    marker
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// List cycles for a team.
pub fn list(backend: &dyn Backend, team: &str) -> Result<CycleList> {
    let scope = resolve::team::scope(backend, team)?;
    let data = backend.execute(
        queries::CYCLES,
        json!({ "filter": { "team": { "id": { "eq": scope.id } } } }),
    )?;
    let connection: Connection<Cycle> = super::decode(&data, "cycles")?;
    Ok(CycleList {
        cycles: connection.nodes,
    })
}
