//! CLI argument definitions for linr.

use clap::{Parser, Subcommand};

/// Version string with build metadata baked in by build.rs.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LR_GIT_COMMIT"),
    " ",
    env!("LR_BUILD_TIMESTAMP"),
    ")"
);

/// linr - a command-line client for Linear issue tracking.
///
/// Entities are addressed by human-friendly identifiers: issue references
/// like ENG-42, team keys, or plain names. linr resolves them to API ids
/// before talking to Linear.
#[derive(Parser, Debug)]
#[command(name = "lr")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "A command-line client for Linear issue tracking", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Linear API key. Falls back to the api_key entry in the config file.
    #[arg(
        long = "api-key",
        global = true,
        env = "LINEAR_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue commands
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Team commands
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Project commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Cycle commands
    Cycle {
        #[command(subcommand)]
        command: CycleCommands,
    },

    /// Milestone commands
    Milestone {
        #[command(subcommand)]
        command: MilestoneCommands,
    },

    /// Label commands
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Workflow state commands
    State {
        #[command(subcommand)]
        command: StateCommands,
    },

    /// Show the authenticated user (validates the API key)
    Whoami,
}

/// Issue subcommands
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Show an issue by reference (e.g. ENG-42) or id
    View {
        /// Issue reference (ENG-42) or API id
        reference: String,
    },

    /// List issues
    List {
        /// Limit to a team (key, name, or id)
        #[arg(short, long)]
        team: Option<String>,

        /// Limit to a workflow state (by name, case-insensitive)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Create an issue
    Create {
        /// Issue title
        title: String,

        /// Team (key, name, or id). Falls back to default_team from config.
        #[arg(short, long)]
        team: Option<String>,

        /// Description (markdown)
        #[arg(short, long)]
        description: Option<String>,

        /// Workflow state (by name)
        #[arg(short, long)]
        state: Option<String>,

        /// Project (by name or id)
        #[arg(short, long)]
        project: Option<String>,

        /// Cycle (by name or id)
        #[arg(short = 'c', long)]
        cycle: Option<String>,

        /// Milestone (by name or id)
        #[arg(short, long)]
        milestone: Option<String>,

        /// Label (by name or id); repeatable
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Parent issue (reference or id)
        #[arg(long)]
        parent: Option<String>,

        /// Priority (0 none, 1 urgent, 2 high, 3 normal, 4 low)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        priority: Option<u8>,

        /// Assign to yourself
        #[arg(long = "assignee", value_name = "me")]
        assignee: Option<String>,
    },

    /// Update an issue
    Update {
        /// Issue reference (ENG-42) or API id
        reference: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New workflow state (by name, scoped to the issue's team)
        #[arg(short, long)]
        state: Option<String>,

        /// Move to a project (by name or id)
        #[arg(short, long)]
        project: Option<String>,

        /// Move to a cycle (by name or id)
        #[arg(short = 'c', long)]
        cycle: Option<String>,

        /// Set the milestone (by name or id)
        #[arg(short, long)]
        milestone: Option<String>,

        /// Replace labels (by name or id); repeatable
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// New priority (0 none, 1 urgent, 2 high, 3 normal, 4 low)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        priority: Option<u8>,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List all teams
    List,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    List,
}

/// Cycle subcommands
#[derive(Subcommand, Debug)]
pub enum CycleCommands {
    /// List cycles for a team
    List {
        /// Team (key, name, or id)
        #[arg(short, long)]
        team: String,
    },
}

/// Milestone subcommands
#[derive(Subcommand, Debug)]
pub enum MilestoneCommands {
    /// List milestones
    List {
        /// Limit to a project (by name or id)
        #[arg(short, long)]
        project: Option<String>,
    },
}

/// Label subcommands
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// List labels
    List {
        /// Limit to a team (key, name, or id)
        #[arg(short, long)]
        team: Option<String>,
    },
}

/// Workflow state subcommands
#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// List workflow states for a team
    List {
        /// Team (key, name, or id)
        #[arg(short, long)]
        team: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn issue_create_parses_repeated_labels() {
        let cli = Cli::parse_from([
            "lr", "issue", "create", "Fix it", "--team", "ENG", "--label", "bug", "--label",
            "urgent",
        ]);
        match cli.command {
            Commands::Issue {
                command: IssueCommands::Create { team, labels, .. },
            } => {
                assert_eq!(team.as_deref(), Some("ENG"));
                assert_eq!(labels, vec!["bug".to_string(), "urgent".to_string()]);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
