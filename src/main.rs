//! linr CLI - a command-line client for Linear issue tracking.

use clap::Parser;
use linr::api::GraphQlClient;
use linr::cli::{
    Cli, Commands, CycleCommands, IssueCommands, LabelCommands, MilestoneCommands,
    ProjectCommands, StateCommands, TeamCommands,
};
use linr::commands::{self, Output};
use linr::config::Config;
use std::process;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let human = cli.human_readable;

    if let Err(e) = run_command(cli, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn run_command(cli: Cli, human: bool) -> Result<(), linr::Error> {
    let config = Config::load()?;
    let api_key = config.api_key(cli.api_key)?;
    let client = GraphQlClient::new(api_key);

    match cli.command {
        Commands::Issue { command } => match command {
            IssueCommands::View { reference } => {
                let result = commands::issue::view(&client, &reference)?;
                output(&result, human);
            }
            IssueCommands::List { team, state } => {
                let result = commands::issue::list(&client, team.as_deref(), state.as_deref())?;
                output(&result, human);
            }
            IssueCommands::Create {
                title,
                team,
                description,
                state,
                project,
                cycle,
                milestone,
                labels,
                parent,
                priority,
                assignee,
            } => {
                let args = commands::issue::CreateArgs {
                    title,
                    // --team falls back to default_team from config
                    team: team.or_else(|| config.default_team.clone()),
                    description,
                    state,
                    project,
                    cycle,
                    milestone,
                    labels,
                    parent,
                    priority,
                    assignee,
                };
                let result = commands::issue::create(&client, args)?;
                output(&result, human);
            }
            IssueCommands::Update {
                reference,
                title,
                state,
                project,
                cycle,
                milestone,
                labels,
                priority,
            } => {
                let args = commands::issue::UpdateArgs {
                    reference,
                    title,
                    state,
                    project,
                    cycle,
                    milestone,
                    labels,
                    priority,
                };
                let result = commands::issue::update(&client, args)?;
                output(&result, human);
            }
        },

        Commands::Team { command } => match command {
            TeamCommands::List => {
                let result = commands::team::list(&client)?;
                output(&result, human);
            }
        },

        Commands::Project { command } => match command {
            ProjectCommands::List => {
                let result = commands::project::list(&client)?;
                output(&result, human);
            }
        },

        Commands::Cycle { command } => match command {
            CycleCommands::List { team } => {
                let result = commands::cycle::list(&client, &team)?;
                output(&result, human);
            }
        },

        Commands::Milestone { command } => match command {
            MilestoneCommands::List { project } => {
                let result = commands::milestone::list(&client, project.as_deref())?;
                output(&result, human);
            }
        },

        Commands::Label { command } => match command {
            LabelCommands::List { team } => {
                let result = commands::label::list(&client, team.as_deref())?;
                output(&result, human);
            }
        },

        Commands::State { command } => match command {
            StateCommands::List { team } => {
                let result = commands::state::list(&client, &team)?;
                output(&result, human);
            }
        },

        Commands::Whoami => {
            let result = commands::viewer::whoami(&client)?;
            output(&result, human);
        }
    }

    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
