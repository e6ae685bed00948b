//! lin - A command-line client for the Linear issue tracker.

use clap::Parser;
use linctl::cli::{
    AuthCommands, Cli, Commands, CommentCommands, ConfigCommands, IssueCommands, LabelCommands,
    TeamCommands, UserCommands,
};
use linctl::commands::{self, Context};
use linctl::config::Config;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> linctl::Result<()> {
    let config = Config::load()?;
    let ctx = Context::new(config, cli.plaintext, cli.api_key);

    match cli.command {
        Commands::Tree { issue, depth, json } => commands::tree::run(&ctx, &issue, depth, json),

        Commands::Issue { command } => match command {
            IssueCommands::List {
                team,
                assignee,
                state,
                limit,
                json,
            } => commands::issue::list(&ctx, team, assignee, state, limit, json),
            IssueCommands::View { id, json } => commands::issue::view(&ctx, &id, json),
            IssueCommands::Create {
                title,
                team,
                description,
                priority,
                assignee,
                label,
            } => commands::issue::create(&ctx, title, team, description, priority, assignee, label),
            IssueCommands::Update {
                id,
                title,
                description,
                priority,
                state,
                assignee,
            } => commands::issue::update(&ctx, &id, title, description, priority, state, assignee),
            IssueCommands::Archive { id } => commands::issue::archive(&ctx, &id),
        },

        Commands::Comment { command } => match command {
            CommentCommands::List { issue } => commands::comment::list(&ctx, &issue),
            CommentCommands::Add { issue, body } => commands::comment::add(&ctx, &issue, &body),
        },

        Commands::Team { command } => match command {
            TeamCommands::List { json } => commands::team::list(&ctx, json),
        },

        Commands::User { command } => match command {
            UserCommands::List { json } => commands::user::list(&ctx, json),
        },

        Commands::Label { command } => match command {
            LabelCommands::List { json } => commands::label::list(&ctx, json),
        },

        Commands::Auth { command } => match command {
            AuthCommands::Login { key } => commands::auth::login(&ctx, key),
            AuthCommands::Status => commands::auth::status(&ctx),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Get { key } => commands::config::get(&ctx, &key),
            ConfigCommands::Set { key, value } => commands::config::set(&ctx, &key, &value),
            ConfigCommands::List => commands::config::list(&ctx),
        },
    }
}
