//! CLI argument definitions for linctl.

use clap::{Parser, Subcommand};

/// Version string including git commit and build timestamp.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LIN_GIT_COMMIT"),
    " ",
    env!("LIN_BUILD_TIMESTAMP"),
    ")"
);

/// linctl - A command-line client for the Linear issue tracker.
///
/// Authenticate with `lin auth login`, then try `lin issue list`.
#[derive(Parser, Debug)]
#[command(name = "lin")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "A command-line client for the Linear issue tracker", long_about = None)]
pub struct Cli {
    /// Disable ANSI colors in output
    #[arg(long, global = true)]
    pub plaintext: bool,

    /// API key to use for this invocation (overrides config and
    /// LINEAR_API_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dependency tree of an issue (parent, sub-issues,
    /// blocks/blocked-by, related, duplicates)
    #[command(visible_alias = "deps")]
    Tree {
        /// Issue identifier (e.g. ENG-123) or id
        issue: String,

        /// Maximum expansion depth
        #[arg(long, default_value_t = 3)]
        depth: usize,

        /// Output the tree as a JSON document
        #[arg(long)]
        json: bool,
    },

    /// Issue management commands
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Comment commands
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Team commands
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// User commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Label commands
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Issue subcommands
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// List issues
    List {
        /// Filter by team key (e.g. ENG); falls back to the configured
        /// default team
        #[arg(short, long)]
        team: Option<String>,

        /// Filter by assignee display name
        #[arg(short, long)]
        assignee: Option<String>,

        /// Filter by workflow state name
        #[arg(short, long)]
        state: Option<String>,

        /// Maximum number of issues to list
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show issue details
    View {
        /// Issue identifier (e.g. ENG-123) or id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new issue
    Create {
        /// Issue title
        title: String,

        /// Team key (e.g. ENG); falls back to the configured default team
        #[arg(short, long)]
        team: Option<String>,

        /// Issue description (markdown)
        #[arg(short, long)]
        description: Option<String>,

        /// Priority (0 = none, 1 = urgent .. 4 = low)
        #[arg(short, long)]
        priority: Option<i64>,

        /// Assignee name or display name
        #[arg(short, long)]
        assignee: Option<String>,

        /// Label name (repeatable)
        #[arg(short, long)]
        label: Vec<String>,
    },

    /// Update an issue
    Update {
        /// Issue identifier (e.g. ENG-123) or id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description (markdown)
        #[arg(long)]
        description: Option<String>,

        /// New priority (0 = none, 1 = urgent .. 4 = low)
        #[arg(long)]
        priority: Option<i64>,

        /// New workflow state name (e.g. "In Progress")
        #[arg(long)]
        state: Option<String>,

        /// New assignee name or display name
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Archive an issue
    Archive {
        /// Issue identifier (e.g. ENG-123) or id
        id: String,
    },
}

/// Comment subcommands
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// List comments on an issue
    List {
        /// Issue identifier (e.g. ENG-123) or id
        issue: String,
    },

    /// Add a comment to an issue
    Add {
        /// Issue identifier (e.g. ENG-123) or id
        issue: String,

        /// Comment body (markdown)
        body: String,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List teams
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List workspace members
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Label subcommands
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// List issue labels
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Authentication subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Validate an API key and store it in the config file
    Login {
        /// API key; prompted for on stdin when omitted
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
    },

    /// Show the authenticated user and where the key came from
    Status,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (default-team, api-url)
        key: String,
    },

    /// Set a configuration value (empty value clears it)
    Set {
        /// Configuration key (default-team, api-url)
        key: String,

        /// Configuration value
        value: String,
    },

    /// List all configuration values
    List,
}
