//! CLI command definitions for the `gcoach` binary.

pub mod credential;
pub mod feedback;
pub mod models;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Goal coaching feedback for student dashboards.
#[derive(Parser)]
#[command(name = "gcoach", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    ///
    /// Spans print to stdout, so this cannot be combined with `--json`.
    #[arg(long, global = true, conflicts_with = "json")]
    pub otel: bool,

    /// Config file (default: {data_dir}/config.toml).
    #[arg(long, global = true, env = "GOALCOACH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get feedback on a goal.
    Feedback {
        /// The goal text.
        goal: String,

        /// Curriculum context as JSON, or @path to a JSON file.
        #[arg(long)]
        context: Option<String>,

        /// API key for this request only.
        #[arg(long, env = "GOALCOACH_REQUEST_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Resolve the stored credential for this user.
        #[arg(long)]
        user: Option<String>,
    },

    /// Start the HTTP server.
    Serve {
        /// Port to listen on (default from config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage per-user credentials.
    Credential {
        #[command(subcommand)]
        action: CredentialCommand,
    },

    /// Show the configured model chain.
    Models,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CredentialCommand {
    /// Store a credential for a user (prompts when --value is omitted).
    Set {
        user: String,

        /// Credential value (for scripts).
        #[arg(long)]
        value: Option<String>,
    },

    /// Delete a user's credential.
    #[command(alias = "rm")]
    Delete { user: String },

    /// List users with stored credentials.
    #[command(alias = "ls")]
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_feedback_with_globals() {
        let cli = Cli::try_parse_from([
            "gcoach", "feedback", "Finish the lab", "--context", "@ctx.json", "--user", "u1",
            "--json", "-vv",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Feedback {
                goal,
                context,
                user,
                ..
            } => {
                assert_eq!(goal, "Finish the lab");
                assert_eq!(context.as_deref(), Some("@ctx.json"));
                assert_eq!(user.as_deref(), Some("u1"));
            }
            _ => panic!("expected feedback command"),
        }
    }

    #[test]
    fn test_parse_credential_alias() {
        let cli = Cli::try_parse_from(["gcoach", "credential", "ls"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Credential {
                action: CredentialCommand::List
            }
        ));
    }

    #[test]
    fn test_otel_conflicts_with_json_output() {
        let err = Cli::try_parse_from(["gcoach", "models", "--json", "--otel"]).err().expect("expected parse error");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["gcoach", "models", "--otel"]).unwrap();
        assert!(cli.otel && !cli.json);
    }
}
