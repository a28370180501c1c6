//! goalcoach CLI and HTTP server entry point.
//!
//! Binary name: `gcoach`

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use console::style;

use goalcoach_observe::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, CredentialCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&TracingOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        json: cli.json,
        otel: cli.otel,
    }) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    finish_then(run(cli), shutdown_tracing).await
}

/// Await `work`, then call `cleanup` whether it succeeded or not.
async fn finish_then<F>(work: F, cleanup: impl FnOnce()) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    let result = work.await;
    cleanup();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "gcoach", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Feedback {
            goal,
            context,
            api_key,
            user,
        } => {
            cli::feedback::run_feedback(&state, goal, context.as_deref(), api_key, user, cli.json)
                .await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, models = ?state.config.models, "server listening");
            if !cli.quiet {
                println!(
                    "  {} goalcoach listening on {}",
                    style("⚡").bold(),
                    style(format!("http://{addr}")).cyan()
                );
                println!("  {}", style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Credential { action } => match action {
            CredentialCommand::Set { user, value } => {
                cli::credential::set_credential(&state, &user, value.as_deref(), cli.json).await?;
            }
            CredentialCommand::Delete { user } => {
                cli::credential::delete_credential(&state, &user, cli.json).await?;
            }
            CredentialCommand::List => {
                cli::credential::list_credentials(&state, cli.json).await?;
            }
        },

        Commands::Models => {
            cli::models::show_models(&state, cli.json)?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
