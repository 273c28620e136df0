//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use yahoo_fantasy::{
    cli::{Commands, TokenCmd, YahooFantasy},
    commands::{
        leagues::{handle_leagues, LeaguesParams},
        roster::{handle_roster, RosterParams},
        serve::handle_serve,
        token::{handle_token_refresh, handle_token_save, handle_token_status},
    },
};

/// Diagnostics go to stderr so command output on stdout stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = YahooFantasy::parse();

    match app.command {
        Commands::Serve { bind } => handle_serve(bind)
            .await
            .with_context(|| format!("server on {bind} stopped"))?,

        Commands::Leagues {
            game,
            output,
            token,
        } => handle_leagues(LeaguesParams {
            game,
            file: output.file,
            as_json: output.json,
            token: token.token,
        })
        .await
        .context("failed to list leagues")?,

        Commands::Roster {
            team_key,
            output,
            token,
        } => handle_roster(RosterParams {
            team_key,
            file: output.file,
            as_json: output.json,
            token: token.token,
        })
        .await
        .context("failed to list roster")?,

        Commands::Token { cmd } => match cmd {
            TokenCmd::Status { token } => handle_token_status(token.token)?,
            TokenCmd::Refresh { token } => handle_token_refresh(token.token)
                .await
                .context("token refresh failed")?,
            TokenCmd::Save { encoded } => handle_token_save(&encoded)?,
        },
    }

    Ok(())
}
