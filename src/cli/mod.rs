//! CLI argument definitions and parsing.

pub mod types;

use std::{net::SocketAddr, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use types::TeamKey;

use crate::{server::DEFAULT_BIND, yahoo::http::DEFAULT_GAME, BIND_ENV_VAR};

/// Where to take the OAuth token from.
#[derive(Debug, Clone, Default, Args)]
pub struct TokenArgs {
    /// Encoded token (or set `YAHOO_OAUTH_TOKEN`; falls back to the saved token file).
    #[clap(long)]
    pub token: Option<String>,
}

/// Output and input options shared by the data commands.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Decode a saved API response instead of calling Yahoo.
    #[clap(long, short)]
    pub file: Option<PathBuf>,

    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum TokenCmd {
    /// Show token type, expiry and whether it needs a refresh.
    Status {
        #[clap(flatten)]
        token: TokenArgs,
    },

    /// Exchange the refresh token for a new access token and save it.
    ///
    /// Needs `YAHOO_CLIENT_ID` and `YAHOO_CLIENT_SECRET`.
    Refresh {
        #[clap(flatten)]
        token: TokenArgs,
    },

    /// Save an encoded token, e.g. the `yahoo_oauth` cookie value from the browser.
    Save {
        /// Encoded token (percent-encoded cookie values are accepted).
        encoded: String,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "yahoo-fantasy", about = "Yahoo Fantasy Sports OAuth gateway and CLI")]
pub struct YahooFantasy {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the OAuth endpoints and the Yahoo forwarding gateway.
    Serve {
        /// Address to listen on.
        #[clap(long, short, env = BIND_ENV_VAR, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },

    /// List your leagues (and your team in each) for one game.
    Leagues {
        /// Game code or id (e.g. nba, nfl, 428).
        #[clap(long, short, default_value = DEFAULT_GAME)]
        game: String,

        #[clap(flatten)]
        output: OutputArgs,

        #[clap(flatten)]
        token: TokenArgs,
    },

    /// List the players on a team's roster.
    Roster {
        /// Team key, e.g. `428.l.12345.t.3`.
        #[clap(long, short)]
        team_key: TeamKey,

        #[clap(flatten)]
        output: OutputArgs,

        #[clap(flatten)]
        token: TokenArgs,
    },

    /// Inspect, refresh or save the OAuth token used by the CLI.
    Token {
        #[clap(subcommand)]
        cmd: TokenCmd,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        let app = YahooFantasy::try_parse_from([
            "yahoo-fantasy",
            "roster",
            "--team-key",
            "428.l.1.t.2",
            "--json",
        ])
        .unwrap();

        match app.command {
            Commands::Roster {
                team_key,
                output,
                token,
            } => {
                assert_eq!(team_key.as_str(), "428.l.1.t.2");
                assert!(output.json);
                assert!(output.file.is_none());
                assert!(token.token.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_roster_rejects_bad_key() {
        assert!(
            YahooFantasy::try_parse_from(["yahoo-fantasy", "roster", "--team-key", "nope"]).is_err()
        );
    }

    #[test]
    fn test_leagues_defaults_to_nba() {
        let app = YahooFantasy::try_parse_from(["yahoo-fantasy", "leagues"]).unwrap();
        match app.command {
            Commands::Leagues { game, output, .. } => {
                assert_eq!(game, "nba");
                assert!(!output.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_token_save_takes_positional() {
        let app = YahooFantasy::try_parse_from(["yahoo-fantasy", "token", "save", "abc"]).unwrap();
        match app.command {
            Commands::Token {
                cmd: TokenCmd::Save { encoded },
            } => assert_eq!(encoded, "abc"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_serve_bind_flag() {
        let app =
            YahooFantasy::try_parse_from(["yahoo-fantasy", "serve", "--bind", "0.0.0.0:8080"])
                .unwrap();
        match app.command {
            Commands::Serve { bind } => assert_eq!(bind.port(), 8080),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
