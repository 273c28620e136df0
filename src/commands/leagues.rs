//! Leagues command implementation

use std::path::PathBuf;

use tracing::debug;

use crate::{
    core::token_path,
    oauth::token::now_millis,
    yahoo::{parse_leagues_from_response, League},
    Result,
};

use super::{
    common::{print_items, read_json_file, usable_access_token, yahoo_client},
    resolve_token,
};

pub struct LeaguesParams {
    pub game: String,
    pub file: Option<PathBuf>,
    pub as_json: bool,
    pub token: Option<String>,
}

/// One text line per league.
pub fn format_league(league: &League) -> String {
    let mut line = format!(
        "{}  {}  ({} teams, {})",
        league.league_key, league.name, league.num_teams, league.season
    );
    if let Some(team) = &league.team {
        line.push_str(&format!("  team: {} [{}]", team.name, team.team_key));
    }
    line
}

/// Handle the leagues command
pub async fn handle_leagues(params: LeaguesParams) -> Result<()> {
    let leagues = match &params.file {
        Some(path) => {
            debug!(path = %path.display(), "Decoding saved leagues response");
            parse_leagues_from_response(&read_json_file(path)?)
        }
        None => {
            let token = resolve_token(params.token, &token_path())?;
            let access_token = usable_access_token(&token, now_millis())?;
            // tarpaulin::skip - HTTP call, tested via wiremock in yahoo::http
            yahoo_client()?
                .get_user_leagues(access_token, &params.game)
                .await?
        }
    };

    if leagues.is_empty() && !params.as_json {
        println!("No leagues found");
        return Ok(());
    }
    print_items(&leagues, params.as_json, format_league)
}
