//! Roster command implementation

use std::path::PathBuf;

use tracing::debug;

use crate::{
    cli::types::TeamKey,
    core::token_path,
    oauth::token::now_millis,
    yahoo::{parse_roster_from_response, Player},
    Result,
};

use super::{
    common::{print_items, read_json_file, usable_access_token, yahoo_client},
    resolve_token,
};

pub struct RosterParams {
    pub team_key: TeamKey,
    pub file: Option<PathBuf>,
    pub as_json: bool,
    pub token: Option<String>,
}

/// One text line per player.
pub fn format_player(player: &Player) -> String {
    let mut line = format!("{:<28} {:<6}", player.name, player.position);
    if let Some(team) = &player.nba_team {
        line.push_str(&format!(" {team:<4}"));
    }
    if !player.eligible_positions.is_empty() {
        line.push_str(&format!(" [{}]", player.eligible_positions.join(",")));
    }
    if let Some(status) = &player.status {
        line.push_str(&format!(" ({status})"));
    }
    line.trim_end().to_string()
}

/// Shown in text mode when the team has no players.
pub fn empty_roster_message(team_key: &TeamKey) -> String {
    format!(
        "No players found for {team_key} (league {})",
        team_key.league_key()
    )
}

/// Handle the roster command
pub async fn handle_roster(params: RosterParams) -> Result<()> {
    let players = match &params.file {
        Some(path) => {
            debug!(path = %path.display(), "Decoding saved roster response");
            parse_roster_from_response(&read_json_file(path)?)
        }
        None => {
            let token = resolve_token(params.token, &token_path())?;
            let access_token = usable_access_token(&token, now_millis())?;
            // tarpaulin::skip - HTTP call, tested via wiremock in yahoo::http
            yahoo_client()?
                .get_roster(access_token, params.team_key.as_str())
                .await?
        }
    };

    if players.is_empty() && !params.as_json {
        println!("{}", empty_roster_message(&params.team_key));
        return Ok(());
    }
    print_items(&players, params.as_json, format_player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            player_key: "428.p.1".to_string(),
            player_id: "1".to_string(),
            name: "Jane Doe".to_string(),
            position: "PG".to_string(),
            eligible_positions: vec![],
            headshot_url: None,
            status: None,
            nba_team: None,
        }
    }

    #[test]
    fn test_format_player_minimal() {
        assert_eq!(format_player(&player()), format!("{:<28} PG", "Jane Doe"));
    }

    #[test]
    fn test_empty_roster_message_names_league() {
        let key: TeamKey = "428.l.12345.t.3".parse().unwrap();
        assert_eq!(
            empty_roster_message(&key),
            "No players found for 428.l.12345.t.3 (league 428.l.12345)"
        );
    }

    #[test]
    fn test_format_player_full() {
        let p = Player {
            eligible_positions: vec!["PG".to_string(), "G".to_string()],
            status: Some("GTD".to_string()),
            nba_team: Some("LAL".to_string()),
            ..player()
        };
        let line = format_player(&p);
        assert!(line.starts_with("Jane Doe"));
        assert!(line.contains(" LAL "));
        assert!(line.contains("[PG,G]"));
        assert!(line.ends_with("(GTD)"));
    }
}
