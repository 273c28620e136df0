//! HTTP client for the Yahoo Fantasy Sports API

use reqwest::{header::ACCEPT, Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    yahoo::{
        leagues::parse_leagues_from_response,
        roster::parse_roster_from_response,
        types::{League, Player},
    },
    Result, YahooError,
};


/// Base URL for the Yahoo Fantasy Sports API.
pub const API_BASE_URL: &str = "https://fantasysports.yahooapis.com/";

/// Game code used when none is given.
pub const DEFAULT_GAME: &str = "nba";

/// Path used by the forwarding gateway when the caller gives none.
pub const DEFAULT_PATH: &str = "fantasy/v2/users;use_login=1?format=json";

/// Leagues (with the user's own team) for one game.
pub fn user_leagues_path(game: &str) -> String {
    format!("fantasy/v2/users;use_login=1/games;game_keys={game}/leagues/teams?format=json")
}

/// Roster of one team.
pub fn roster_path(team_key: &str) -> String {
    format!("fantasy/v2/team/{team_key}/roster?format=json")
}

#[derive(Debug, Clone)]
pub struct YahooClient {
    http: Client,
    base: Url,
}

impl YahooClient {
    pub fn new(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// `path` resolved against the API base, or `None` when the result leaves
    /// the base's `fantasy/` tree.
    ///
    /// Checked after joining, so percent-encoded dot segments and backslashes
    /// are judged the way the request will actually be sent.
    pub fn api_url(&self, path: &str) -> Option<Url> {
        let scope = self.base.join("fantasy/").ok()?;
        let url = self.base.join(path).ok()?;
        (url.origin() == scope.origin() && url.path().starts_with(scope.path())).then_some(url)
    }

    /// Issue a GET for `path` (relative to the API base) with the bearer
    /// token attached. The response is returned as-is, whatever its status.
    pub async fn forward(&self, access_token: &str, path: &str) -> Result<Response> {
        let url = self.api_url(path).ok_or_else(|| YahooError::OutsideApi {
            path: path.to_string(),
        })?;
        debug!(%url, "Yahoo API request");

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        Ok(response)
    }

    pub async fn fetch_json(&self, access_token: &str, path: &str) -> Result<Value> {
        let v = self
            .forward(access_token, path)
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(v)
    }

    pub async fn get_user_leagues(&self, access_token: &str, game: &str) -> Result<Vec<League>> {
        let v = self.fetch_json(access_token, &user_leagues_path(game)).await?;
        Ok(parse_leagues_from_response(&v))
    }

    pub async fn get_roster(&self, access_token: &str, team_key: &str) -> Result<Vec<Player>> {
        let v = self.fetch_json(access_token, &roster_path(team_key)).await?;
        Ok(parse_roster_from_response(&v))
    }
}
