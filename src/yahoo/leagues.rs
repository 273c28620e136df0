//! Decoder for `users;use_login=1/games/leagues/teams` responses.
//!
//! Shape (abridged):
//!
//! ```text
//! fantasy_content.users            indexed { user: [ {guid}, {games} ] }
//!   games                          indexed { game: [ {game_key..}, {leagues} ] }
//!     leagues                      indexed { league: [ {league attrs}, {teams}? ] }
//!       teams                      indexed { team: [ [ {team_key}, {team_id}, {name}, .. ], .. ] }
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::yahoo::{
    indexed::IndexedObject,
    types::{de_opt_string, de_opt_u32, FragmentList, League, Team},
};


#[derive(Debug, Deserialize)]
struct LeaguesEnvelope {
    fantasy_content: UsersContent,
}

#[derive(Debug, Deserialize)]
struct UsersContent {
    users: IndexedObject<UserWrapper>,
}

#[derive(Debug, Deserialize)]
struct UserWrapper {
    user: Vec<UserField>,
}

#[derive(Debug, Deserialize)]
struct GameWrapper {
    game: Vec<GameField>,
}

#[derive(Debug, Deserialize)]
struct LeagueWrapper {
    league: Vec<LeagueField>,
}

#[derive(Debug, Deserialize)]
struct TeamWrapper {
    team: Vec<FragmentList<TeamFragment>>,
}

#[derive(Debug, Default, Deserialize)]
struct LeagueAttributes {
    #[serde(default, deserialize_with = "de_opt_string")]
    league_key: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    num_teams: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_string")]
    season: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamFragment {
    #[serde(default, deserialize_with = "de_opt_string")]
    team_key: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    team_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    name: Option<String>,
}

/// Element of a `user` array.
#[derive(Debug)]
enum UserField {
    Games(IndexedObject<GameWrapper>),
    Other,
}

/// Element of a `game` array.
#[derive(Debug)]
enum GameField {
    Leagues(IndexedObject<LeagueWrapper>),
    Other,
}

/// Element of a `league` array.
#[derive(Debug)]
enum LeagueField {
    Teams(IndexedObject<TeamWrapper>),
    Attributes(LeagueAttributes),
    Other,
}

/// Decode the collection under `key` if `value` is an object carrying it.
fn child_collection<T>(obj: &Map<String, Value>, key: &str) -> Option<IndexedObject<T>>
where
    T: serde::de::DeserializeOwned,
{
    obj.get(key)?.as_object().map(IndexedObject::from_map)
}

impl<'de> Deserialize<'de> for UserField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_object()
            .and_then(|obj| child_collection(obj, "games"))
            .map_or(UserField::Other, UserField::Games))
    }
}

impl<'de> Deserialize<'de> for GameField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_object()
            .and_then(|obj| child_collection(obj, "leagues"))
            .map_or(GameField::Other, GameField::Leagues))
    }
}

impl<'de> Deserialize<'de> for LeagueField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(obj) = Value::deserialize(deserializer)? else {
            return Ok(LeagueField::Other);
        };
        if let Some(teams) = child_collection(&obj, "teams") {
            return Ok(LeagueField::Teams(teams));
        }
        Ok(serde_json::from_value(Value::Object(obj))
            .map_or(LeagueField::Other, LeagueField::Attributes))
    }
}

/// Accumulate a team from its field fragments. Later fragments win.
fn team_from_fragments<'a>(fragments: impl Iterator<Item = &'a TeamFragment>) -> Option<Team> {
    let mut team_key = String::new();
    let mut team_id = String::new();
    let mut name = String::new();

    for field in fragments {
        if let Some(v) = &field.team_key {
            team_key.clone_from(v);
        }
        if let Some(v) = &field.team_id {
            team_id.clone_from(v);
        }
        if let Some(v) = &field.name {
            name.clone_from(v);
        }
    }

    (!team_key.is_empty()).then_some(Team {
        team_key,
        team_id,
        name,
    })
}

/// The user's team from the first `teams` wrapper in the league union.
///
/// Only the first `teams`-bearing element is consulted, and within it the
/// first team with a key.
fn first_team(fields: &[LeagueField]) -> Option<Team> {
    let teams = fields.iter().find_map(|field| match field {
        LeagueField::Teams(teams) => Some(teams),
        _ => None,
    })?;

    teams.iter().find_map(|wrapper| {
        let fragments = wrapper.team.first()?.fragments()?;
        team_from_fragments(fragments)
    })
}

fn league_from_fields(fields: &[LeagueField]) -> Option<League> {
    let LeagueField::Attributes(attrs) = fields.first()? else {
        return None;
    };
    let league_key = attrs.league_key.clone().filter(|k| !k.is_empty())?;

    Some(League {
        league_key,
        name: attrs.name.clone().unwrap_or_default(),
        num_teams: attrs.num_teams.unwrap_or(0),
        season: attrs.season.clone().unwrap_or_default(),
        team: first_team(fields),
    })
}

/// Flatten a leagues response into `League`s in traversal order.
///
/// Never fails: missing or malformed branches produce fewer leagues.
pub fn parse_leagues_from_response(response: &Value) -> Vec<League> {
    let Ok(envelope) = LeaguesEnvelope::deserialize(response) else {
        return Vec::new();
    };

    let mut leagues = Vec::new();

    for user in &envelope.fantasy_content.users {
        for user_field in &user.user {
            let UserField::Games(games) = user_field else {
                continue;
            };

            for game in games {
                for game_field in &game.game {
                    let GameField::Leagues(league_wrappers) = game_field else {
                        continue;
                    };

                    leagues.extend(
                        league_wrappers
                            .iter()
                            .filter_map(|wrapper| league_from_fields(&wrapper.league)),
                    );
                }
            }
        }
    }

    leagues
}
