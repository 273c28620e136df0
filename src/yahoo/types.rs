use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::yahoo::indexed::Lenient;


/// The caller's own team within a league.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Team {
    pub team_key: String,
    pub team_id: String,
    pub name: String,
}

/// A fantasy league the signed-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct League {
    pub league_key: String,
    pub name: String,
    pub num_teams: u32,
    pub season: String,
    /// Present only when the response embedded the user's team for this league.
    pub team: Option<Team>,
}

/// A rostered player
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Player {
    pub player_key: String,
    pub player_id: String,
    pub name: String,
    /// Yahoo's `display_position`, e.g. `"PG,SG"`.
    pub position: String,
    pub eligible_positions: Vec<String>,
    pub headshot_url: Option<String>,
    pub status: Option<String>,
    /// Editorial (real-world) team abbreviation.
    pub nba_team: Option<String>,
}

pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// First element of a `team` or `player` array: the list of single-key field
/// fragments. Any other shape is kept as `Other` so the surrounding array
/// still decodes.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentList<F> {
    Fragments(Vec<Lenient<F>>),
    Other,
}

impl<F> FragmentList<F> {
    pub fn fragments(&self) -> Option<impl Iterator<Item = &F>> {
        match self {
            FragmentList::Fragments(list) => Some(list.iter().filter_map(Lenient::get)),
            FragmentList::Other => None,
        }
    }
}

impl<'de, F: serde::de::DeserializeOwned> Deserialize<'de> for FragmentList<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(FragmentList::Fragments(
                items
                    .into_iter()
                    .map(|item| Lenient(serde_json::from_value(item).ok()))
                    .collect(),
            )),
            _ => Ok(FragmentList::Other),
        }
    }
}

/// Yahoo sends most scalars as strings but is not consistent about it.
pub(crate) fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn de_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
