//! Decoder for `team/{team_key}/roster` responses.
//!
//! `fantasy_content.team` is a union: element 0 is the team's own field
//! fragments, a later object carries `roster`. The roster always nests its
//! players under slot `"0"`:
//!
//! ```text
//! roster."0".players    indexed { player: [ [ {player_key}, {name: {full}}, .. ], {selected_position} ] }
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::yahoo::{
    indexed::{IndexedObject, Lenient},
    types::{de_opt_string, FragmentList, Player, UNKNOWN_PLAYER_NAME},
};

#[cfg(test)]
mod tests;

#[derive(Debug, Deserialize)]
struct RosterEnvelope {
    fantasy_content: RosterContent,
}

#[derive(Debug, Deserialize)]
struct RosterContent {
    team: Vec<TeamField>,
}

/// Element of the `team` array.
#[derive(Debug)]
enum TeamField {
    Roster(Option<RosterSlot>),
    Other,
}

#[derive(Debug, Deserialize)]
struct RosterSlot {
    players: IndexedObject<PlayerWrapper>,
}

#[derive(Debug, Deserialize)]
struct PlayerWrapper {
    player: Vec<FragmentList<PlayerFragment>>,
}

#[derive(Debug, Default, Deserialize)]
struct EligiblePosition {
    #[serde(default, deserialize_with = "de_opt_string")]
    position: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerFragment {
    #[serde(default, deserialize_with = "de_opt_string")]
    player_key: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    player_id: Option<String>,
    #[serde(default, deserialize_with = "de_present")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "de_opt_string")]
    display_position: Option<String>,
    #[serde(default, deserialize_with = "de_present")]
    headshot: Option<Value>,
    #[serde(default, deserialize_with = "de_opt_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    editorial_team_abbr: Option<String>,
    eligible_positions: Option<Vec<Lenient<EligiblePosition>>>,
}

/// `Some` whenever the key is present, including an explicit `null`.
fn de_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A string or number member of an object, as text.
fn scalar_member(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for TeamField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Arrays (the team's own fragments) never carry a roster
        let Value::Object(mut obj) = Value::deserialize(deserializer)? else {
            return Ok(TeamField::Other);
        };
        let Some(roster) = obj.remove("roster") else {
            return Ok(TeamField::Other);
        };
        let slot = roster
            .get("0")
            .and_then(|slot| RosterSlot::deserialize(slot).ok());
        Ok(TeamField::Roster(slot))
    }
}

/// Accumulate a player from its field fragments. Later fragments win.
///
/// A `name` or `headshot` fragment replaces the earlier value whatever its
/// shape; one without a usable `full` or `url` clears it.
fn player_from_fragments<'a>(fragments: impl Iterator<Item = &'a PlayerFragment>) -> Option<Player> {
    let mut player_key = String::new();
    let mut player_id = String::new();
    let mut name = String::new();
    let mut position = String::new();
    let mut headshot_url = None;
    let mut status = None;
    let mut nba_team = None;
    let mut eligible_positions = Vec::new();

    for field in fragments {
        if let Some(v) = &field.player_key {
            player_key.clone_from(v);
        }
        if let Some(v) = &field.player_id {
            player_id.clone_from(v);
        }
        if let Some(v) = &field.name {
            name = scalar_member(v, "full").unwrap_or_default();
        }
        if let Some(v) = &field.display_position {
            position.clone_from(v);
        }
        if let Some(v) = &field.headshot {
            headshot_url = scalar_member(v, "url");
        }
        if let Some(v) = &field.status {
            status = Some(v.clone());
        }
        if let Some(v) = &field.editorial_team_abbr {
            nba_team = Some(v.clone());
        }
        if let Some(positions) = &field.eligible_positions {
            eligible_positions.extend(
                positions
                    .iter()
                    .filter_map(|p| p.get()?.position.clone())
                    .filter(|p| !p.is_empty()),
            );
        }
    }

    if player_key.is_empty() {
        return None;
    }

    if name.is_empty() {
        name = UNKNOWN_PLAYER_NAME.to_string();
    }

    Some(Player {
        player_key,
        player_id,
        name,
        position,
        eligible_positions,
        headshot_url,
        status,
        nba_team,
    })
}

/// Flatten a roster response into `Player`s in roster order.
///
/// Wrappers whose first element is not a fragment list, and players without
/// a key, are skipped.
pub fn parse_roster_from_response(response: &Value) -> Vec<Player> {
    let Ok(envelope) = RosterEnvelope::deserialize(response) else {
        return Vec::new();
    };

    envelope
        .fantasy_content
        .team
        .iter()
        .filter_map(|field| match field {
            TeamField::Roster(Some(slot)) => Some(slot),
            _ => None,
        })
        .flat_map(|slot| {
            let decoded = slot.players.iter().len();
            if decoded < slot.players.declared_count() {
                tracing::debug!(
                    declared = slot.players.declared_count(),
                    decoded,
                    "roster players missing or undecodable"
                );
            }
            slot.players.iter()
        })
        .filter_map(|wrapper| {
            let fragments = wrapper.player.first()?.fragments()?;
            player_from_fragments(fragments)
        })
        .collect()
}
