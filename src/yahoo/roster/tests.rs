//! Unit tests for the roster decoder

use super::*;
use serde_json::json;

fn player_wrapper(fragments: Value) -> Value {
    json!({
        "player": [
            fragments,
            { "selected_position": [ { "coverage_type": "date" }, { "position": "PG" } ] }
        ]
    })
}

fn full_player_fragments() -> Value {
    json!([
        { "player_key": "428.p.5352" },
        { "player_id": "5352" },
        { "name": { "full": "Stephen Curry", "first": "Stephen", "last": "Curry" } },
        { "status": "GTD" },
        { "editorial_player_key": "nba.p.4612" },
        { "editorial_team_abbr": "GSW" },
        { "display_position": "PG,SG" },
        { "headshot": { "url": "https://s.yimg.com/curry.png", "size": "small" } },
        [],
        {
            "eligible_positions": [
                { "position": "PG" },
                { "position": "SG" },
                { "position": "" },
                { "position": "Util" }
            ]
        }
    ])
}

fn roster_response(players: Value) -> Value {
    json!({
        "fantasy_content": {
            "team": [
                [
                    { "team_key": "428.l.1.t.3" },
                    { "team_id": "3" },
                    { "name": "My Squad" }
                ],
                {
                    "roster": {
                        "coverage_type": "date",
                        "date": "2024-11-02",
                        "0": { "players": players }
                    }
                }
            ]
        }
    })
}

#[cfg(test)]
mod roster_tests {
    use super::*;

    #[test]
    fn test_full_player_is_decoded() {
        let response = roster_response(json!({
            "0": player_wrapper(full_player_fragments()),
            "count": 1
        }));

        let players = parse_roster_from_response(&response);

        assert_eq!(players.len(), 1);
        assert_eq!(
            players[0],
            Player {
                player_key: "428.p.5352".to_string(),
                player_id: "5352".to_string(),
                name: "Stephen Curry".to_string(),
                position: "PG,SG".to_string(),
                eligible_positions: vec!["PG".to_string(), "SG".to_string(), "Util".to_string()],
                headshot_url: Some("https://s.yimg.com/curry.png".to_string()),
                status: Some("GTD".to_string()),
                nba_team: Some("GSW".to_string()),
            }
        );
    }

    #[test]
    fn test_malformed_wrapper_is_skipped_and_name_defaults() {
        let response = roster_response(json!({
            "0": player_wrapper(full_player_fragments()),
            "1": player_wrapper(json!([])),
            "2": player_wrapper(json!([
                { "player_key": "428.p.6014" },
                { "player_id": "6014" },
                { "display_position": "C" }
            ])),
            "count": 3
        }));

        let players = parse_roster_from_response(&response);

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].player_key, "428.p.5352");
        assert_eq!(players[1].player_key, "428.p.6014");
        assert_eq!(players[1].name, "Unknown");
        assert!(players[1].eligible_positions.is_empty());
        assert_eq!(players[1].headshot_url, None);
        assert_eq!(players[1].status, None);
        assert_eq!(players[1].nba_team, None);
    }

    #[test]
    fn test_empty_full_name_defaults_to_unknown() {
        let response = roster_response(json!({
            "0": player_wrapper(json!([
                { "player_key": "428.p.1" },
                { "name": { "full": "" } }
            ])),
            "1": player_wrapper(json!([
                { "player_key": "428.p.2" },
                { "name": { "first": "Only" } }
            ])),
            "count": 2
        }));

        let names: Vec<String> = parse_roster_from_response(&response)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Unknown", "Unknown"]);
    }

    #[test]
    fn test_headshot_without_url_is_none() {
        let response = roster_response(json!({
            "0": player_wrapper(json!([
                { "player_key": "428.p.1" },
                { "headshot": { "size": "small" } }
            ])),
            "count": 1
        }));

        assert_eq!(parse_roster_from_response(&response)[0].headshot_url, None);
    }

    #[test]
    fn test_later_name_and_headshot_fragments_replace_earlier_ones() {
        let response = roster_response(json!({
            "0": player_wrapper(json!([
                { "player_key": "428.p.1" },
                { "name": { "full": "First Name" } },
                { "headshot": { "url": "https://s.yimg.com/a.png" } },
                { "name": "not an object" },
                { "headshot": null }
            ])),
            "1": player_wrapper(json!([
                { "player_key": "428.p.2" },
                { "headshot": { "url": "https://s.yimg.com/b.png" } },
                { "headshot": "gone" },
                { "name": null },
                { "name": { "full": 23 } }
            ])),
            "count": 2
        }));

        let players = parse_roster_from_response(&response);

        assert_eq!(players[0].name, "Unknown");
        assert_eq!(players[0].headshot_url, None);
        assert_eq!(players[1].name, "23");
        assert_eq!(players[1].headshot_url, None);
    }

    #[test]
    fn test_non_array_fragment_list_is_skipped() {
        let response = roster_response(json!({
            "0": { "player": [ { "player_key": "428.p.1" } ] },
            "1": { "player": "nope" },
            "2": { "not_player": [] },
            "count": 3
        }));

        assert!(parse_roster_from_response(&response).is_empty());
    }

    #[test]
    fn test_player_without_key_is_skipped() {
        let response = roster_response(json!({
            "0": player_wrapper(json!([ { "player_id": "1" }, { "name": { "full": "Nobody" } } ])),
            "1": player_wrapper(json!([ { "player_key": "" } ])),
            "count": 2
        }));

        assert!(parse_roster_from_response(&response).is_empty());
    }

    #[test]
    fn test_roster_order_follows_index() {
        let response = roster_response(json!({
            "1": player_wrapper(json!([ { "player_key": "428.p.b" } ])),
            "0": player_wrapper(json!([ { "player_key": "428.p.a" } ])),
            "count": 2
        }));

        let keys: Vec<String> = parse_roster_from_response(&response)
            .into_iter()
            .map(|p| p.player_key)
            .collect();
        assert_eq!(keys, vec!["428.p.a", "428.p.b"]);
    }

    #[test]
    fn test_roster_without_slot_zero_yields_nothing() {
        let response = json!({
            "fantasy_content": {
                "team": [
                    [ { "team_key": "428.l.1.t.3" } ],
                    { "roster": { "1": { "players": { "0": player_wrapper(json!([{ "player_key": "x" }])), "count": 1 } } } }
                ]
            }
        });

        assert!(parse_roster_from_response(&response).is_empty());
    }

    #[test]
    fn test_unexpected_envelope_is_empty() {
        assert!(parse_roster_from_response(&json!({})).is_empty());
        assert!(parse_roster_from_response(&json!({ "fantasy_content": { "team": {} } })).is_empty());
        assert!(parse_roster_from_response(&json!("roster")).is_empty());
    }
}
