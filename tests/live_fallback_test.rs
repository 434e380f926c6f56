use httpmock::prelude::*;
use rodman_feats::core::live::LeaderboardSpec;
use rodman_feats::core::RankingSource;
use rodman_feats::{build_engine, RankingEngine, TomlConfig};
use serde_json::{json, Value};

const LEADERS_PATH: &str = "/stats/leagueleaders";

fn engine_for(server: &MockServer, live_enabled: bool) -> RankingEngine {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[source]
endpoint = "{}"
request_timeout_seconds = 2
live_timeout_seconds = 10
live_enabled = {}

[fallback]
dir = "{}/data/fallback"
"#,
        server.url(LEADERS_PATH),
        live_enabled,
        env!("CARGO_MANIFEST_DIR"),
    ))
    .unwrap();

    build_engine(&config).unwrap()
}

fn rebounds_table() -> Value {
    json!({
        "resource": "leagueleaders",
        "resultSet": {
            "name": "LeagueLeaders",
            "headers": ["PLAYER_ID", "RANK", "PLAYER", "TEAM", "GP", "REB"],
            "rowSet": [
                [23, 1, "Dennis Rodman", "DET", 82, 18.74],
                [1450, 2, "Kevin Willis", "ATL", 81, 15.46],
                [76, 3, "Hakeem Olajuwon", "HOU", 70, 12.14],
                [121, 4, "Shaquille O'Neal", "ORL", 81, 13.9]
            ]
        }
    })
}

#[tokio::test]
async fn test_live_ranking_dedupes_players_across_seasons() {
    let server = MockServer::start_async().await;
    let leaders_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(LEADERS_PATH)
                .query_param("StatCategory", "REB")
                .query_param("PerMode", "PerGame");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(rebounds_table());
        })
        .await;

    let engine = engine_for(&server, true);
    let response = engine.get_ranking("season_rpg", 10).await.unwrap().unwrap();

    assert_eq!(response.source, RankingSource::Live);
    // 每一季回傳同一張表，所以每位球員只會出現一次
    assert_eq!(response.ranking.len(), 4);
    assert_eq!(response.ranking[0].player, "Dennis Rodman");
    assert_eq!(response.ranking[0].value, serde_json::Number::from_f64(18.7).unwrap());
    assert!(response.rodman_is_first);

    let players: Vec<&str> = response.ranking.iter().map(|e| e.player.as_str()).collect();
    assert_eq!(
        players,
        vec!["Dennis Rodman", "Kevin Willis", "Shaquille O'Neal", "Hakeem Olajuwon"]
    );
    let ranks: Vec<u32> = response.ranking.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);

    leaders_mock.assert_hits_async(LeaderboardSpec::season_rpg().seasons.len()).await;
}

#[tokio::test]
async fn test_provider_outage_falls_back_to_dataset() {
    let server = MockServer::start_async().await;
    let leaders_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(LEADERS_PATH);
            then.status(500).body("upstream exploded");
        })
        .await;

    let engine = engine_for(&server, true);
    let response = engine.get_ranking("season_rpg", 5).await.unwrap().unwrap();

    assert_eq!(response.source, RankingSource::Fallback);
    assert_eq!(response.ranking.len(), 5);
    assert!(response.rodman_is_first);
    assert!(leaders_mock.hits_async().await > 0);
}

#[tokio::test]
async fn test_partial_outage_still_serves_live() {
    let server = MockServer::start_async().await;
    let spec = LeaderboardSpec::offensive_rebounds_season();

    let table = json!({
        "resultSet": {
            "headers": ["PLAYER", "TEAM_ABBREVIATION", "OREB"],
            "rowSet": [
                ["Dennis Rodman", "DET", 523],
                ["Charles Barkley", "PHI", 390],
                ["Buck Williams", "POR", 300]
            ]
        }
    });

    for season in &spec.seasons {
        let season = season.clone();
        let ok = season == "1991-92";
        let table = table.clone();
        server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path(LEADERS_PATH)
                    .query_param("StatCategory", "OREB")
                    .query_param("PerMode", "Totals")
                    .query_param("Season", season.as_str());
                if ok {
                    then.status(200).json_body(table);
                } else {
                    then.status(503);
                }
            })
            .await;
    }

    let engine = engine_for(&server, true);
    let response = engine
        .get_ranking("offensive_rebounds_season", 10)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.source, RankingSource::Live);
    assert_eq!(response.ranking.len(), 3);
    assert_eq!(response.ranking[0].value, serde_json::Number::from(523));
    assert_eq!(response.ranking[0].team.as_deref(), Some("DET"));
    assert_eq!(
        response.ranking[0].display.get("season"),
        Some(&json!("1991-92"))
    );
}

#[tokio::test]
async fn test_empty_tables_fall_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(LEADERS_PATH);
            then.status(200).json_body(json!({
                "resultSet": { "headers": ["PLAYER", "TEAM", "REB"], "rowSet": [] }
            }));
        })
        .await;

    let engine = engine_for(&server, true);
    let response = engine.get_ranking("season_rpg", 10).await.unwrap().unwrap();

    assert_eq!(response.source, RankingSource::Fallback);
    assert!(response.rodman_is_first);
}

#[tokio::test]
async fn test_fallback_feats_never_touch_provider() {
    let server = MockServer::start_async().await;
    let leaders_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(LEADERS_PATH);
            then.status(200).json_body(rebounds_table());
        })
        .await;

    let engine = engine_for(&server, true);
    for feat_id in ["rebounding_titles", "consecutive_titles", "chaos_index"] {
        let response = engine.get_ranking(feat_id, 10).await.unwrap().unwrap();
        assert_eq!(response.source, RankingSource::Fallback);
    }

    leaders_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_live_disabled_skips_provider() {
    let server = MockServer::start_async().await;
    let leaders_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(LEADERS_PATH);
            then.status(200).json_body(rebounds_table());
        })
        .await;

    let engine = engine_for(&server, false);
    let response = engine.get_ranking("season_rpg", 10).await.unwrap().unwrap();

    assert_eq!(response.source, RankingSource::Fallback);
    leaders_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_live_result_is_cached() {
    let server = MockServer::start_async().await;
    let leaders_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(LEADERS_PATH);
            then.status(200).json_body(rebounds_table());
        })
        .await;

    let engine = engine_for(&server, true);
    let first = engine.get_ranking("season_rpg", 10).await.unwrap().unwrap();
    let hits_after_first = leaders_mock.hits_async().await;
    let second = engine.get_ranking("season_rpg", 10).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(leaders_mock.hits_async().await, hits_after_first);
}
