//! Live ranking strategies backed by the league-leaders table.
//!
//! Every strategy samples a fixed set of seasons, keeps the top rows of each,
//! and folds them into a "best single showing per player" leaderboard.

use crate::domain::model::{LeaderQuery, LeaderRow, PerMode, RawEntry};
use crate::domain::ports::{LiveError, LiveStrategy, StatsProvider};
use async_trait::async_trait;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const SEASON_RPG: &str = "season_rpg";
pub const OFFENSIVE_REBOUNDS_SEASON: &str = "offensive_rebounds_season";

/// How the upstream stat is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Averages, rounded to one decimal.
    OneDecimal,
    /// Season totals.
    Integer,
}

impl ValueKind {
    fn present(&self, stat: f64) -> f64 {
        match self {
            ValueKind::OneDecimal => (stat * 10.0).round() / 10.0,
            ValueKind::Integer => stat.trunc(),
        }
    }

    fn to_number(self, value: f64) -> Number {
        match self {
            ValueKind::Integer => Number::from(value as i64),
            ValueKind::OneDecimal => Number::from_f64(value).unwrap_or_else(|| Number::from(0)),
        }
    }
}

/// Parameters of one league-leaders leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardSpec {
    pub feat_id: String,
    pub stat_category: String,
    pub per_mode: PerMode,
    pub seasons: Vec<String>,
    pub rows_per_season: usize,
    pub value_kind: ValueKind,
}

impl LeaderboardSpec {
    /// Best single-season rebounds per game, post-1980.
    pub fn season_rpg() -> Self {
        Self {
            feat_id: SEASON_RPG.to_string(),
            stat_category: "REB".to_string(),
            per_mode: PerMode::PerGame,
            seasons: seasons(&[
                "1991-92", "1992-93", "1993-94", "1994-95", "1995-96", "1996-97", "1997-98",
                "1981-82", "1982-83", "1986-87", "1989-90", "2003-04", "2009-10",
            ]),
            rows_per_season: 5,
            value_kind: ValueKind::OneDecimal,
        }
    }

    /// Single-season offensive rebound totals, post-1980.
    pub fn offensive_rebounds_season() -> Self {
        Self {
            feat_id: OFFENSIVE_REBOUNDS_SEASON.to_string(),
            stat_category: "OREB".to_string(),
            per_mode: PerMode::Totals,
            seasons: seasons(&[
                "1991-92", "1992-93", "1993-94", "1994-95", "1995-96", "1981-82", "1982-83",
                "1986-87", "1989-90", "2007-08",
            ]),
            rows_per_season: 3,
            value_kind: ValueKind::Integer,
        }
    }

    fn query(&self, season: &str) -> LeaderQuery {
        LeaderQuery {
            season: season.to_string(),
            per_mode: self.per_mode,
            stat_category: self.stat_category.clone(),
        }
    }
}

fn seasons(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn is_rodman(name: &str) -> bool {
    name.to_lowercase().contains("rodman")
}

/// One player's line in one sampled season.
#[derive(Debug, Clone, PartialEq)]
struct Showing {
    player: String,
    team: Option<String>,
    value: f64,
    season: String,
}

pub struct LeagueLeadersStrategy {
    spec: LeaderboardSpec,
    provider: Arc<dyn StatsProvider>,
}

impl LeagueLeadersStrategy {
    pub fn new(spec: LeaderboardSpec, provider: Arc<dyn StatsProvider>) -> Self {
        Self { spec, provider }
    }

    pub fn spec(&self) -> &LeaderboardSpec {
        &self.spec
    }

    fn showing(&self, row: LeaderRow, season: &str) -> Showing {
        Showing {
            player: row.player,
            team: row.team,
            value: self.spec.value_kind.present(row.stat),
            season: season.to_string(),
        }
    }

    fn to_entry(&self, index: usize, showing: Showing) -> RawEntry {
        let team = showing.team.map(Value::String).unwrap_or(Value::Null);
        RawEntry::new()
            .with("rank", index + 1)
            .with("is_rodman", is_rodman(&showing.player))
            .with("player", showing.player)
            .with("team", team)
            .with("value", self.spec.value_kind.to_number(showing.value))
            .with("season", showing.season)
    }
}

#[async_trait]
impl LiveStrategy for LeagueLeadersStrategy {
    async fn fetch_live(&self, top_n: usize) -> Result<Vec<RawEntry>, LiveError> {
        let mut showings = Vec::new();

        for season in &self.spec.seasons {
            let query = self.spec.query(season);
            match self.provider.league_leaders(&query).await {
                Ok(rows) => {
                    showings.extend(
                        rows.into_iter()
                            .take(self.spec.rows_per_season)
                            .map(|row| self.showing(row, season)),
                    );
                }
                Err(e) => {
                    // 單一查詢失敗只丟棄該季資料
                    tracing::warn!("⚠️ {}: skipping '{}': {}", self.spec.feat_id, query, e);
                }
            }
        }

        if showings.is_empty() {
            return Err(LiveError::NoLiveData);
        }

        tracing::debug!(
            "📡 {}: aggregated {} rows across {} seasons",
            self.spec.feat_id,
            showings.len(),
            self.spec.seasons.len()
        );

        Ok(best_per_player(showings, top_n)
            .into_iter()
            .enumerate()
            .map(|(index, showing)| self.to_entry(index, showing))
            .collect())
    }
}

/// Sort by value descending, keep each player's first showing, truncate to `top_n`.
/// Equal values keep encounter order.
fn best_per_player(mut showings: Vec<Showing>, top_n: usize) -> Vec<Showing> {
    showings.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::new();
    showings
        .into_iter()
        .filter(|showing| seen.insert(showing.player.clone()))
        .take(top_n)
        .collect()
}

/// Feat id → live strategy.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn LiveStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The strategies for the live feats of the built-in catalog.
    pub fn nba_defaults(provider: Arc<dyn StatsProvider>) -> Self {
        let mut registry = Self::new();
        for spec in [
            LeaderboardSpec::season_rpg(),
            LeaderboardSpec::offensive_rebounds_season(),
        ] {
            let feat_id = spec.feat_id.clone();
            registry.register(
                &feat_id,
                Arc::new(LeagueLeadersStrategy::new(spec, provider.clone())),
            );
        }
        registry
    }

    pub fn register(&mut self, feat_id: &str, strategy: Arc<dyn LiveStrategy>) {
        self.strategies.insert(feat_id.to_string(), strategy);
    }

    pub fn get(&self, feat_id: &str) -> Option<Arc<dyn LiveStrategy>> {
        self.strategies.get(feat_id).cloned()
    }

    pub fn contains(&self, feat_id: &str) -> bool {
        self.strategies.contains_key(feat_id)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{FeatsError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Serves canned rows per season; seasons without rows fail.
    struct StubProvider {
        rows: HashMap<String, Vec<LeaderRow>>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                rows: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn season(mut self, season: &str, rows: &[(&str, &str, f64)]) -> Self {
            self.rows.insert(
                season.to_string(),
                rows.iter()
                    .map(|(player, team, stat)| LeaderRow {
                        player: player.to_string(),
                        team: Some(team.to_string()),
                        stat: *stat,
                    })
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl StatsProvider for StubProvider {
        async fn league_leaders(&self, query: &LeaderQuery) -> Result<Vec<LeaderRow>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.rows
                .get(&query.season)
                .cloned()
                .ok_or_else(|| FeatsError::UpstreamQueryFailed {
                    query: query.to_string(),
                    message: "HTTP 500".to_string(),
                })
        }
    }

    fn spec(seasons_list: &[&str], rows_per_season: usize, value_kind: ValueKind) -> LeaderboardSpec {
        LeaderboardSpec {
            feat_id: "test_feat".to_string(),
            stat_category: "REB".to_string(),
            per_mode: PerMode::PerGame,
            seasons: seasons(seasons_list),
            rows_per_season,
            value_kind,
        }
    }

    fn players(entries: &[RawEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.get("player").and_then(Value::as_str).unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_failed_seasons_are_skipped() {
        let provider = Arc::new(StubProvider::new().season(
            "1991-92",
            &[("Dennis Rodman", "DET", 18.74), ("Kevin Willis", "ATL", 15.5)],
        ));
        let strategy = LeagueLeadersStrategy::new(
            spec(&["1990-91", "1991-92", "1992-93"], 5, ValueKind::OneDecimal),
            provider.clone(),
        );

        let entries = strategy.fetch_live(10).await.unwrap();

        assert_eq!(provider.calls.load(AtomicOrdering::SeqCst), 3);
        assert_eq!(players(&entries), vec!["Dennis Rodman", "Kevin Willis"]);
        assert_eq!(entries[0].get("value").unwrap(), 18.7);
        assert_eq!(entries[0].get("season").unwrap(), "1991-92");
        assert_eq!(entries[0].get("is_rodman").unwrap(), true);
        assert_eq!(entries[1].get("is_rodman").unwrap(), false);
    }

    #[tokio::test]
    async fn test_all_seasons_failing_is_no_live_data() {
        let strategy = LeagueLeadersStrategy::new(
            spec(&["1991-92", "1992-93"], 5, ValueKind::OneDecimal),
            Arc::new(StubProvider::new()),
        );

        let result = strategy.fetch_live(10).await;
        assert!(matches!(result, Err(LiveError::NoLiveData)));
    }

    #[tokio::test]
    async fn test_best_showing_per_player_and_truncation() {
        let provider = Arc::new(
            StubProvider::new()
                .season(
                    "1991-92",
                    &[
                        ("Dennis Rodman", "DET", 18.7),
                        ("Kevin Willis", "ATL", 15.5),
                        ("Hakeem Olajuwon", "HOU", 12.1),
                    ],
                )
                .season(
                    "1992-93",
                    &[
                        ("Dennis Rodman", "DET", 18.3),
                        ("Shaquille O'Neal", "ORL", 13.9),
                        ("Dikembe Mutombo", "DEN", 13.0),
                    ],
                ),
        );
        let strategy = LeagueLeadersStrategy::new(
            spec(&["1991-92", "1992-93"], 2, ValueKind::OneDecimal),
            provider,
        );

        let entries = strategy.fetch_live(3).await.unwrap();

        assert_eq!(
            players(&entries),
            vec!["Dennis Rodman", "Kevin Willis", "Shaquille O'Neal"]
        );
        // 同一球員只保留最佳賽季
        assert_eq!(entries[0].get("season").unwrap(), "1991-92");
        let ranks: Vec<u64> = entries
            .iter()
            .map(|e| e.get("rank").and_then(Value::as_u64).unwrap())
            .collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_ties_keep_encounter_order() {
        let provider = Arc::new(
            StubProvider::new()
                .season("1991-92", &[("Moses Malone", "PHI", 400.0)])
                .season("1992-93", &[("Charles Barkley", "PHX", 400.0)]),
        );
        let strategy = LeagueLeadersStrategy::new(
            spec(&["1991-92", "1992-93"], 3, ValueKind::Integer),
            provider,
        );

        let entries = strategy.fetch_live(10).await.unwrap();
        assert_eq!(players(&entries), vec!["Moses Malone", "Charles Barkley"]);
        assert!(entries[0].get("value").unwrap().is_i64());
    }

    #[test]
    fn test_is_rodman() {
        assert!(is_rodman("Dennis Rodman"));
        assert!(is_rodman("RODMAN"));
        assert!(!is_rodman("Ben Wallace"));
    }

    #[test]
    fn test_nba_defaults_registers_live_feats() {
        let registry = StrategyRegistry::nba_defaults(Arc::new(StubProvider::new()));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(SEASON_RPG));
        assert!(registry.contains(OFFENSIVE_REBOUNDS_SEASON));
        assert!(registry.get("chaos_index").is_none());
    }
}
