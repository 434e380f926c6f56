use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// How a feat's ranking is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStrategy {
    Live,
    Fallback,
}

/// Full catalog entry. Strategy and resource are internal and never serialized to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatDescriptor {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub icon: String,
    pub unit: String,
    pub source_strategy: SourceStrategy,
    pub fallback_resource: String,
}

/// Public projection of a feat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatSummary {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub icon: String,
    pub unit: String,
}

impl From<&FeatDescriptor> for FeatSummary {
    fn from(feat: &FeatDescriptor) -> Self {
        Self {
            id: feat.id.clone(),
            title: feat.title.clone(),
            subtitle: feat.subtitle.clone(),
            description: feat.description.clone(),
            icon: feat.icon.clone(),
            unit: feat.unit.clone(),
        }
    }
}

/// A ranking row as it arrives from a source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntry {
    pub data: Map<String, Value>,
}

impl RawEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Canonical ranking row served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub player: String,
    pub team: Option<String>,
    pub value: Number,
    pub is_rodman: bool,
    /// Allow-listed display fields such as `season`.
    #[serde(flatten)]
    pub display: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub feat_id: String,
    pub title: String,
    pub subtitle: String,
    pub unit: String,
    pub source: RankingSource,
    pub ranking: Vec<RankingEntry>,
    pub rodman_in_ranking: bool,
    pub rodman_is_first: bool,
}

impl RankingResponse {
    pub fn build(feat: &FeatDescriptor, ranking: Vec<RankingEntry>, source: RankingSource) -> Self {
        let rodman_in_ranking = ranking.iter().any(|entry| entry.is_rodman);
        let rodman_is_first = ranking.first().is_some_and(|entry| entry.is_rodman);

        Self {
            feat_id: feat.id.clone(),
            title: feat.title.clone(),
            subtitle: feat.subtitle.clone(),
            unit: feat.unit.clone(),
            source,
            ranking,
            rodman_in_ranking,
            rodman_is_first,
        }
    }
}

/// Point-in-time cache diagnostics. `expired_keys` counts entries a `get` has not evicted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_keys: usize,
    pub live_keys: usize,
    pub expired_keys: usize,
}

/// Aggregation mode of the league-leaders table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerMode {
    PerGame,
    Totals,
}

impl PerMode {
    pub fn as_param(&self) -> &'static str {
        match self {
            PerMode::PerGame => "PerGame",
            PerMode::Totals => "Totals",
        }
    }
}

/// One upstream league-leaders request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderQuery {
    pub season: String,
    pub per_mode: PerMode,
    pub stat_category: String,
}

impl std::fmt::Display for LeaderQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.stat_category,
            self.per_mode.as_param(),
            self.season
        )
    }
}

/// One row of the upstream league-leaders table, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRow {
    pub player: String,
    pub team: Option<String>,
    pub stat: f64,
}
