use crate::domain::model::{LeaderQuery, LeaderRow};
use crate::domain::ports::StatsProvider;
use crate::utils::error::{FeatsError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_STATS_ENDPOINT: &str = "https://stats.nba.com/stats/leagueleaders";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// stats.nba.com 會拒絕沒有瀏覽器標頭的請求
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
    ),
    ("Accept", "application/json, text/plain, */*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Origin", "https://www.nba.com"),
    ("Referer", "https://www.nba.com/"),
    ("x-nba-stats-origin", "stats"),
    ("x-nba-stats-token", "true"),
];

#[derive(Debug, Deserialize)]
struct LeagueLeadersBody {
    #[serde(rename = "resultSet")]
    result_set: Option<ResultSet>,
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

/// reqwest client for the league-leaders endpoint.
#[derive(Debug, Clone)]
pub struct NbaStatsClient {
    client: Client,
    endpoint: String,
}

impl NbaStatsClient {
    pub fn new(
        endpoint: &str,
        request_timeout: Duration,
        extra_headers: &[(String, String)],
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let defaults = BROWSER_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()));

        for (name, value) in defaults.chain(extra_headers.iter().cloned()) {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| FeatsError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| FeatsError::InvalidConfigValueError {
                    field: format!("source.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn upstream_error(query: &LeaderQuery, message: impl ToString) -> FeatsError {
    FeatsError::UpstreamQueryFailed {
        query: query.to_string(),
        message: message.to_string(),
    }
}

/// Map the `PLAYER`, `TEAM` and stat columns of the table into rows, keeping provider order.
fn parse_rows(body: LeagueLeadersBody, query: &LeaderQuery) -> Result<Vec<LeaderRow>> {
    let table = body
        .result_set
        .or_else(|| body.result_sets.into_iter().next())
        .ok_or_else(|| upstream_error(query, "response has no result set"))?;

    let column = |name: &str| table.headers.iter().position(|header| header == name);

    let player_idx = column("PLAYER").ok_or_else(|| upstream_error(query, "missing PLAYER column"))?;
    let stat_idx = column(&query.stat_category).ok_or_else(|| {
        upstream_error(query, format!("missing {} column", query.stat_category))
    })?;
    let team_idx = column("TEAM").or_else(|| column("TEAM_ABBREVIATION"));

    let rows = table
        .row_set
        .iter()
        .filter_map(|row| {
            let player = row.get(player_idx)?.as_str()?.to_string();
            let stat = row.get(stat_idx)?.as_f64()?;
            let team = team_idx
                .and_then(|idx| row.get(idx))
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(LeaderRow { player, team, stat })
        })
        .collect();

    Ok(rows)
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    async fn league_leaders(&self, query: &LeaderQuery) -> Result<Vec<LeaderRow>> {
        tracing::debug!("📡 GET {} ({})", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("LeagueID", "00"),
                ("PerMode", query.per_mode.as_param()),
                ("Scope", "S"),
                ("Season", query.season.as_str()),
                ("SeasonType", "Regular Season"),
                ("StatCategory", query.stat_category.as_str()),
            ])
            .send()
            .await
            .map_err(|e| upstream_error(query, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(query, format!("HTTP {}", status)));
        }

        let body: LeagueLeadersBody = response.json().await.map_err(|e| upstream_error(query, e))?;
        parse_rows(body, query)
    }
}
