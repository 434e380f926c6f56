//! Canonical shape for ranking rows coming from either source.

use crate::domain::model::{RankingEntry, RawEntry};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Optional display fields carried through verbatim. Nothing else leaves the normalizer.
pub const PASSTHROUGH_KEYS: &[&str] = &["season", "seasons"];

/// Build a well-formed entry from a raw row, filling defaults for anything missing.
pub fn normalize(raw: &RawEntry) -> RankingEntry {
    let rank = raw
        .get("rank")
        .and_then(Value::as_u64)
        .and_then(|rank| u32::try_from(rank).ok())
        .unwrap_or(0);

    let player = raw
        .get("player")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_PLAYER)
        .to_string();

    // 空字串不是合法的隊名，一律視為缺值
    let team = raw
        .get("team")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|team| !team.is_empty())
        .map(str::to_string);

    let value = raw.get("value").and_then(coerce_number).unwrap_or_else(|| Number::from(0));

    let is_rodman = raw.get("is_rodman").is_some_and(is_truthy);

    let display: BTreeMap<String, Value> = PASSTHROUGH_KEYS
        .iter()
        .filter_map(|key| raw.get(key).map(|value| (key.to_string(), value.clone())))
        .collect();

    RankingEntry {
        rank,
        player,
        team,
        value,
        is_rodman,
        display,
    }
}

/// Overwrite every rank with its 1-based position.
pub fn assign_ranks(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = (index + 1) as u32;
    }
    entries
}

fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
