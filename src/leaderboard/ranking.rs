//! Friend score records and ranking
//!
//! Friend records arrive in the host's cloud-storage shape: a nickname, an
//! avatar URL and a list of string key/value pairs. The score is read from
//! the `bestScore` pair as a plain number (fractions and negatives kept);
//! anything missing, non-numeric or non-finite counts as 0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persistence::BEST_SCORE_KEY;

/// Maximum number of ranked friends shown
pub const MAX_RANKED: usize = 10;

/// A friend's cloud-storage record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FriendRecord {
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub nickname: String,
    /// `[{ "key": ..., "value": ... }, ...]`, kept loose so a bad list only zeroes the score
    #[serde(rename = "KVDataList", default)]
    pub kv_data_list: Value,
}

impl FriendRecord {
    /// Decode a record, falling back to an empty record when the shape is wrong
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Best score stored by this friend
    pub fn best_score(&self) -> f64 {
        self.kv_data_list
            .as_array()
            .and_then(|list| {
                list.iter()
                    .find(|kv| kv.get("key").and_then(Value::as_str) == Some(BEST_SCORE_KEY))
            })
            .map(|kv| parse_score(kv.get("value").unwrap_or(&Value::Null)))
            .unwrap_or(0.0)
    }
}

/// Parse a stored score value; missing, non-numeric or non-finite values are 0
pub fn parse_score(value: &Value) -> f64 {
    let number = match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    match number {
        // `+ 0.0` folds -0 into 0 so it displays as "0"
        Some(n) if n.is_finite() => n + 0.0,
        _ => 0.0,
    }
}

/// A row in the ranking panel
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub avatar_url: Option<String>,
    pub nickname: String,
    pub score: f64,
}

/// Sort friends by score (descending, stable) and keep the top `MAX_RANKED`
pub fn build_ranking(records: &[FriendRecord]) -> Vec<RankEntry> {
    let mut ranking: Vec<RankEntry> = records
        .iter()
        .map(|record| RankEntry {
            avatar_url: record.avatar_url.clone().filter(|url| !url.is_empty()),
            nickname: record.nickname.clone(),
            score: record.best_score(),
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking.truncate(MAX_RANKED);
    ranking
}

/// Decode a JSON array of friend records, tolerating malformed entries
pub fn decode_records(json: &str) -> Result<Vec<FriendRecord>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(values.into_iter().map(FriendRecord::from_value).collect())
}
