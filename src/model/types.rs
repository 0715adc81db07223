use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::score::Score;

/// Player identifier as the sheet reports it. Kept in the JSON form it arrived in
/// so submissions echo back exactly what was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(serde_json::Number),
    Text(String),
}

impl PlayerId {
    /// The id as JSON text, so `7` and `"7"` stay distinct when a card posts
    /// its player back.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            PlayerId::Number(n) => n.to_string(),
            PlayerId::Text(s) => Value::String(s.clone()).to_string(),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{n}"),
            PlayerId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: Score,
}

/// Response of `op=group`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "loose_holes")]
    pub completed_holes: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group_id: Value,
    #[serde(default)]
    pub total: Value,
}

impl LeaderboardRow {
    #[must_use]
    pub fn group_display(&self) -> String {
        display_cell(&self.group_id)
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        display_cell(&self.total)
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => "—".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Response of `op=leaderboard`. Rows arrive already ranked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leaderboard {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rows: Vec<LeaderboardRow>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Whole numbers or numeric text; anything else in the list is skipped.
fn loose_holes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let cells = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(cells
        .iter()
        .filter_map(|cell| match cell {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub value: Score,
}

/// Body of the `submitHole` POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHole {
    pub op: &'static str,
    pub group_id: String,
    pub pin: String,
    pub hole: u8,
    pub scores: Vec<ScoreEntry>,
}

impl SubmitHole {
    pub const OP: &'static str = "submitHole";

    #[must_use]
    pub fn new(group_id: &str, pin: &str, hole: u8, players: &[Player]) -> Self {
        Self {
            op: Self::OP,
            group_id: group_id.trim().to_string(),
            pin: pin.trim().to_string(),
            hole,
            scores: players
                .iter()
                .map(|p| ScoreEntry {
                    player_id: p.player_id.clone(),
                    value: p.score,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub filled: usize,
    pub total: usize,
}

#[must_use]
pub fn progress(players: &[Player]) -> Progress {
    Progress {
        filled: players.iter().filter(|p| p.score.is_set()).count(),
        total: players.len(),
    }
}
