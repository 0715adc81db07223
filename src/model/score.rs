use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 20;

/// Strokes on one hole, or unset when nothing has been entered yet.
///
/// Zero is never stored: the only way back to unset after a value was entered
/// is clearing the input or bumping down past 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Score(Option<u8>);

impl Score {
    pub const UNSET: Score = Score(None);

    /// Returns `None` when `strokes` falls outside `MIN_SCORE..=MAX_SCORE`.
    #[must_use]
    pub fn new(strokes: i64) -> Option<Score> {
        u8::try_from(strokes)
            .ok()
            .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
            .map(|s| Score(Some(s)))
    }

    #[must_use]
    pub fn value(self) -> Option<u8> {
        self.0
    }

    #[must_use]
    pub fn is_set(self) -> bool {
        self.0.is_some()
    }

    /// Interpret what the user typed into a score box.
    ///
    /// Blank input clears the score. A finite whole number in range replaces
    /// it. Anything else yields `None` and the caller keeps the previous value.
    #[must_use]
    pub fn parse_input(raw: &str) -> Option<Score> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(Score::UNSET);
        }
        let n: f64 = raw.parse().ok()?;
        if !n.is_finite() || n.fract() != 0.0 {
            return None;
        }
        if n < f64::from(MIN_SCORE) || n > f64::from(MAX_SCORE) {
            return None;
        }
        Score::new(n as i64)
    }

    /// Unset counts as zero; the sum is clamped to `0..=MAX_SCORE` and a zero
    /// result collapses back to unset.
    #[must_use]
    pub fn bumped(self, delta: i32) -> Score {
        let current = i32::from(self.0.unwrap_or(0));
        let next = current
            .saturating_add(delta)
            .clamp(0, i32::from(MAX_SCORE));
        Score::new(i64::from(next)).unwrap_or(Score::UNSET)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(score_from_value(&value))
    }
}

// Sheets hand back blanks as "" and numbers sometimes as text.
fn score_from_value(value: &Value) -> Score {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .and_then(Score::new)
            .unwrap_or(Score::UNSET),
        Value::String(s) => Score::parse_input(s).unwrap_or(Score::UNSET),
        _ => Score::UNSET,
    }
}
