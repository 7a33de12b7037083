use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Punch direction as reported by the attendance terminals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    Other(String),
}

impl Direction {
    /// `IN` in any case and the terminal code `1` are entries; `OUT` and `0` are exits.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("in") || raw == "1" {
            Direction::In
        } else if raw.eq_ignore_ascii_case("out") || raw == "0" {
            Direction::Out
        } else {
            Direction::Other(raw.to_string())
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, Direction::In)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLog {
    pub user_id: String,
    pub direction: Direction,
    /// Local wall-clock time of the punch, `None` when the upstream value was unusable.
    pub log_date: Option<NaiveDateTime>,
}
