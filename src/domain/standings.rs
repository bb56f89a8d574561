//! League standings snapshot
//!
//! A read-only view of the league table taken once per ranking run. It is
//! the source for opponent strength, the season points-percentage factor
//! and the streak factor. Any team may be missing from it; downstream
//! consumers substitute neutral defaults rather than failing.

use serde::{Deserialize, Serialize};

/// One team's line in the standings snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team: String,
    pub games_played: u32,
    pub points: u32,
    /// Points percentage on the 0-100 scale
    pub points_percentage: f64,
    pub goal_differential: i32,
    /// Current streak string such as "W5", "L3" or "OT2"; empty when the
    /// upstream snapshot carries none
    pub streak: String,
}

/// Immutable standings snapshot for one ranking run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    pub entries: Vec<StandingsEntry>,
}

impl StandingsSnapshot {
    pub fn get(&self, team: &str) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.team == team)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Direction of a team's current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakKind {
    Wins,
    Losses,
    /// Overtime-loss or other mixed streak types
    Other,
}

/// Parsed streak, e.g. "W5" -> five straight wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: u32,
}

impl Streak {
    /// Parse a type-and-count streak string. Returns `None` for empty or
    /// unrecognizable input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let digits_at = raw.find(|c: char| c.is_ascii_digit())?;
        let (prefix, count) = raw.split_at(digits_at);
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let length: u32 = count.parse().ok()?;
        let kind = match prefix {
            "W" => StreakKind::Wins,
            "L" => StreakKind::Losses,
            _ => StreakKind::Other,
        };
        Some(Self { kind, length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_parse() {
        assert_eq!(
            Streak::parse("W5"),
            Some(Streak {
                kind: StreakKind::Wins,
                length: 5
            })
        );
        assert_eq!(
            Streak::parse("L12"),
            Some(Streak {
                kind: StreakKind::Losses,
                length: 12
            })
        );
        assert_eq!(
            Streak::parse("OT2"),
            Some(Streak {
                kind: StreakKind::Other,
                length: 2
            })
        );
        assert_eq!(Streak::parse(""), None);
        assert_eq!(Streak::parse("7"), None);
        assert_eq!(Streak::parse("W"), None);
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = StandingsSnapshot {
            entries: vec![StandingsEntry {
                team: "COL".into(),
                games_played: 20,
                points: 28,
                points_percentage: 70.0,
                goal_differential: 15,
                streak: "W3".into(),
            }],
        };
        assert!(snapshot.get("COL").is_some());
        assert!(snapshot.get("SEA").is_none());
    }
}
